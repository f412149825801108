use std::process::Command;

#[test]
fn no_arguments_prints_usage_and_exits_2() {
    let output = Command::new(env!("CARGO_BIN_EXE_box_annotator"))
        .output()
        .expect("failed to run box_annotator");

    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usage: box_annotator"));
}
