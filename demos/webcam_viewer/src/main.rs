#[cfg(target_os = "linux")]
mod viewer;

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    viewer::run()
}

#[cfg(not(target_os = "linux"))]
fn main() {
    panic!("This demo is only supported on Linux due to the V4L dep.");
}
