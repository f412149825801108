use std::io::BufRead;
use std::path::PathBuf;

use viso::io::functional as F;
use viso::io::jpeg::write_image_jpeg_rgb8;
use viso::ui::{BoxAnnotator, PointerEvent};

/// The file the annotated image is written to on exit.
const OUTPUT_FILE: &str = "box_image.jpg";

/// The first positional argument, if present.
fn image_path_from_args(args: &[String]) -> Option<PathBuf> {
    args.get(1).map(PathBuf::from)
}

fn log_preview(
    rec: &rerun::RecordingStream,
    annotator: &BoxAnnotator,
) -> Result<(), Box<dyn std::error::Error>> {
    let preview = annotator.preview();
    rec.log_static(
        "annotated",
        &rerun::Image::from_elements(
            preview.as_slice(),
            preview.size().into(),
            rerun::ColorModel::RGB,
        ),
    )?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(image_path) = image_path_from_args(&args) else {
        println!("error: missing command line argument for image name");
        println!("usage: box_annotator <image-path>");
        std::process::exit(2);
    };

    let image = F::read_image_any_rgb8(&image_path)?;

    println!(
        "(rows, cols, channels): ({}, {}, {})",
        image.rows(),
        image.cols(),
        image.num_channels()
    );

    // create a Rerun recording stream
    let rec = rerun::RecordingStreamBuilder::new("viso Box Annotator").spawn()?;

    rec.log_static(
        "original",
        &rerun::Image::from_elements(
            image.as_slice(),
            image.size().into(),
            rerun::ColorModel::RGB,
        ),
    )?;

    let mut annotator = BoxAnnotator::new(image);
    log_preview(&rec, &annotator)?;

    println!("draw with lines like `down 10 10`, `move 50 40`, `up 80 60`; `quit` to finish");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "quit" {
            break;
        }

        match PointerEvent::parse(&line) {
            Some(event) => {
                annotator.handle_event(event);
                log_preview(&rec, &annotator)?;
            }
            None => {
                if !line.trim().is_empty() {
                    println!("unrecognized pointer line: {line}");
                }
            }
        }
    }

    println!("box coordinates");
    for rect in annotator.rects() {
        println!(
            "x1: {}, y1: {}, x2: {}, y2: {}",
            rect.x1, rect.y1, rect.x2, rect.y2
        );
    }

    // save a copy of the working image with the boxes
    let annotated = annotator.into_image();
    write_image_jpeg_rgb8(OUTPUT_FILE, &annotated, 90)?;
    println!("wrote {OUTPUT_FILE}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::image_path_from_args;

    #[test]
    fn missing_argument_yields_none() {
        let args = vec!["box_annotator".to_string()];
        assert_eq!(image_path_from_args(&args), None);
    }
}
