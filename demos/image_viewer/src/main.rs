use std::path::PathBuf;

use viso::imgproc;
use viso::io::functional as F;

/// The first positional argument, if present.
fn image_path_from_args(args: &[String]) -> Option<PathBuf> {
    args.get(1).map(PathBuf::from)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(image_path) = image_path_from_args(&args) else {
        println!("error: missing command line argument for image name");
        println!("usage: image_viewer <image-path>");
        std::process::exit(2);
    };

    // read the image in both pixel formats
    let rgb = F::read_image_any_rgb8(&image_path)?;
    let gray = F::read_image_any_gray8(&image_path)?;

    println!(
        "(rows, cols, channels): ({}, {}, {})",
        rgb.rows(),
        rgb.cols(),
        rgb.num_channels()
    );
    println!("number of pixels: {}", rgb.rows() * rgb.cols());

    let (std, mean) = imgproc::core::std_mean(&rgb);
    println!("channel mean: {mean:.2?}");
    println!("channel std:  {std:.2?}");

    // create a Rerun recording stream and log both renditions
    let rec = rerun::RecordingStreamBuilder::new("viso Image Viewer").spawn()?;

    rec.log(
        "color",
        &rerun::Image::from_elements(rgb.as_slice(), rgb.size().into(), rerun::ColorModel::RGB),
    )?;

    rec.log(
        "gray",
        &rerun::Image::from_elements(gray.as_slice(), gray.size().into(), rerun::ColorModel::L),
    )?;

    Ok(())
}
