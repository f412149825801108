use argh::FromArgs;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use viso::image::Image;
use viso::imgproc;
use viso::io::fps_counter::FpsCounter;
use viso::io::v4l::{CameraCapture, CameraConfig};

#[derive(FromArgs)]
/// Show a live camera stream and its grayscale rendition
struct Args {
    /// the camera id to use
    #[argh(option, short = 'c', default = "0")]
    camera_id: usize,

    /// the frames per second to request
    #[argh(option, short = 'f', default = "30")]
    fps: u32,

    /// the duration in seconds to run the app
    #[argh(option, short = 'd')]
    duration: Option<u64>,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("viso Webcam Viewer").spawn()?;

    let mut camera = CameraCapture::new(CameraConfig {
        index: args.camera_id,
        fps: args.fps,
        ..Default::default()
    })?;

    // create a cancel token to stop the capture loop
    let cancel_token = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            println!("Received Ctrl-C signal. Sending cancel signal !!");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    // cancel the token after the requested duration
    if let Some(duration_secs) = args.duration {
        std::thread::spawn({
            let cancel_token = cancel_token.clone();
            move || {
                std::thread::sleep(std::time::Duration::from_secs(duration_secs));
                println!("Sending timer cancel signal !!");
                cancel_token.store(true, Ordering::SeqCst);
            }
        });
    }

    // preallocate the image buffers
    let mut rgb = camera.alloc_frame()?;
    let mut gray = Image::<u8, 1>::from_size_val(camera.size(), 0)?;

    let mut fps_counter = FpsCounter::new();

    // start grabbing frames from the camera
    while !cancel_token.load(Ordering::SeqCst) {
        camera.grab_into(&mut rgb)?;

        imgproc::color::gray_from_rgb_u8(&rgb, &mut gray)?;

        fps_counter.update();
        log::debug!("fps: {:.1}", fps_counter.fps());

        rec.log_static(
            "original",
            &rerun::Image::from_elements(rgb.as_slice(), rgb.size().into(), rerun::ColorModel::RGB),
        )?;

        rec.log_static(
            "grayscale",
            &rerun::Image::from_elements(gray.as_slice(), gray.size().into(), rerun::ColorModel::L),
        )?;
    }

    println!("Finished streaming. Closing app.");

    Ok(())
}
