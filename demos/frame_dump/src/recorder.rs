use argh::FromArgs;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use viso::io::frame_saver::FrameSaver;
use viso::io::v4l::{CameraCapture, CameraConfig};

#[derive(FromArgs)]
/// Record camera frames to sequentially numbered JPEG files
struct Args {
    /// the camera id to use
    #[argh(option, short = 'c', default = "0")]
    camera_id: usize,

    /// the frames per second to request
    #[argh(option, short = 'f', default = "30")]
    fps: u32,

    /// the directory the frames are written into
    #[argh(option, short = 'o', default = "PathBuf::from(\"images/capture\")")]
    output_dir: PathBuf,

    /// the file name prefix for the saved frames
    #[argh(option, short = 'p', default = "String::from(\"frame\")")]
    prefix: String,

    /// the duration in seconds to run the app
    #[argh(option, short = 'd')]
    duration: Option<u64>,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("viso Frame Dump").spawn()?;

    let mut camera = CameraCapture::new(CameraConfig {
        index: args.camera_id,
        fps: args.fps,
        ..Default::default()
    })?;

    // the saver creates the output directory if it does not exist
    let mut saver = FrameSaver::new(&args.output_dir, args.prefix.as_str())?;

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

    // preallocate the frame buffer
    let mut rgb = camera.alloc_frame()?;

    // start grabbing frames from the camera
    while !cancel_token.load(Ordering::SeqCst) {
        let sequence = camera.grab_into(&mut rgb)?;

        let file_path = saver.save(&rgb)?;
        log::debug!("frame {} -> {:?}", sequence, file_path);

        rec.log_static(
            "frame",
            &rerun::Image::from_elements(rgb.as_slice(), rgb.size().into(), rerun::ColorModel::RGB),
        )?;
    }

    println!(
        "Finished recording {} frames into {:?}.",
        saver.frames_saved(),
        saver.dir()
    );

    Ok(())
}
