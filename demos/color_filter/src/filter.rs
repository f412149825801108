use argh::FromArgs;
use std::io::BufRead;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use viso::image::Image;
use viso::imgproc::{
    core::bitwise_and,
    morphology::{dilate, erode},
    threshold::in_range,
};
use viso::io::v4l::{CameraCapture, CameraConfig};
use viso::ui::{ColorRangeControls, ControlUpdate};

#[derive(FromArgs)]
/// Filter a live camera stream by an adjustable RGB color range
struct Args {
    /// the camera id to use
    #[argh(option, short = 'c', default = "0")]
    camera_id: usize,

    /// the frames per second to request
    #[argh(option, short = 'f', default = "30")]
    fps: u32,

    /// the erode/dilate iterations cleaning the mask, 0 disables
    #[argh(option, short = 'n', default = "0")]
    denoise: usize,

    /// the duration in seconds to run the app
    #[argh(option, short = 'd')]
    duration: Option<u64>,
}

fn read_bounds(controls: &Mutex<ColorRangeControls>) -> Result<([u8; 3], [u8; 3]), String> {
    controls
        .lock()
        .map(|controls| controls.bounds())
        .map_err(|_| String::from("color range controls lock poisoned"))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("viso Color Filter").spawn()?;

    let mut camera = CameraCapture::new(CameraConfig {
        index: args.camera_id,
        fps: args.fps,
        ..Default::default()
    })?;

    // the six range controls, adjusted from stdin while the loop polls them
    let controls = Arc::new(Mutex::new(ColorRangeControls::new()));

    println!("adjust the filter with lines like: `g low 40` or `red high 200`");

    std::thread::spawn({
        let controls = controls.clone();
        move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match ControlUpdate::parse(&line) {
                    Some(update) => {
                        let Ok(mut controls) = controls.lock() else { break };
                        controls.apply(update);
                    }
                    None => {
                        if !line.trim().is_empty() {
                            println!("unrecognized control line: {line}");
                        }
                    }
                }
            }
        }
    });

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
    let mut mask = Image::<u8, 1>::from_size_val(camera.size(), 0)?;
    let mut opened = Image::<u8, 1>::from_size_val(camera.size(), 0)?;
    let mut filtered = Image::<u8, 3>::from_size_val(camera.size(), 0)?;

    // start grabbing frames from the camera
    while !cancel_token.load(Ordering::SeqCst) {
        camera.grab_into(&mut rgb)?;

        // read the control positions for this iteration
        let (lower, upper) = read_bounds(&controls)?;

        in_range(&rgb, &mut mask, &lower, &upper)?;

        // erode then dilate the mask to drop speckle noise
        if args.denoise > 0 {
            erode(&mask, &mut opened, args.denoise)?;
            dilate(&opened, &mut mask, args.denoise)?;
        }

        bitwise_and(&rgb, &rgb, &mut filtered, &mask)?;

        log::debug!("range: {lower:?} -> {upper:?}");

        rec.log_static(
            "original",
            &rerun::Image::from_elements(rgb.as_slice(), rgb.size().into(), rerun::ColorModel::RGB),
        )?;

        rec.log_static(
            "mask",
            &rerun::Image::from_elements(mask.as_slice(), mask.size().into(), rerun::ColorModel::L),
        )?;

        rec.log_static(
            "filter",
            &rerun::Image::from_elements(
                filtered.as_slice(),
                filtered.size().into(),
                rerun::ColorModel::RGB,
            ),
        )?;
    }

    println!("Finished filtering. Closing app.");

    Ok(())
}
