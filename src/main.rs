// What you SEE:
// • A small borderless window, always on top, centered on the main screen.
// • Your webcam feed with your nickname in a dark box in the bottom-left corner.
// • Click & drag moves the window. ESC or Q quits.

use std::io;
use std::process::ExitCode;

use battlecam::app::{App, NativePlatform};
use battlecam::camera::{list_cameras, probe_native};
use battlecam::cli::{Args, Command, USAGE};
use battlecam::config::{Settings, MAX_PROBED_CAMERAS};
use battlecam::Error;
use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = match Args::parse().into_command() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                Error::MissingArgument("camera") => {
                    eprintln!("Use --list-cameras to see available cameras")
                }
                _ => eprintln!("Use --help for usage information"),
            }
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::ListCameras => match list(&mut io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Run(settings) => match run(&settings) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                if matches!(e, Error::DeviceUnavailable { .. }) {
                    eprintln!("Use --list-cameras to see available cameras");
                }
                ExitCode::FAILURE
            }
        },
    }
}

fn list<W: io::Write>(out: &mut W) -> Result<(), Error> {
    let found = list_cameras(out, MAX_PROBED_CAMERAS, probe_native)?;
    log::debug!("{} camera(s) answered", found.len());
    Ok(())
}

fn run(settings: &Settings) -> Result<(), Error> {
    let mut app = App::start(&mut NativePlatform, settings)?;

    println!("BattleCam2 started - {}", settings.nickname);
    println!("Camera: {}", app.camera_index());
    println!("Press ESC or Q to quit");
    println!("Click and drag to move window");

    app.run();
    Ok(())
}
