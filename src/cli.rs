// Command line surface.

use clap::Parser;

use crate::config::{Settings, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Error;

pub const USAGE: &str = "
BattleCam2 - Conference Webcam Overlay Application

USAGE:
    battlecam --nickname <name> --camera <index>
    battlecam --list-cameras
    battlecam --help

OPTIONS:
    --nickname, -n    Your name/nickname to display on the video
    --camera, -c      Camera index (use --list-cameras to see available)
    --list-cameras    List all available cameras
    --width           Window width in pixels (default: 320)
    --height          Window height in pixels (default: 240)
    --help, -h        Show this help message

EXAMPLES:
    # List available cameras
    battlecam --list-cameras

    # Start with default size (320x240)
    battlecam --nickname \"John Doe\" --camera 0

    # Start with custom size
    battlecam --nickname \"Jane Smith\" --camera 1 --width 640 --height 480

CONTROLS:
    ESC or Q          Quit the application
    Click & Drag      Move the window

PURPOSE:
    This app helps conference speakers display their webcam feed in an
    always-on-top, borderless window alongside their presentation.
";

#[derive(Parser, Debug)]
#[command(name = "battlecam", about = "Conference webcam overlay", disable_help_flag = true)]
pub struct Args {
    /// Your name/nickname to display
    #[arg(short, long)]
    pub nickname: Option<String>,

    /// Camera index (e.g. 0, 1, 2)
    #[arg(short, long)]
    pub camera: Option<String>,

    /// List available cameras
    #[arg(long)]
    pub list_cameras: bool,

    /// Window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Show help message
    #[arg(short, long)]
    pub help: bool,
}

/// What the process should do.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    ListCameras,
    Run(Settings),
}

impl Args {
    /// Decide what to do. A missing nickname or camera (with other flags
    /// present) is an error; no nickname and no camera at all means help.
    pub fn into_command(self) -> Result<Command, Error> {
        if self.list_cameras {
            return Ok(Command::ListCameras);
        }

        let nickname = self.nickname.filter(|s| !s.is_empty());
        let camera = self.camera.filter(|s| !s.is_empty());

        if self.help || (nickname.is_none() && camera.is_none()) {
            return Ok(Command::Help);
        }

        let nickname = nickname.ok_or(Error::MissingArgument("nickname"))?;
        let camera = camera.ok_or(Error::MissingArgument("camera"))?;

        Ok(Command::Run(Settings {
            nickname,
            camera,
            width: self.width,
            height: self.height,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(argv: &[&str]) -> Result<Command, Error> {
        let args = Args::try_parse_from(std::iter::once("battlecam").chain(argv.iter().copied()))
            .expect("arguments should parse");
        args.into_command()
    }

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(command(&[]).unwrap(), Command::Help);
        assert_eq!(command(&["-h"]).unwrap(), Command::Help);
        assert_eq!(command(&["--help", "-n", "Ada", "-c", "0"]).unwrap(), Command::Help);
    }

    #[test]
    fn list_cameras_wins() {
        assert_eq!(command(&["--list-cameras", "-n", "Ada"]).unwrap(), Command::ListCameras);
    }

    #[test]
    fn run_with_defaults() {
        let cmd = command(&["--nickname", "Ada", "--camera", "0"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Settings {
                nickname: "Ada".into(),
                camera: "0".into(),
                width: 320,
                height: 240,
            })
        );
    }

    #[test]
    fn custom_size() {
        let cmd = command(&["-n", "Jane", "-c", "front", "--width", "640", "--height", "480"]);
        match cmd.unwrap() {
            Command::Run(s) => {
                assert_eq!((s.width, s.height), (640, 480));
                assert_eq!(s.camera, "front");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_nickname_or_camera_is_an_error() {
        assert!(matches!(command(&["-c", "0"]), Err(Error::MissingArgument("nickname"))));
        assert!(matches!(command(&["-n", "Ada"]), Err(Error::MissingArgument("camera"))));
        assert!(matches!(
            command(&["-n", "Ada", "-c", ""]),
            Err(Error::MissingArgument("camera"))
        ));
    }

    #[test]
    fn usage_names_the_tool_and_its_flags() {
        assert!(USAGE.trim_start().starts_with("BattleCam2 - "));
        for flag in ["--nickname", "--camera", "--list-cameras", "--width", "--height", "--help"] {
            assert!(USAGE.contains(flag), "usage is missing {flag}");
        }
    }

    #[test]
    fn bad_width_is_rejected_by_the_parser() {
        let argv = ["battlecam", "-n", "Ada", "-c", "0", "--width", "wide"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
