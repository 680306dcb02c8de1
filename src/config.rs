// Fixed knobs and the per-run values handed over by the command line.

use std::time::Duration;

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;

/// ~30 FPS refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// `--list-cameras` probes device indices 0..MAX_PROBED_CAMERAS.
pub const MAX_PROBED_CAMERAS: u32 = 10;

/// Everything needed to launch the overlay window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub nickname: String,
    /// Raw device selector as typed by the user ("0", "2", "front", ...).
    pub camera: String,
    pub width: u32,
    pub height: u32,
}

/// Look of the nickname label. Built once at startup, never changed.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub text: String,
    /// Pixel multiplier for the 5x7 font (2 => 10x14 glyphs).
    pub font_scale: u32,
    /// Horizontal stroke weight in pixels (1 = thin).
    pub thickness: u32,
    /// Distance of the text origin from the bottom-left corner.
    pub padding: u32,
    /// Extra room the box keeps around the text on every side.
    pub box_margin: u32,
    /// Weight of the box color when mixed with the frame (0.6 => 60% box / 40% frame).
    pub box_opacity: f32,
    pub box_color: [u8; 3],
    pub text_color: [u8; 3],
}

impl OverlayConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_scale: 2,
            thickness: 2,
            padding: 10,
            box_margin: 5,
            box_opacity: 0.6,
            box_color: [0, 0, 0],
            text_color: [255, 255, 255],
        }
    }
}
