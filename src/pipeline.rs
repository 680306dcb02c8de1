// One tick of work: capture -> overlay -> convert -> present.

use crate::camera::CaptureSource;
use crate::config::OverlayConfig;
use crate::convert::to_display_format;
use crate::display::DisplaySurface;
use crate::overlay;

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// A composited frame reached the window.
    Presented,
    /// No frame this time; try again next tick.
    Skipped,
    /// The scheduler is not running; nothing was touched.
    Stopped,
}

/// The capture device, the window and the label, owned together.
pub struct Pipeline<C, S> {
    pub capture: C,
    pub surface: S,
    pub overlay: OverlayConfig,
}

impl<C: CaptureSource, S: DisplaySurface> Pipeline<C, S> {
    pub fn new(capture: C, surface: S, overlay: OverlayConfig) -> Self {
        Self { capture, surface, overlay }
    }

    /// Run the frame path once. A missing frame or a failed present only
    /// costs this tick.
    pub fn process(&mut self) -> Tick {
        let Some(frame) = self.capture.try_read_frame() else {
            return Tick::Skipped;
        };

        let composited = overlay::render(frame, &self.overlay);
        let bitmap = to_display_format(&composited);

        match self.surface.present(&bitmap) {
            Ok(()) => Tick::Presented,
            Err(e) => {
                log::warn!("{e}");
                Tick::Skipped
            }
        }
    }

    /// Release the device and the window. Both calls are idempotent.
    pub fn release(&mut self) {
        self.capture.close();
        self.surface.destroy();
    }
}
