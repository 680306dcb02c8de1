// The window the presenter sees: borderless, always on top, draggable.
// Input is polled once per loop iteration; Escape / Q or closing the window
// asks the app to shut down, a left-button drag moves the window.

use crate::error::Error;
use crate::screen::{centered_origin, primary_screen};
use crate::types::DisplayBitmap;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

/// How the window should be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub borderless: bool,
    pub always_on_top: bool,
    pub centered: bool,
}

impl SurfaceSpec {
    /// The overlay window for `nickname`: no decorations, on top, centered.
    pub fn overlay(nickname: &str, width: u32, height: u32) -> Self {
        Self {
            title: format!("BattleCam2 - {nickname}"),
            width,
            height,
            borderless: true,
            always_on_top: true,
            centered: true,
        }
    }
}

/// What the user asked for since the last poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceInput {
    Continue,
    Shutdown,
}

/// A window that can show bitmaps and report user input.
pub trait DisplaySurface {
    /// Replace what the window shows.
    fn present(&mut self, bitmap: &DisplayBitmap) -> Result<(), Error>;

    /// Process pending input (drag, keys, close button).
    fn pump_events(&mut self) -> SurfaceInput;

    /// Tear the window down. Calling it again does nothing.
    fn destroy(&mut self);
}

/// Keys that close the window. minifb reports Q for both q and Q.
pub const QUIT_KEYS: [Key; 2] = [Key::Escape, Key::Q];

/// Can this backend key out a transparent color on the window?
/// minifb cannot (its per-pixel transparency is a different feature and does
/// nothing on macOS), so the color key is always skipped.
pub fn supports_transparent_color_key() -> bool {
    false
}

/// minifb options for `spec`. Transparency stays off: frames carry no alpha.
pub fn window_options(spec: &SurfaceSpec) -> WindowOptions {
    WindowOptions {
        borderless: spec.borderless,
        title: !spec.borderless,
        topmost: spec.always_on_top,
        resize: false,
        transparency: false,
        ..WindowOptions::default()
    }
}

/// Window position and size plus the drag anchor.
/// Only the surface mutates it, in response to pointer input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowState {
    pub x: isize,
    pub y: isize,
    pub width: u32,
    pub height: u32,
    drag_start: Option<(isize, isize)>,
}

impl WindowState {
    pub fn new(x: isize, y: isize, width: u32, height: u32) -> Self {
        Self { x, y, width, height, drag_start: None }
    }

    /// Remember where (window-local) the button went down.
    pub fn begin_drag(&mut self, local: (isize, isize)) {
        self.drag_start = Some(local);
    }

    /// Move so the grabbed point stays under the pointer.
    /// Returns the new origin, or `None` when no drag is active or nothing moved.
    pub fn drag_to(&mut self, local: (isize, isize)) -> Option<(isize, isize)> {
        let (sx, sy) = self.drag_start?;
        let (dx, dy) = (local.0 - sx, local.1 - sy);
        if dx == 0 && dy == 0 {
            return None;
        }
        self.x += dx;
        self.y += dy;
        Some((self.x, self.y))
    }

    pub fn end_drag(&mut self) {
        self.drag_start = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }
}

pub struct MinifbSurface {
    window: Option<Window>, // None once destroyed
    state: WindowState,
    presented_since_poll: bool,
}

impl MinifbSurface {
    /// Create the window; centers it on the primary display when asked.
    pub fn create(spec: &SurfaceSpec) -> Result<Self, Error> {
        let (w, h) = (spec.width as usize, spec.height as usize);

        // Transparency is cosmetic: without backend support it is skipped.
        if spec.borderless && !supports_transparent_color_key() {
            log::debug!("transparent color key not supported by minifb, skipping");
        }

        let mut window = Window::new(&spec.title, w, h, window_options(spec))
            .map_err(|e| Error::WindowInit(e.to_string()))?;

        if spec.centered {
            match primary_screen() {
                Some(area) => {
                    let (x, y) = centered_origin(area, spec.width, spec.height);
                    window.set_position(x, y);
                }
                None => log::warn!("Primary display unknown, leaving window where it opened"),
            }
        }

        let (x, y) = window.get_position();
        Ok(Self {
            window: Some(window),
            state: WindowState::new(x, y, spec.width, spec.height),
            presented_since_poll: false,
        })
    }
}

impl DisplaySurface for MinifbSurface {
    fn present(&mut self, bitmap: &DisplayBitmap) -> Result<(), Error> {
        let window = self
            .window
            .as_mut()
            .ok_or_else(|| Error::WindowUpdate("window destroyed".into()))?;
        window
            .update_with_buffer(&bitmap.pixels, bitmap.width, bitmap.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        self.presented_since_poll = true;
        Ok(())
    }

    fn pump_events(&mut self) -> SurfaceInput {
        let Some(window) = self.window.as_mut() else {
            return SurfaceInput::Shutdown;
        };

        // minifb only refreshes input state on update; do one if no frame did.
        if !std::mem::take(&mut self.presented_since_poll) {
            window.update();
        }

        if !window.is_open() || QUIT_KEYS.iter().any(|&k| window.is_key_down(k)) {
            return SurfaceInput::Shutdown;
        }

        let pointer = window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| (x as isize, y as isize));

        match (window.get_mouse_down(MouseButton::Left), pointer) {
            (true, Some(local)) if !self.state.is_dragging() => self.state.begin_drag(local),
            (true, Some(local)) => {
                if let Some((x, y)) = self.state.drag_to(local) {
                    window.set_position(x, y);
                }
            }
            (false, _) => self.state.end_drag(),
            (true, None) => {}
        }

        SurfaceInput::Continue
    }

    fn destroy(&mut self) {
        if self.window.take().is_some() {
            log::info!("window closed");
        }
    }
}
