// Primary display geometry, used once at startup to center the window.

use xcap::Monitor;

/// Desktop rectangle of one monitor, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The primary monitor (or the first one when none is flagged primary).
pub fn primary_screen() -> Option<ScreenArea> {
    let monitors = match Monitor::all() {
        Ok(m) => m,
        Err(e) => {
            log::warn!("Could not enumerate monitors: {e}");
            return None;
        }
    };

    let monitor = monitors
        .iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())?;

    Some(ScreenArea {
        x: monitor.x().unwrap_or(0),
        y: monitor.y().unwrap_or(0),
        width: monitor.width().ok()?,
        height: monitor.height().ok()?,
    })
}

/// Top-left corner that puts a `width` x `height` window in the middle of `area`.
/// Goes negative (relative to the area) when the window is larger than the screen.
pub fn centered_origin(area: ScreenArea, width: u32, height: u32) -> (isize, isize) {
    let x = area.x as isize + (area.width as isize - width as isize) / 2;
    let y = area.y as isize + (area.height as isize - height as isize) / 2;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_on_primary_display() {
        let area = ScreenArea { x: 0, y: 0, width: 1920, height: 1080 };
        assert_eq!(centered_origin(area, 320, 240), (800, 420));
    }

    #[test]
    fn respects_display_offset() {
        let area = ScreenArea { x: -1280, y: 100, width: 1280, height: 1024 };
        assert_eq!(centered_origin(area, 640, 480), (-960, 372));
    }

    #[test]
    fn oversized_window_overhangs_both_edges() {
        let area = ScreenArea { x: 0, y: 0, width: 800, height: 600 };
        assert_eq!(centered_origin(area, 1000, 700), (-100, -50));
    }
}
