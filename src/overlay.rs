// Nickname label compositing.
// Visual: a dark translucent box in the bottom-left corner with white text on it.

use crate::config::OverlayConfig;
use crate::font::{draw_text, text_size, TextSize};
use crate::types::FrameBuffer;

/// Inclusive pixel rectangle of the label box. May reach outside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// Where the label box lands for a frame of `frame_height` rows.
/// Depends only on text metrics and the config, never on pixel content.
pub fn label_box(frame_height: usize, text: TextSize, config: &OverlayConfig) -> LabelBox {
    let (x, y) = text_origin(frame_height, config);
    let m = config.box_margin as i64;
    LabelBox {
        left: x - m,
        top: y - text.height as i64 - m,
        right: x + text.width as i64 + m,
        bottom: y + text.baseline as i64 + m,
    }
}

/// Baseline-left origin of the text: `padding` in from the bottom-left corner.
fn text_origin(frame_height: usize, config: &OverlayConfig) -> (i64, i64) {
    let p = config.padding as i64;
    (p, frame_height as i64 - p)
}

/// Composite the label onto `frame` and hand it back. Same size in, same size out.
pub fn render(mut frame: FrameBuffer, config: &OverlayConfig) -> FrameBuffer {
    let size = text_size(&config.text, config.font_scale, config.thickness);
    let rect = label_box(frame.height, size, config);

    // 1) Translucent box. Only the part inside the frame is touched.
    let x0 = rect.left.max(0);
    let y0 = rect.top.max(0);
    let x1 = rect.right.min(frame.width as i64 - 1);
    let y1 = rect.bottom.min(frame.height as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            frame.blend_rgb(x, y, config.box_color, config.box_opacity);
        }
    }

    // 2) Text on top.
    let (tx, ty) = text_origin(frame.height, config);
    draw_text(
        &mut frame,
        tx,
        ty,
        &config.text,
        config.font_scale,
        config.thickness,
        config.text_color,
    );

    frame
}
