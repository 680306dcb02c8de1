// Device frame -> window bitmap.
// The window wants one u32 per pixel packed as 0x00RRGGBB; the device gives
// three bytes per pixel in its own order. No resizing happens here.

use crate::types::{ChannelOrder, DisplayBitmap, FrameBuffer};

/// Repack `frame` for the display surface. Output size equals input size.
pub fn to_display_format(frame: &FrameBuffer) -> DisplayBitmap {
    let [ro, go, bo] = frame.order.offsets();
    let pixels = frame
        .data
        .chunks_exact(3)
        .map(|px| {
            let r = px[ro] as u32;
            let g = px[go] as u32;
            let b = px[bo] as u32;
            (r << 16) | (g << 8) | b
        })
        .collect();

    DisplayBitmap {
        width: frame.width,
        height: frame.height,
        pixels,
    }
}

/// Unpack a window bitmap back into three-byte pixels in `order`.
pub fn from_display_format(bitmap: &DisplayBitmap, order: ChannelOrder) -> FrameBuffer {
    let [ro, go, bo] = order.offsets();
    let mut data = vec![0u8; bitmap.pixels.len() * 3];
    for (px, &word) in data.chunks_exact_mut(3).zip(&bitmap.pixels) {
        px[ro] = ((word >> 16) & 0xFF) as u8;
        px[go] = ((word >> 8) & 0xFF) as u8;
        px[bo] = (word & 0xFF) as u8;
    }

    FrameBuffer {
        width: bitmap.width,
        height: bitmap.height,
        order,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_pixels_are_reordered_to_rgb_words() {
        // Blue then red, stored as B,G,R.
        let frame = FrameBuffer {
            width: 2,
            height: 1,
            order: ChannelOrder::Bgr,
            data: vec![255, 0, 0, 0, 0, 255],
        };
        let bitmap = to_display_format(&frame);
        assert_eq!(bitmap.pixels, vec![0x0000_00FF, 0x00FF_0000]);
    }

    #[test]
    fn rgb_pixels_pack_in_place() {
        let frame = FrameBuffer::filled(3, 2, ChannelOrder::Rgb, [0x12, 0x34, 0x56]);
        let bitmap = to_display_format(&frame);
        assert_eq!((bitmap.width, bitmap.height), (3, 2));
        assert!(bitmap.pixels.iter().all(|&p| p == 0x0012_3456));
    }

    #[test]
    fn inverse_restores_channel_order() {
        let frame = FrameBuffer {
            width: 2,
            height: 2,
            order: ChannelOrder::Bgr,
            data: vec![1, 2, 3, 40, 50, 60, 255, 0, 128, 7, 7, 9],
        };
        let back = from_display_format(&to_display_format(&frame), ChannelOrder::Bgr);
        assert_eq!(back, frame);
    }
}
