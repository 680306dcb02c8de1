// Core pixel types shared by the capture, overlay, convert and display steps.

use image::RgbImage;

/// Order of the three bytes of a pixel as the device delivers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Byte offsets of (R, G, B) inside one pixel triple.
    #[inline]
    pub fn offsets(self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }
}

/// One camera frame: height x width x 3 bytes, row-major, device-native order.
/// Produced fresh every tick and dropped after it is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub order: ChannelOrder,
    pub data: Vec<u8>, // length = width * height * 3
}

impl FrameBuffer {
    /// A frame where every pixel is the same `rgb` color.
    pub fn filled(width: usize, height: usize, order: ChannelOrder, rgb: [u8; 3]) -> Self {
        let [ro, go, bo] = order.offsets();
        let mut px = [0u8; 3];
        px[ro] = rgb[0];
        px[go] = rgb[1];
        px[bo] = rgb[2];

        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&px);
        }
        Self { width, height, order, data }
    }

    /// Wrap a decoded camera image without copying.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (w, h) = img.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            order: ChannelOrder::Rgb,
            data: img.into_raw(),
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 3
    }

    /// Read the pixel at (x, y) as [R, G, B], whatever the storage order.
    /// Panics when (x, y) is out of bounds.
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = self.index(x, y);
        let [ro, go, bo] = self.order.offsets();
        [self.data[i + ro], self.data[i + go], self.data[i + bo]]
    }

    /// Mix `rgb` into the pixel at (x, y) with weight `alpha` in [0, 1].
    /// Coordinates outside the frame are ignored (clipped).
    pub fn blend_rgb(&mut self, x: i64, y: i64, rgb: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let i = self.index(x, y);
        let a = alpha.clamp(0.0, 1.0);
        for (c, off) in self.order.offsets().into_iter().enumerate() {
            let old = self.data[i + off] as f32;
            let new = rgb[c] as f32 * a + old * (1.0 - a);
            self.data[i + off] = new.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// What the window actually shows: one 0x00RRGGBB word per pixel (minifb layout).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}
