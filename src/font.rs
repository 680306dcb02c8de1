// Tiny 5x7 bitmap font for the nickname label.
// Each glyph has 7 rows above the baseline and 2 descender rows below it
// (only g, j, p, q, y and a few punctuation marks use those).
// Text is scaled by an integer factor and thickened horizontally.

use crate::types::FrameBuffer;

const GLYPH_W: u32 = 5;
const GLYPH_ADVANCE: u32 = 6; // 5 pixels glyph width + 1 pixel spacing
const CAP_ROWS: u32 = 7;
const DESC_ROWS: u32 = 2;

/// Coverage given to pixels that touch a stroke but are not part of it.
const EDGE_COVERAGE: f32 = 0.35;

/// Size of a rendered string, measured like a text baseline layout:
/// `height` rises above the baseline, `baseline` hangs below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
    pub baseline: u32,
}

/// Measure `text` at the given scale and stroke thickness.
pub fn text_size(text: &str, scale: u32, thickness: u32) -> TextSize {
    let scale = scale.max(1);
    let n = text.chars().count() as u32;
    let width = if n == 0 {
        0
    } else {
        (n * GLYPH_ADVANCE - 1) * scale + thickness.max(1) - 1
    };
    TextSize {
        width,
        height: CAP_ROWS * scale,
        baseline: DESC_ROWS * scale,
    }
}

/// Return the glyph rows for `ch`; characters we don't have render as '?'.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph(ch: char) -> [u8; 9] {
    // 7 rows above the baseline, no descender
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        [$a,$b,$c,$d,$e,$f,$g,0,0]
    }; }
    // 7 rows + 2 descender rows
    macro_rules! d { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr,$h:expr,$i:expr) => {
        [$a,$b,$c,$d,$e,$f,$g,$h,$i]
    }; }

    match ch {
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '"' => g!(0b01010,0b01010,0b01010,0b00000,0b00000,0b00000,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '$' => g!(0b00100,0b01111,0b10100,0b01110,0b00101,0b11110,0b00100),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '*' => g!(0b00000,0b00100,0b10101,0b01110,0b10101,0b00100,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        ',' => d!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00100),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),

        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        ':' => g!(0b00000,0b00000,0b00100,0b00000,0b00000,0b00100,0b00000),
        ';' => d!(0b00000,0b00000,0b00100,0b00000,0b00000,0b00100,0b00100,0b01000,0b00000),
        '<' => g!(0b00010,0b00100,0b01000,0b10000,0b01000,0b00100,0b00010),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '@' => g!(0b01110,0b10001,0b00001,0b01101,0b10101,0b10101,0b01110),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        '\\' => g!(0b00000,0b10000,0b01000,0b00100,0b00010,0b00001,0b00000),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),
        '^' => g!(0b00100,0b01010,0b10001,0b00000,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '`' => g!(0b01000,0b00100,0b00010,0b00000,0b00000,0b00000,0b00000),

        'a' => g!(0b00000,0b00000,0b01110,0b00001,0b01111,0b10001,0b01111),
        'b' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b11110),
        'c' => g!(0b00000,0b00000,0b01110,0b10000,0b10000,0b10001,0b01110),
        'd' => g!(0b00001,0b00001,0b01101,0b10011,0b10001,0b10001,0b01111),
        'e' => g!(0b00000,0b00000,0b01110,0b10001,0b11111,0b10000,0b01110),
        'f' => g!(0b00110,0b01001,0b01000,0b11100,0b01000,0b01000,0b01000),
        'g' => d!(0b00000,0b00000,0b01111,0b10001,0b10001,0b10001,0b01111,0b00001,0b01110),
        'h' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b10001),
        'i' => g!(0b00100,0b00000,0b01100,0b00100,0b00100,0b00100,0b01110),
        'j' => d!(0b00010,0b00000,0b00110,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'k' => g!(0b10000,0b10000,0b10010,0b10100,0b11000,0b10100,0b10010),
        'l' => g!(0b01100,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'm' => g!(0b00000,0b00000,0b11010,0b10101,0b10101,0b10001,0b10001),
        'n' => g!(0b00000,0b00000,0b10110,0b11001,0b10001,0b10001,0b10001),
        'o' => g!(0b00000,0b00000,0b01110,0b10001,0b10001,0b10001,0b01110),
        'p' => d!(0b00000,0b00000,0b11110,0b10001,0b10001,0b10001,0b11110,0b10000,0b10000),
        'q' => d!(0b00000,0b00000,0b01111,0b10001,0b10001,0b10001,0b01111,0b00001,0b00001),
        'r' => g!(0b00000,0b00000,0b10110,0b11001,0b10000,0b10000,0b10000),
        's' => g!(0b00000,0b00000,0b01111,0b10000,0b01110,0b00001,0b11110),
        't' => g!(0b01000,0b01000,0b11100,0b01000,0b01000,0b01001,0b00110),
        'u' => g!(0b00000,0b00000,0b10001,0b10001,0b10001,0b10011,0b01101),
        'v' => g!(0b00000,0b00000,0b10001,0b10001,0b10001,0b01010,0b00100),
        'w' => g!(0b00000,0b00000,0b10001,0b10001,0b10101,0b10101,0b01010),
        'x' => g!(0b00000,0b00000,0b10001,0b01010,0b00100,0b01010,0b10001),
        'y' => d!(0b00000,0b00000,0b10001,0b10001,0b10001,0b10001,0b01111,0b00001,0b01110),
        'z' => g!(0b00000,0b00000,0b11111,0b00010,0b00100,0b01000,0b11111),

        '{' => g!(0b00010,0b00100,0b00100,0b01000,0b00100,0b00100,0b00010),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        '}' => g!(0b01000,0b00100,0b00100,0b00010,0b00100,0b00100,0b01000),
        '~' => g!(0b00000,0b00000,0b01000,0b10101,0b00010,0b00000,0b00000),

        _ => glyph('?'),
    }
}

/// Rasterize `text` into a stroke mask with a 1-pixel empty border.
/// Returns (mask, mask_width, mask_height); cells are true where ink lands.
fn rasterize(text: &str, scale: u32, thickness: u32) -> (Vec<bool>, usize, usize) {
    let scale = scale.max(1) as usize;
    let bold = thickness.max(1) as usize - 1;
    let size = text_size(text, scale as u32, thickness);

    let mw = size.width as usize + 2;
    let mh = (size.height + size.baseline) as usize + 2;
    let mut mask = vec![false; mw * mh];

    for (i, ch) in text.chars().enumerate() {
        let left = 1 + i * GLYPH_ADVANCE as usize * scale;
        for (ry, rowbits) in glyph(ch).iter().enumerate() {
            for rx in 0..GLYPH_W as usize {
                if (rowbits & (1 << (4 - rx))) == 0 {
                    continue;
                }
                // Each font pixel becomes a (scale + bold) x scale block.
                for dy in 0..scale {
                    let my = 1 + ry * scale + dy;
                    for dx in 0..scale + bold {
                        let mx = left + rx * scale + dx;
                        mask[my * mw + mx] = true;
                    }
                }
            }
        }
    }

    (mask, mw, mh)
}

/// Draw `text` with its baseline-left origin at (x, y), anti-aliased edges.
/// Pixels falling outside the frame are clipped.
pub fn draw_text(
    fb: &mut FrameBuffer,
    x: i64,
    y: i64,
    text: &str,
    scale: u32,
    thickness: u32,
    color: [u8; 3],
) {
    let size = text_size(text, scale, thickness);
    let (mask, mw, mh) = rasterize(text, scale, thickness);

    // Mask cell (0, 0) sits one pixel above-left of the glyph box.
    let ox = x - 1;
    let oy = y - size.height as i64 - 1;

    for my in 0..mh {
        for mx in 0..mw {
            let coverage = if mask[my * mw + mx] {
                1.0
            } else if touches_stroke(&mask, mw, mh, mx, my) {
                EDGE_COVERAGE
            } else {
                continue;
            };
            fb.blend_rgb(ox + mx as i64, oy + my as i64, color, coverage);
        }
    }
}

/// True when a 4-neighbour of (x, y) is ink.
fn touches_stroke(mask: &[bool], w: usize, h: usize, x: usize, y: usize) -> bool {
    (x > 0 && mask[y * w + x - 1])
        || (x + 1 < w && mask[y * w + x + 1])
        || (y > 0 && mask[(y - 1) * w + x])
        || (y + 1 < h && mask[(y + 1) * w + x])
}
