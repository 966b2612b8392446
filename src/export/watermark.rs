//! Diagonal text watermark for sample exports.
//!
//! The text is drawn with a built-in 5×7 bitmap font (A–Z, 0–9, space;
//! lowercase is drawn as uppercase) and tiled across the whole image at −30°.
//!
//! Layout, with `f` the font size in pixels (6% of image width, at least 12):
//!
//! ```text
//! row step     4f
//! column step  text width + 3f
//! odd rows     shifted by half a column step
//! ```
//!
//! Rendering works backwards: every output pixel is rotated into pattern
//! space and tested against the tiled glyph bitmap, so no intermediate
//! text image is allocated.

use image::{Rgba, RgbaImage};

const GLYPH_COLUMNS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Glyph advance in font units: five columns plus one of spacing.
const ADVANCE: f32 = 6.0;
const ANGLE_DEGREES: f32 = -30.0;
const INK: [f32; 3] = [128.0, 128.0, 128.0];
const OPACITY: f32 = 0.3;

type Glyph = [u8; GLYPH_ROWS as usize];

/// Bitmap for `c`, top row first, bit 4 is the leftmost column.
fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        _ => return None,
    };
    Some(rows)
}

/// First character of `text` the bitmap font cannot draw.
pub fn first_undrawable(text: &str) -> Option<char> {
    text.chars().find(|&c| glyph(c).is_none())
}

/// Watermark font size in pixels for an image `width` pixels wide.
pub fn font_size(width: u32) -> u32 {
    ((width as f32 * 0.06).round() as u32).max(12)
}

/// Tile `text` diagonally over `img`.
///
/// Characters the font cannot draw are skipped.
pub fn apply_watermark(img: &mut RgbaImage, text: &str) {
    let glyphs: Vec<Glyph> = text.chars().filter_map(glyph).collect();
    let (width, height) = img.dimensions();
    if glyphs.is_empty() || width == 0 || height == 0 {
        return;
    }

    let font = font_size(width) as f32;
    let unit = font / GLYPH_ROWS as f32;
    let text_width = glyphs.len() as f32 * ADVANCE * unit - unit;
    let row_step = 4.0 * font;
    let col_step = text_width + 3.0 * font;

    // Pattern space is the image rotated by ANGLE; sample it with the inverse.
    let (sin, cos) = (-ANGLE_DEGREES).to_radians().sin_cos();
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let u = dx * cos - dy * sin;
        let v = dx * sin + dy * cos;

        let row = (v / row_step).floor();
        let v_in = v - row * row_step;
        if v_in >= font {
            continue;
        }
        let shift = if row.rem_euclid(2.0) == 1.0 {
            col_step / 2.0
        } else {
            0.0
        };
        let u_in = (u - shift).rem_euclid(col_step);
        if u_in >= text_width {
            continue;
        }

        let cell_x = (u_in / unit) as u32;
        let glyph_index = (cell_x / ADVANCE as u32) as usize;
        let column = cell_x % ADVANCE as u32;
        let glyph_row = ((v_in / unit) as u32).min(GLYPH_ROWS - 1);
        let Some(bits) = glyphs.get(glyph_index) else {
            continue;
        };
        if column < GLYPH_COLUMNS && (bits[glyph_row as usize] >> (GLYPH_COLUMNS - 1 - column)) & 1 == 1 {
            blend(pixel);
        }
    }
}

fn blend(pixel: &mut Rgba<u8>) {
    for (channel, ink) in pixel.0.iter_mut().zip(INK) {
        *channel = (*channel as f32 * (1.0 - OPACITY) + ink * OPACITY).round() as u8;
    }
    let alpha = pixel.0[3] as f32 / 255.0;
    pixel.0[3] = ((OPACITY + alpha * (1.0 - OPACITY)) * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn marked(img: &RgbaImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| **p != WHITE)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    // =========================================================================
    // Font
    // =========================================================================

    #[test]
    fn drawable_text() {
        assert_eq!(first_undrawable("SAMPLE"), None);
        assert_eq!(first_undrawable("sample"), None);
        assert_eq!(first_undrawable("DRAFT 2"), None);
        assert_eq!(first_undrawable("샘플"), Some('샘'));
        assert_eq!(first_undrawable("NO-COPY"), Some('-'));
    }

    #[test]
    fn every_glyph_fits_five_columns() {
        for c in ('A'..='Z').chain('0'..='9') {
            let rows = glyph(c).unwrap();
            assert!(rows.iter().all(|r| *r < 0x20), "{c}");
            assert!(rows.iter().any(|r| *r != 0), "{c} is blank");
        }
    }

    #[test]
    fn font_size_scales_with_width() {
        assert_eq!(font_size(960), 58);
        assert_eq!(font_size(480), 29);
        assert_eq!(font_size(100), 12);
        assert_eq!(font_size(0), 12);
    }

    // =========================================================================
    // Compositing
    // =========================================================================

    #[test]
    fn covers_the_whole_image() {
        let mut img = RgbaImage::from_pixel(480, 960, WHITE);
        apply_watermark(&mut img, "SAMPLE");

        let marked = marked(&img);
        let share = marked.len() as f64 / (480.0 * 960.0);
        assert!(share > 0.01 && share < 0.25, "coverage {share}");

        // tiled, not a single stamp: every quadrant carries some text
        for (qx, qy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(
                marked
                    .iter()
                    .any(|(x, y)| x / 240 == qx && y / 480 == qy),
                "quadrant ({qx}, {qy}) is empty"
            );
        }
    }

    #[test]
    fn marks_are_translucent_gray() {
        let mut img = RgbaImage::from_pixel(200, 200, WHITE);
        apply_watermark(&mut img, "SAMPLE");
        for (x, y) in marked(&img) {
            let p = img.get_pixel(x, y);
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert!(p[0] > 128 && p[0] < 255);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn lowercase_matches_uppercase() {
        let mut upper = RgbaImage::from_pixel(300, 300, WHITE);
        let mut lower = upper.clone();
        apply_watermark(&mut upper, "SAMPLE");
        apply_watermark(&mut lower, "sample");
        assert_eq!(upper, lower);
    }

    #[test]
    fn larger_images_get_larger_text() {
        let mut small = RgbaImage::from_pixel(400, 400, WHITE);
        let mut large = RgbaImage::from_pixel(1600, 1600, WHITE);
        apply_watermark(&mut small, "SAMPLE");
        apply_watermark(&mut large, "SAMPLE");

        // same layout scaled up keeps roughly the same share of marked pixels
        let s = marked(&small).len() as f64 / 160_000.0;
        let l = marked(&large).len() as f64 / 2_560_000.0;
        assert!(l > 0.0 && s > 0.0);
        assert!((s - l).abs() < 0.05, "small {s}, large {l}");
    }

    #[test]
    fn empty_inputs_are_noops() {
        let mut img = RgbaImage::from_pixel(50, 50, WHITE);
        apply_watermark(&mut img, "");
        assert!(marked(&img).is_empty());
        apply_watermark(&mut img, "샘플");
        assert!(marked(&img).is_empty());

        let mut empty = RgbaImage::new(0, 0);
        apply_watermark(&mut empty, "SAMPLE");
    }
}
