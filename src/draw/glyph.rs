//! Tiny embedded 5x7 bitmap face for icon lettering.
//!
//! The sprite generators only stamp single uppercase initials, so a full
//! font stack is overkill; each glyph cell is scaled up into square
//! blocks instead.

use image::{Rgba, RgbaImage};

use super::blend_pixel;

const GLYPH_COLS: i64 = 5;
const GLYPH_ROWS: i64 = 7;

/// Row bitmaps for an uppercase glyph, bit 4 = leftmost column.
fn rows(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    };
    Some(rows)
}

/// Stamp `ch` centered on (cx, cy), each font cell drawn as a
/// `scale` x `scale` block. Unknown characters draw nothing.
pub fn draw_glyph(img: &mut RgbaImage, ch: char, cx: i64, cy: i64, scale: i64, color: Rgba<u8>) {
    let Some(rows) = rows(ch) else {
        return;
    };
    let x0 = cx - GLYPH_COLS * scale / 2;
    let y0 = cy - GLYPH_ROWS * scale / 2;
    for (ry, row) in rows.iter().enumerate() {
        for rx in 0..GLYPH_COLS {
            if row & (1 << (GLYPH_COLS - 1 - rx)) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    blend_pixel(img, x0 + rx * scale + dx, y0 + ry as i64 * scale + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::solid;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn ink_count(img: &RgbaImage) -> usize {
        img.pixels().filter(|&&p| p == INK).count()
    }

    #[test]
    fn known_letter_paints_blocks() {
        let mut img = solid(64, 64, WHITE);
        draw_glyph(&mut img, 'K', 32, 32, 4, INK);
        // K has 14 set cells; each cell is a 4x4 block
        assert_eq!(ink_count(&img), 14 * 16);
    }

    #[test]
    fn lowercase_maps_to_uppercase() {
        let mut a = solid(64, 64, WHITE);
        let mut b = solid(64, 64, WHITE);
        draw_glyph(&mut a, 'o', 32, 32, 4, INK);
        draw_glyph(&mut b, 'O', 32, 32, 4, INK);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn unknown_char_draws_nothing() {
        let mut img = solid(64, 64, WHITE);
        draw_glyph(&mut img, '?', 32, 32, 4, INK);
        assert_eq!(ink_count(&img), 0);
    }

    #[test]
    fn glyph_is_centered() {
        let mut img = solid(100, 100, WHITE);
        draw_glyph(&mut img, 'T', 50, 50, 4, INK);
        // 5x7 cells at scale 4 -> 20x28 box anchored at (40, 36)
        assert_eq!(*img.get_pixel(40, 36), INK, "top-left of the T bar");
        assert_eq!(*img.get_pixel(59, 36), INK, "top-right of the T bar");
        assert_eq!(*img.get_pixel(50, 60), INK, "bottom of the stem");
        assert_eq!(*img.get_pixel(40, 60), WHITE);
    }
}
