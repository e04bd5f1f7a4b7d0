//! Pastel placeholder sprites and backgrounds.
//!
//! Flat, soft-palette stand-in art for the mini-games: gradient
//! backgrounds with blurred-looking blobs, rounded key/tile sprites,
//! note circles, and lettered icon discs.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::error::PipelineError;

use super::{
    ellipse_outline, fill_ellipse, glyph::draw_glyph, linear_gradient, rounded_rect_filled,
    rounded_rect_stroked,
};

const BG_W: u32 = 1080;
const BG_H: u32 = 1920;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const SHADOW: Rgba<u8> = Rgba([0, 0, 0, 35]);

/// A soft background blob: center, radius, fill.
pub struct Blob {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub color: Rgba<u8>,
}

impl Blob {
    pub const fn new(cx: f64, cy: f64, r: f64, color: Rgba<u8>) -> Self {
        Blob { cx, cy, r, color }
    }
}

/// A 1080x1920 vertical gradient with translucent blobs composited over it.
pub fn background(top: Rgba<u8>, bottom: Rgba<u8>, blobs: &[Blob]) -> RgbaImage {
    let mut img = linear_gradient(BG_W, BG_H, top, bottom);
    for blob in blobs {
        fill_ellipse(&mut img, blob.cx, blob.cy, blob.r, blob.r, blob.color);
    }
    img
}

/// A 256x512 piano-key sprite: drop shadow, outlined body, accent band.
pub fn key_sprite(fill: Rgba<u8>, accent: Rgba<u8>) -> RgbaImage {
    let mut img = super::solid(256, 512, CLEAR);
    rounded_rect_filled(&mut img, 18, 18, 238, 498, 36.0, SHADOW);
    rounded_rect_filled(&mut img, 12, 12, 236, 492, 36.0, fill);
    rounded_rect_stroked(&mut img, 12, 12, 236, 492, 36.0, Rgba([255, 255, 255, 180]), 3.0);
    rounded_rect_filled(&mut img, 24, 24, 224, 96, 24.0, accent);
    img
}

/// A 256x256 note circle with shadow and white rim.
pub fn circle_sprite(fill: Rgba<u8>) -> RgbaImage {
    let mut img = super::solid(256, 256, CLEAR);
    fill_ellipse(&mut img, 128.0, 130.0, 116.0, 116.0, SHADOW);
    fill_ellipse(&mut img, 128.0, 128.0, 120.0, 120.0, fill);
    ellipse_outline(&mut img, 128.0, 128.0, 120.0, 120.0, 4.0, Rgba([255, 255, 255, 180]));
    img
}

/// A 256x256 rounded tile with shadow and white rim.
pub fn tile_sprite(base: Rgba<u8>) -> RgbaImage {
    let mut img = super::solid(256, 256, CLEAR);
    rounded_rect_filled(&mut img, 18, 22, 244, 248, 40.0, SHADOW);
    rounded_rect_filled(&mut img, 12, 12, 244, 244, 40.0, base);
    rounded_rect_stroked(&mut img, 12, 12, 244, 244, 40.0, Rgba([255, 255, 255, 160]), 4.0);
    img
}

/// A 256x256 lettered icon: shadowed disc with an initial stamped on it.
pub fn letter_icon(letter: char, fill: Rgba<u8>) -> RgbaImage {
    let mut img = super::solid(256, 256, CLEAR);
    fill_ellipse(&mut img, 128.0, 130.0, 112.0, 112.0, Rgba([0, 0, 0, 30]));
    fill_ellipse(&mut img, 128.0, 128.0, 116.0, 116.0, fill);
    ellipse_outline(&mut img, 128.0, 128.0, 116.0, 116.0, 4.0, Rgba([255, 255, 255, 180]));
    draw_glyph(&mut img, letter, 128, 120, 17, Rgba([40, 40, 60, 255]));
    img
}

fn save(img: &RgbaImage, dir: &Path, name: &str, written: &mut Vec<PathBuf>) -> Result<(), PipelineError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    img.save(&path)?;
    tracing::info!(sprite = name, "wrote pastel asset");
    written.push(path);
    Ok(())
}

/// Render the whole pastel batch under `out_root`, one folder per
/// mini-game, and return the written paths.
pub fn write_batch(out_root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut written = Vec::new();

    // Piano
    let piano = out_root.join("piano");
    save(
        &background(
            Rgba([223, 242, 255, 255]),
            Rgba([255, 245, 253, 255]),
            &[
                Blob::new(220.0, 340.0, 240.0, Rgba([255, 220, 235, 120])),
                Blob::new(880.0, 520.0, 280.0, Rgba([210, 245, 230, 120])),
                Blob::new(540.0, 1480.0, 360.0, Rgba([245, 235, 255, 130])),
            ],
        ),
        &piano,
        "bg_piano_1080x1920.png",
        &mut written,
    )?;
    save(
        &key_sprite(Rgba([252, 252, 255, 255]), Rgba([240, 248, 255, 255])),
        &piano,
        "key_piano_256x512.png",
        &mut written,
    )?;
    for (id, letter, color) in [
        ("komodo", 'K', Rgba([232, 232, 255, 255])),
        ("orangutan", 'O', Rgba([255, 235, 220, 255])),
        ("burung", 'B', Rgba([225, 250, 255, 255])),
        ("paus", 'P', Rgba([225, 240, 255, 255])),
        ("belalang", 'L', Rgba([230, 255, 235, 255])),
    ] {
        save(
            &letter_icon(letter, color),
            &piano,
            &format!("icon_{id}_256.png"),
            &mut written,
        )?;
    }

    // Creative (coloring / finger paint)
    save(
        &background(
            Rgba([255, 245, 230, 255]),
            Rgba([235, 250, 255, 255]),
            &[
                Blob::new(280.0, 420.0, 260.0, Rgba([255, 220, 200, 120])),
                Blob::new(860.0, 360.0, 240.0, Rgba([220, 245, 255, 120])),
                Blob::new(540.0, 1500.0, 380.0, Rgba([230, 255, 235, 120])),
            ],
        ),
        &out_root.join("creative"),
        "bg_creative_1080x1920.png",
        &mut written,
    )?;

    // Rhythm
    let rhythm = out_root.join("rhythm");
    save(
        &background(
            Rgba([240, 230, 255, 255]),
            Rgba([230, 255, 248, 255]),
            &[
                Blob::new(260.0, 520.0, 260.0, Rgba([255, 235, 250, 120])),
                Blob::new(860.0, 540.0, 260.0, Rgba([220, 235, 255, 120])),
                Blob::new(540.0, 1480.0, 420.0, Rgba([255, 250, 220, 120])),
            ],
        ),
        &rhythm,
        "bg_rhythm_1080x1920.png",
        &mut written,
    )?;
    for (i, color) in [
        Rgba([232, 74, 61, 255]),
        Rgba([56, 189, 248, 255]),
        Rgba([251, 191, 36, 255]),
        Rgba([52, 211, 153, 255]),
    ]
    .into_iter()
    .enumerate()
    {
        save(
            &circle_sprite(color),
            &rhythm,
            &format!("circle_{}_256.png", i + 1),
            &mut written,
        )?;
    }

    // Shape match
    let shapes = out_root.join("shape_match");
    save(
        &background(
            Rgba([245, 250, 255, 255]),
            Rgba([255, 245, 235, 255]),
            &[
                Blob::new(220.0, 420.0, 280.0, Rgba([230, 255, 245, 120])),
                Blob::new(900.0, 420.0, 280.0, Rgba([255, 235, 220, 120])),
                Blob::new(540.0, 1500.0, 440.0, Rgba([245, 235, 255, 120])),
            ],
        ),
        &shapes,
        "bg_shape_match_1080x1920.png",
        &mut written,
    )?;
    save(
        &tile_sprite(Rgba([250, 250, 255, 255])),
        &shapes,
        "tile_option_256.png",
        &mut written,
    )?;
    save(
        &tile_sprite(Rgba([235, 240, 250, 255])),
        &shapes,
        "tile_silhouette_512.png",
        &mut written,
    )?;
    for (id, letter) in [
        ("joglo", 'J'),
        ("gadang", 'G'),
        ("tongkonan", 'T'),
        ("kampoeng", 'K'),
        ("komodo", 'K'),
        ("orangutan", 'O'),
        ("burung", 'B'),
        ("paus", 'P'),
    ] {
        save(
            &letter_icon(letter, Rgba([255, 255, 255, 255])),
            &shapes,
            &format!("icon_{id}_256.png"),
            &mut written,
        )?;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn background_is_portrait_gradient() {
        let top = Rgba([10, 20, 30, 255]);
        let bottom = Rgba([200, 210, 220, 255]);
        let img = background(top, bottom, &[]);
        assert_eq!(img.dimensions(), (1080, 1920));
        assert_eq!(*img.get_pixel(0, 0), top);
        assert_eq!(*img.get_pixel(0, 1919), bottom);
    }

    #[test]
    fn blobs_tint_the_gradient() {
        let top = Rgba([0, 0, 0, 255]);
        let plain = background(top, top, &[]);
        let blobbed = background(
            top,
            top,
            &[Blob::new(540.0, 960.0, 200.0, Rgba([255, 255, 255, 120]))],
        );
        assert_ne!(
            plain.get_pixel(540, 960),
            blobbed.get_pixel(540, 960),
            "blob center must be tinted"
        );
        assert_eq!(
            plain.get_pixel(10, 10),
            blobbed.get_pixel(10, 10),
            "far corner untouched"
        );
    }

    #[test]
    fn key_sprite_has_transparent_margin() {
        let img = key_sprite(Rgba([252, 252, 255, 255]), Rgba([240, 248, 255, 255]));
        assert_eq!(img.dimensions(), (256, 512));
        assert_eq!(img.get_pixel(0, 0).0[3], 0, "corner stays transparent");
        assert_eq!(
            *img.get_pixel(128, 256),
            Rgba([252, 252, 255, 255]),
            "body fill"
        );
        assert_eq!(
            *img.get_pixel(128, 60),
            Rgba([240, 248, 255, 255]),
            "accent band"
        );
    }

    #[test]
    fn circle_sprite_center_is_fill() {
        let fill = Rgba([232, 74, 61, 255]);
        let img = circle_sprite(fill);
        assert_eq!(*img.get_pixel(128, 128), fill);
        assert_eq!(img.get_pixel(2, 2).0[3], 0);
    }

    #[test]
    fn letter_icon_carries_text_pixels() {
        let img = letter_icon('K', Rgba([255, 255, 255, 255]));
        let text = Rgba([40, 40, 60, 255]);
        let count = img.pixels().filter(|&&p| p == text).count();
        assert!(count > 100, "expected stamped glyph, got {count} px");
    }

    #[test]
    fn batch_writes_every_asset() {
        let dir = tempdir().expect("tempdir");
        let written = write_batch(dir.path()).expect("batch");

        // 1 bg + 1 key + 5 icons, 1 creative bg, 1 bg + 4 circles,
        // 1 bg + 2 tiles + 8 icons
        assert_eq!(written.len(), 24);
        for path in &written {
            assert!(path.exists(), "missing {}", path.display());
        }
        assert!(dir.path().join("piano/icon_komodo_256.png").exists());
        assert!(dir.path().join("rhythm/circle_4_256.png").exists());
        assert!(dir.path().join("shape_match/tile_option_256.png").exists());
    }
}
