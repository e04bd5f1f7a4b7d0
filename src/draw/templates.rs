//! Coloring-book line-art templates.
//!
//! Each template is fixed geometry drawn in black outline on a white
//! 1200x900 canvas, saved as a PNG for the coloring mini-game.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::error::PipelineError;

use super::{circle_outline, ellipse_outline, polygon_outline, rect_outline, solid};

const CANVAS_W: u32 = 1200;
const CANVAS_H: u32 = 900;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn canvas() -> RgbaImage {
    solid(CANVAS_W, CANVAS_H, WHITE)
}

fn diamond(img: &mut RgbaImage, cx: i64, cy: i64, size: i64, thickness: f64) {
    polygon_outline(
        img,
        &[(cx, cy - size), (cx + size, cy), (cx, cy + size), (cx - size, cy)],
        thickness,
        INK,
    );
}

fn triangle(img: &mut RgbaImage, cx: i64, cy: i64, size: i64, thickness: f64) {
    let base_y = cy + (size as f64 * 0.7) as i64;
    polygon_outline(
        img,
        &[(cx, cy - size), (cx - size, base_y), (cx + size, base_y)],
        thickness,
        INK,
    );
}

/// An 8-petal flower: petal ellipses on a ring plus a center circle.
fn flower(img: &mut RgbaImage, cx: i64, cy: i64, size: i64, thickness: f64) {
    for i in 0..8 {
        let angle = std::f64::consts::TAU * i as f64 / 8.0;
        let px = cx as f64 + angle.cos() * size as f64;
        let py = cy as f64 + angle.sin() * size as f64;
        ellipse_outline(
            img,
            px,
            py,
            (size / 2) as f64,
            (size / 3) as f64,
            thickness,
            INK,
        );
    }
    circle_outline(img, cx as f64, cy as f64, (size / 3) as f64, thickness, INK);
}

/// A small jasmine bloom: six petal circles around a center.
fn jasmine_bloom(img: &mut RgbaImage, cx: i64, cy: i64) {
    for i in 0..6 {
        let angle = std::f64::consts::TAU * i as f64 / 6.0;
        let px = cx as f64 + angle.cos() * 25.0;
        let py = cy as f64 + angle.sin() * 25.0;
        circle_outline(img, px, py, 20.0, 2.0, INK);
    }
    circle_outline(img, cx as f64, cy as f64, 15.0, 2.0, INK);
}

/// Batik pattern: double border, center diamond, corner flowers, and
/// dotted side columns.
pub fn batik() -> RgbaImage {
    let mut img = canvas();

    rect_outline(&mut img, 50, 50, 1100, 800, 5, INK);
    rect_outline(&mut img, 100, 100, 1000, 700, 3, INK);

    diamond(&mut img, 600, 450, 200, 3.0);

    flower(&mut img, 150, 150, 60, 3.0);
    flower(&mut img, 1050, 150, 60, 3.0);
    flower(&mut img, 150, 750, 60, 3.0);
    flower(&mut img, 1050, 750, 60, 3.0);

    for i in 0..3 {
        let y = (250 + i * 200) as f64;
        circle_outline(&mut img, 150.0, y, 30.0, 2.0, INK);
        circle_outline(&mut img, 1050.0, y, 30.0, 2.0, INK);
    }

    img
}

/// Komodo dragon: body and head ellipses, snout, legs, tail, eye, spots.
pub fn komodo() -> RgbaImage {
    let mut img = canvas();

    // body and head
    ellipse_outline(&mut img, 600.0, 500.0, 300.0, 150.0, 4.0, INK);
    ellipse_outline(&mut img, 850.0, 450.0, 100.0, 80.0, 4.0, INK);

    // snout
    rect_outline(&mut img, 930, 440, 150, 40, 4, INK);

    // legs
    for &x in &[450.0, 550.0, 700.0, 800.0] {
        ellipse_outline(&mut img, x, 600.0, 60.0, 100.0, 4.0, INK);
    }

    // tail
    rect_outline(&mut img, 300, 480, 250, 40, 4, INK);

    // eye
    circle_outline(&mut img, 880.0, 430.0, 15.0, 3.0, INK);

    // spots along the body
    for i in 0..5 {
        let x = (400 + i * 80) as f64;
        circle_outline(&mut img, x, 500.0, 20.0, 2.0, INK);
    }

    img
}

/// Orchid: stem, side leaves, five petals and a double center.
pub fn anggrek() -> RgbaImage {
    let mut img = canvas();

    // stem
    rect_outline(&mut img, 590, 700, 20, 200, 3, INK);

    // leaves
    ellipse_outline(&mut img, 500.0, 750.0, 120.0, 50.0, 3.0, INK);
    ellipse_outline(&mut img, 700.0, 750.0, 120.0, 50.0, 3.0, INK);

    // petals
    ellipse_outline(&mut img, 600.0, 400.0, 80.0, 150.0, 3.0, INK);
    ellipse_outline(&mut img, 500.0, 450.0, 80.0, 120.0, 3.0, INK);
    ellipse_outline(&mut img, 700.0, 450.0, 80.0, 120.0, 3.0, INK);
    ellipse_outline(&mut img, 550.0, 300.0, 60.0, 100.0, 3.0, INK);
    ellipse_outline(&mut img, 650.0, 300.0, 60.0, 100.0, 3.0, INK);

    // center
    circle_outline(&mut img, 600.0, 450.0, 40.0, 3.0, INK);
    circle_outline(&mut img, 600.0, 450.0, 15.0, 2.0, INK);

    img
}

/// Joglo house: tiered pyramid roof over a pillared base.
pub fn joglo() -> RgbaImage {
    let mut img = canvas();

    // roof tiers
    triangle(&mut img, 600, 200, 350, 4.0);
    triangle(&mut img, 600, 300, 400, 4.0);

    // base
    rect_outline(&mut img, 200, 450, 800, 350, 4, INK);

    // door and windows
    rect_outline(&mut img, 550, 550, 100, 250, 3, INK);
    rect_outline(&mut img, 300, 500, 80, 80, 3, INK);
    rect_outline(&mut img, 820, 500, 80, 80, 3, INK);

    // trim bands
    rect_outline(&mut img, 250, 450, 700, 20, 3, INK);
    rect_outline(&mut img, 300, 500, 600, 20, 2, INK);

    // pillars
    rect_outline(&mut img, 300, 500, 30, 300, 3, INK);
    rect_outline(&mut img, 870, 500, 30, 300, 3, INK);

    img
}

/// Jasmine arrangement: stem, leaves, and a cluster of small blooms.
pub fn melati() -> RgbaImage {
    let mut img = canvas();

    // stem
    rect_outline(&mut img, 590, 600, 20, 300, 3, INK);

    // leaves
    ellipse_outline(&mut img, 480.0, 650.0, 100.0, 40.0, 3.0, INK);
    ellipse_outline(&mut img, 720.0, 700.0, 100.0, 40.0, 3.0, INK);
    ellipse_outline(&mut img, 520.0, 750.0, 90.0, 35.0, 3.0, INK);

    // bloom cluster
    jasmine_bloom(&mut img, 600, 400);
    jasmine_bloom(&mut img, 520, 480);
    jasmine_bloom(&mut img, 680, 450);

    img
}

/// Render every template into `out_dir`, creating it if needed.
pub fn write_all(out_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    fs::create_dir_all(out_dir)?;

    let set: [(&str, fn() -> RgbaImage); 5] = [
        ("batik.png", batik),
        ("komodo.png", komodo),
        ("anggrek.png", anggrek),
        ("joglo.png", joglo),
        ("melati.png", melati),
    ];

    let mut written = Vec::with_capacity(set.len());
    for (name, build) in set {
        let path = out_dir.join(name);
        build().save(&path)?;
        tracing::info!(template = name, "wrote coloring template");
        written.push(path);
    }
    Ok(written)
}
