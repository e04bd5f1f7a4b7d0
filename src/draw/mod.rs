//! Hand-rolled raster drawing over `image` buffers.
//!
//! Shapes are rasterized per pixel with simple inside/outside tests.
//! These run offline in batch generators, so clarity wins over speed.

pub mod glyph;
pub mod pastel;
pub mod templates;

use image::{Pixel, Rgba, RgbaImage};

/// Src-over blend `color` onto (x, y). Out-of-bounds pixels are ignored.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return;
    }
    img.get_pixel_mut(x as u32, y as u32).blend(&color);
}

/// A solid canvas.
pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Per-channel linear interpolation between two colors.
fn lerp_color(a: Rgba<u8>, b: Rgba<u8>, t: f64) -> Rgba<u8> {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = (f64::from(a.0[i]) * (1.0 - t) + f64::from(b.0[i]) * t) as u8;
    }
    Rgba(out)
}

/// A vertical linear gradient from `top` to `bottom`.
pub fn linear_gradient(width: u32, height: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let span = height.saturating_sub(1).max(1);
    for y in 0..height {
        let c = lerp_color(top, bottom, f64::from(y) / f64::from(span));
        for x in 0..width {
            img.put_pixel(x, y, c);
        }
    }
    img
}

fn inside_ellipse(px: f64, py: f64, cx: f64, cy: f64, rx: f64, ry: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (px - cx) / rx;
    let ny = (py - cy) / ry;
    nx * nx + ny * ny <= 1.0
}

/// A filled, alpha-blended ellipse.
pub fn fill_ellipse(img: &mut RgbaImage, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba<u8>) {
    let (x0, x1) = ((cx - rx).floor() as i64, (cx + rx).ceil() as i64);
    let (y0, y1) = ((cy - ry).floor() as i64, (cy + ry).ceil() as i64);
    for py in y0..=y1 {
        for px in x0..=x1 {
            if inside_ellipse(px as f64, py as f64, cx, cy, rx, ry) {
                blend_pixel(img, px, py, color);
            }
        }
    }
}

/// An ellipse outline: a ring `thickness` pixels deep, drawn inward from
/// the outer radii.
pub fn ellipse_outline(
    img: &mut RgbaImage,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    thickness: f64,
    color: Rgba<u8>,
) {
    let irx = (rx - thickness).max(0.0);
    let iry = (ry - thickness).max(0.0);
    let (x0, x1) = ((cx - rx).floor() as i64, (cx + rx).ceil() as i64);
    let (y0, y1) = ((cy - ry).floor() as i64, (cy + ry).ceil() as i64);
    for py in y0..=y1 {
        for px in x0..=x1 {
            let (fx, fy) = (px as f64, py as f64);
            if inside_ellipse(fx, fy, cx, cy, rx, ry)
                && !inside_ellipse(fx, fy, cx, cy, irx, iry)
            {
                blend_pixel(img, px, py, color);
            }
        }
    }
}

/// A circle outline (equal radii ellipse ring).
pub fn circle_outline(
    img: &mut RgbaImage,
    cx: f64,
    cy: f64,
    radius: f64,
    thickness: f64,
    color: Rgba<u8>,
) {
    ellipse_outline(img, cx, cy, radius, radius, thickness, color);
}

/// A rectangle outline. The band runs `thickness` pixels inward from the
/// inclusive bounds `[x, x+w] x [y, y+h]`.
pub fn rect_outline(
    img: &mut RgbaImage,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    thickness: i64,
    color: Rgba<u8>,
) {
    for py in y..=y + h {
        for px in x..=x + w {
            let band = px - x < thickness
                || (x + w) - px < thickness
                || py - y < thickness
                || (y + h) - py < thickness;
            if band {
                blend_pixel(img, px, py, color);
            }
        }
    }
}

/// Distance from point `p` to the segment `a`..`b`.
fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt()
}

/// A stroked line segment of the given thickness.
pub fn line_thick(
    img: &mut RgbaImage,
    a: (i64, i64),
    b: (i64, i64),
    thickness: f64,
    color: Rgba<u8>,
) {
    let half = thickness / 2.0;
    let pad = half.ceil() as i64 + 1;
    let (x0, x1) = (a.0.min(b.0) - pad, a.0.max(b.0) + pad);
    let (y0, y1) = (a.1.min(b.1) - pad, a.1.max(b.1) + pad);
    let fa = (a.0 as f64, a.1 as f64);
    let fb = (b.0 as f64, b.1 as f64);
    for py in y0..=y1 {
        for px in x0..=x1 {
            if segment_distance((px as f64, py as f64), fa, fb) <= half {
                blend_pixel(img, px, py, color);
            }
        }
    }
}

/// A closed polygon outline stroked with `line_thick`.
pub fn polygon_outline(img: &mut RgbaImage, points: &[(i64, i64)], thickness: f64, color: Rgba<u8>) {
    if points.len() < 2 {
        return;
    }
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        line_thick(img, a, b, thickness, color);
    }
}

/// Rounded-rectangle inside test over the inclusive box `[x0, x1] x [y0, y1]`,
/// optionally shrunk inward by `inset`.
fn inside_rounded(
    px: f64,
    py: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    radius: f64,
    inset: f64,
) -> bool {
    let (x0, y0) = (x0 + inset, y0 + inset);
    let (x1, y1) = (x1 - inset, y1 - inset);
    if px < x0 || px > x1 || py < y0 || py > y1 {
        return false;
    }
    let r = (radius - inset).max(0.0).min((x1 - x0) / 2.0).min((y1 - y0) / 2.0);
    // Nearest point of the radius-inset core rectangle
    let cx = px.clamp(x0 + r, x1 - r);
    let cy = py.clamp(y0 + r, y1 - r);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

/// A filled rounded rectangle over the inclusive box `[x0, x1] x [y0, y1]`.
pub fn rounded_rect_filled(
    img: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    radius: f64,
    fill: Rgba<u8>,
) {
    for py in y0..=y1 {
        for px in x0..=x1 {
            if inside_rounded(
                px as f64, py as f64, x0 as f64, y0 as f64, x1 as f64, y1 as f64, radius, 0.0,
            ) {
                blend_pixel(img, px, py, fill);
            }
        }
    }
}

/// A rounded-rectangle border stroked `width` pixels inward.
pub fn rounded_rect_stroked(
    img: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    radius: f64,
    outline: Rgba<u8>,
    width: f64,
) {
    for py in y0..=y1 {
        for px in x0..=x1 {
            let (fx, fy) = (px as f64, py as f64);
            let (bx0, by0, bx1, by1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
            if inside_rounded(fx, fy, bx0, by0, bx1, by1, radius, 0.0)
                && !inside_rounded(fx, fy, bx0, by0, bx1, by1, radius, width)
            {
                blend_pixel(img, px, py, outline);
            }
        }
    }
}
