//! Sobel edge detection and edge-directed refinement (§4.J balanced tier).

use crate::compositor::blend::Image;
use crate::foundation::math::luminance;

/// Per-pixel edge information.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMap {
    pub width: u32,
    pub height: u32,
    /// Gradient magnitude, clamped to `[0,1]`.
    pub magnitude: Vec<f64>,
    /// Normalized gradient angle (radians / TAU, in `[0,1]`).
    pub angle: Vec<f64>,
    /// Horizontal gradient, bias 0.5.
    pub gx: Vec<f64>,
    /// Vertical gradient, bias 0.5.
    pub gy: Vec<f64>,
}

const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

fn luma_at(img: &Image, x: i64, y: i64) -> f64 {
    let cx = x.clamp(0, img.width as i64 - 1) as u32;
    let cy = y.clamp(0, img.height as i64 - 1) as u32;
    let px = img.pixels[(cy * img.width + cx) as usize];
    luminance(f64::from(px[0]) / 255.0, f64::from(px[1]) / 255.0, f64::from(px[2]) / 255.0)
}

/// Run a 3x3 Sobel operator over `img`'s luminance.
pub fn sobel_edges(img: &Image) -> EdgeMap {
    let (w, h) = (img.width, img.height);
    let mut magnitude = vec![0.0; (w * h) as usize];
    let mut angle = vec![0.0; (w * h) as usize];
    let mut gx_out = vec![0.0; (w * h) as usize];
    let mut gy_out = vec![0.0; (w * h) as usize];

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for (j, row) in (-1..=1).zip(SOBEL_X.iter()) {
                for (i, kx) in (-1..=1).zip(row.iter()) {
                    let l = luma_at(img, x + i, y + j);
                    gx += kx * l;
                }
            }
            for (j, row) in (-1..=1).zip(SOBEL_Y.iter()) {
                for (i, ky) in (-1..=1).zip(row.iter()) {
                    let l = luma_at(img, x + i, y + j);
                    gy += ky * l;
                }
            }
            let idx = (y as u32 * w + x as u32) as usize;
            let mag = (gx * gx + gy * gy).sqrt();
            magnitude[idx] = mag.clamp(0.0, 1.0);
            angle[idx] = (gy.atan2(gx) / std::f64::consts::TAU + 1.0) % 1.0;
            gx_out[idx] = (gx * 0.5 + 0.5).clamp(0.0, 1.0);
            gy_out[idx] = (gy * 0.5 + 0.5).clamp(0.0, 1.0);
        }
    }

    EdgeMap { width: w, height: h, magnitude, angle, gx: gx_out, gy: gy_out }
}

/// Blend each high-magnitude pixel with its two perpendicular neighbours.
pub fn edge_directed_refine(img: &Image, edges: &EdgeMap) -> Image {
    let mut out = img.clone();
    let (w, h) = (img.width as i64, img.height as i64);

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let mag = edges.magnitude[idx];
            if mag < 0.05 {
                continue;
            }
            let gx = edges.gx[idx] * 2.0 - 1.0;
            let gy = edges.gy[idx] * 2.0 - 1.0;
            let g_len = (gx * gx + gy * gy).sqrt().max(1e-9);
            let (px, py) = (-gy / g_len, gx / g_len);
            let (nx, ny) = (px.round() as i64, py.round() as i64);

            let a = sample_clamped(img, x + nx, y + ny);
            let b = sample_clamped(img, x - nx, y - ny);
            let center = img.pixels[idx];

            let blend_amount = (mag * 2.0).min(1.0) * 0.3;
            let mut blended = [0u8; 4];
            for c in 0..4 {
                let avg = (f64::from(a[c]) + f64::from(b[c])) / 2.0;
                let v = f64::from(center[c]) * (1.0 - blend_amount) + avg * blend_amount;
                blended[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            out.pixels[idx] = blended;
        }
    }
    out
}

fn sample_clamped(img: &Image, x: i64, y: i64) -> [u8; 4] {
    let cx = x.clamp(0, img.width as i64 - 1) as u32;
    let cy = y.clamp(0, img.height as i64 - 1) as u32;
    img.pixels[(cy * img.width + cx) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_has_zero_magnitude() {
        let img = Image::filled(4, 4, [128, 128, 128, 255]);
        let edges = sobel_edges(&img);
        assert!(edges.magnitude.iter().all(|&m| m < 1e-9));
    }

    #[test]
    fn sharp_edge_has_nonzero_magnitude() {
        let mut img = Image::filled(4, 4, [0, 0, 0, 255]);
        for x in 2..4 {
            for y in 0..4 {
                img.pixels[(y * 4 + x) as usize] = [255, 255, 255, 255];
            }
        }
        let edges = sobel_edges(&img);
        assert!(edges.magnitude[(1 * 4 + 2) as usize] > 0.05);
    }
}
