//! Adaptive sharpen (§4.J quality tier).

use crate::compositor::blend::Image;
use crate::foundation::math::luminance;
use crate::upscale::edge::EdgeMap;

/// Unsharp-mask against a 4-neighbour blur, reducing strength where the
/// local high-pass luminance is already high.
pub fn adaptive_sharpen(img: &Image, _edges: &EdgeMap, strength: f64) -> Image {
    let mut out = img.clone();
    let (w, h) = (img.width as i64, img.height as i64);

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let center = img.pixels[idx];

            let blur: [f64; 4] = std::array::from_fn(|c| {
                let n = sample(img, x, y - 1)[c];
                let s = sample(img, x, y + 1)[c];
                let e = sample(img, x + 1, y)[c];
                let w_ = sample(img, x - 1, y)[c];
                (f64::from(n) + f64::from(s) + f64::from(e) + f64::from(w_)) / 4.0
            });

            let high_pass: [f64; 4] = std::array::from_fn(|c| f64::from(center[c]) - blur[c]);
            let hp_luma = luminance(high_pass[0] / 255.0, high_pass[1] / 255.0, high_pass[2] / 255.0);
            let adaptive = strength * (1.0 - hp_luma.abs() * 0.5);

            let mut pixel = [0u8; 4];
            for c in 0..4 {
                let v = f64::from(center[c]) + high_pass[c] * adaptive;
                pixel[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            out.pixels[idx] = pixel;
        }
    }
    out
}

fn sample(img: &Image, x: i64, y: i64) -> [u8; 4] {
    let cx = x.clamp(0, img.width as i64 - 1) as u32;
    let cy = y.clamp(0, img.height as i64 - 1) as u32;
    img.pixels[(cy * img.width + cx) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upscale::edge::sobel_edges;

    #[test]
    fn flat_image_is_unchanged() {
        let img = Image::filled(4, 4, [100, 100, 100, 255]);
        let edges = sobel_edges(&img);
        let out = adaptive_sharpen(&img, &edges, 0.5);
        assert_eq!(out, img);
    }
}
