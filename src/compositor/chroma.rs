//! Chroma key (§4.I / §4.J text): per-pixel distance-to-key-colour
//! alpha carve-out with spill suppression.

use crate::compositor::blend::Image;

/// Chroma key parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChromaKeyParams {
    pub key_color: [f64; 3], // [0,1]
    pub tolerance: f64,
    pub edge_softness: f64,
    pub spill_suppression: f64,
}

/// Apply chroma keying to `image` in place, multiplying the existing
/// source alpha by the computed key alpha.
pub fn apply_chroma_key(image: &mut Image, params: &ChromaKeyParams) {
    let inner_edge = params.tolerance - params.edge_softness;
    let outer_edge = params.tolerance + params.edge_softness;
    let [kr, kg, kb] = params.key_color;

    // Index of the key-dominant channel (green for a typical green screen).
    let dominant = dominant_channel(kr, kg, kb);

    for px in image.pixels.iter_mut() {
        let r = f64::from(px[0]) / 255.0;
        let g = f64::from(px[1]) / 255.0;
        let b = f64::from(px[2]) / 255.0;

        let d = (((r - kr).powi(2) + (g - kg).powi(2) + (b - kb).powi(2)) / 3.0).sqrt();
        let key_alpha = if d <= inner_edge {
            0.0
        } else if d >= outer_edge {
            1.0
        } else {
            (d - inner_edge) / (outer_edge - inner_edge).max(1e-9)
        };

        let mut rgb = [r, g, b];
        if key_alpha > 0.5 && params.spill_suppression > 0.0 {
            let others_max = (0..3)
                .filter(|&i| i != dominant)
                .map(|i| rgb[i])
                .fold(0.0f64, f64::max);
            let reduction = (rgb[dominant] - others_max).max(0.0) * params.spill_suppression;
            rgb[dominant] = (rgb[dominant] - reduction).max(0.0);
        }

        px[0] = (rgb[0] * 255.0).round().clamp(0.0, 255.0) as u8;
        px[1] = (rgb[1] * 255.0).round().clamp(0.0, 255.0) as u8;
        px[2] = (rgb[2] * 255.0).round().clamp(0.0, 255.0) as u8;

        let src_alpha = f64::from(px[3]) / 255.0;
        px[3] = (src_alpha * key_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

fn dominant_channel(kr: f64, kg: f64, kb: f64) -> usize {
    let vals = [kr, kg, kb];
    let mut best = 0;
    for i in 1..3 {
        if vals[i] > vals[best] {
            best = i;
        }
    }
    best
}

/// Average an `r`-radius square centred at `(x, y)` and return its RGB
/// in `[0,1]`.
pub fn sample_key_color(image: &Image, x: u32, y: u32, r: u32) -> [f64; 3] {
    let (w, h) = (image.width as i64, image.height as i64);
    let (x, y, r) = (x as i64, y as i64, r as i64);

    let mut sum = [0.0f64; 3];
    let mut count = 0u32;
    for dy in -r..=r {
        for dx in -r..=r {
            let (sx, sy) = (x + dx, y + dy);
            if sx < 0 || sy < 0 || sx >= w || sy >= h {
                continue;
            }
            let px = image.pixels[(sy * w + sx) as usize];
            sum[0] += f64::from(px[0]) / 255.0;
            sum[1] += f64::from(px[1]) / 255.0;
            sum[2] += f64::from(px[2]) / 255.0;
            count += 1;
        }
    }
    if count == 0 {
        return [0.0, 0.0, 0.0];
    }
    [sum[0] / f64::from(count), sum[1] / f64::from(count), sum[2] / f64::from(count)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ChromaKeyParams {
        ChromaKeyParams { key_color: [0.0, 1.0, 0.0], tolerance: 0.3, edge_softness: 0.1, spill_suppression: 0.5 }
    }

    #[test]
    fn exact_key_color_becomes_transparent() {
        let mut img = Image::filled(1, 1, [0, 255, 0, 255]);
        apply_chroma_key(&mut img, &params());
        assert_eq!(img.pixels[0][3], 0);
    }

    #[test]
    fn far_from_key_color_stays_opaque() {
        let mut img = Image::filled(1, 1, [255, 0, 0, 255]);
        apply_chroma_key(&mut img, &params());
        assert_eq!(img.pixels[0][3], 255);
    }

    #[test]
    fn sample_key_color_averages_a_square() {
        let img = Image::filled(4, 4, [0, 255, 0, 255]);
        let c = sample_key_color(&img, 1, 1, 1);
        assert!((c[1] - 1.0).abs() < 1e-9);
    }
}
