//! Blend-mode compositing pipeline (§4.I).

use std::time::Instant;

use rayon::prelude::*;

/// A straight-alpha RGBA8 image; the compositor's working buffer format
/// (blend math operates on straight, not premultiplied, channels).
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Image {
    pub fn transparent(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![[0, 0, 0, 0]; (width * height) as usize] }
    }

    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self { width, height, pixels: vec![color; (width * height) as usize] }
    }
}

/// The closed set of per-channel blend modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Add,
    /// `max(b-l, 0)`, a deliberate deviation from the historically
    /// aliased `|b-l|` (which duplicates `difference`).
    Subtract,
}

fn blend_channel(mode: BlendMode, b: f64, l: f64) -> f64 {
    match mode {
        BlendMode::Normal => l,
        BlendMode::Multiply => b * l,
        BlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - l),
        BlendMode::Overlay => {
            if b < 0.5 { 2.0 * b * l } else { 1.0 - 2.0 * (1.0 - b) * (1.0 - l) }
        }
        BlendMode::Darken => b.min(l),
        BlendMode::Lighten => b.max(l),
        BlendMode::ColorDodge => {
            if l >= 1.0 { 1.0 } else { (b / (1.0 - l)).min(1.0) }
        }
        BlendMode::ColorBurn => {
            if l <= 0.0 { 0.0 } else { (1.0 - (1.0 - b) / l).max(0.0) }
        }
        BlendMode::HardLight => {
            if l < 0.5 { 2.0 * b * l } else { 1.0 - 2.0 * (1.0 - b) * (1.0 - l) }
        }
        BlendMode::SoftLight => {
            if l < 0.5 {
                b - (1.0 - 2.0 * l) * b * (1.0 - b)
            } else {
                let d = if b <= 0.25 { ((16.0 * b - 12.0) * b + 4.0) * b } else { b.sqrt() };
                b + (2.0 * l - 1.0) * (d - b)
            }
        }
        BlendMode::Difference => (b - l).abs(),
        BlendMode::Exclusion => b + l - 2.0 * b * l,
        BlendMode::Add => (b + l).min(1.0),
        BlendMode::Subtract => (b - l).max(0.0),
    }
}

/// One layer in the compositor's input stack.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeLayer {
    pub image: Image,
    pub blend_mode: BlendMode,
    pub opacity: f64,
    pub visible: bool,
}

/// The compositor's result.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeOutput {
    pub image: Image,
    pub processing_time: std::time::Duration,
    pub layer_count: usize,
}

/// Composite `layers` in order (bottom first) onto a `w`x`h` canvas,
/// optionally pre-filled with `background`.
#[tracing::instrument(skip(layers))]
pub fn composite(layers: &[CompositeLayer], background: Option<[u8; 4]>, w: u32, h: u32) -> CompositeOutput {
    let started = Instant::now();
    let mut canvas = match background {
        Some(color) => Image::filled(w, h, color),
        None => Image::transparent(w, h),
    };

    let mut layer_count = 0usize;
    for layer in layers {
        if !layer.visible || layer.opacity <= 0.0 {
            continue;
        }
        layer_count += 1;
        composite_layer(&mut canvas, layer);
    }

    CompositeOutput {
        image: canvas,
        processing_time: started.elapsed(),
        layer_count,
    }
}

fn composite_layer(canvas: &mut Image, layer: &CompositeLayer) {
    let n = canvas.pixels.len().min(layer.image.pixels.len());
    canvas.pixels[..n]
        .par_iter_mut()
        .zip(layer.image.pixels[..n].par_iter())
        .for_each(|(base_px, layer_px)| {
            let layer_alpha = f64::from(layer_px[3]) / 255.0;
            let effective_alpha = (layer_alpha * layer.opacity).clamp(0.0, 1.0);
            if effective_alpha <= 0.0 {
                return;
            }

            let base_alpha = f64::from(base_px[3]) / 255.0;

            let blended: [f64; 3] = if layer.blend_mode == BlendMode::Normal {
                [
                    f64::from(layer_px[0]) / 255.0,
                    f64::from(layer_px[1]) / 255.0,
                    f64::from(layer_px[2]) / 255.0,
                ]
            } else {
                std::array::from_fn(|i| {
                    let b = f64::from(base_px[i]) / 255.0;
                    let l = f64::from(layer_px[i]) / 255.0;
                    blend_channel(layer.blend_mode, b, l).clamp(0.0, 1.0)
                })
            };

            let out_alpha = effective_alpha + base_alpha * (1.0 - effective_alpha);
            for i in 0..3 {
                let base_c = f64::from(base_px[i]) / 255.0;
                let out_c = blended[i] * effective_alpha + base_c * (1.0 - effective_alpha);
                base_px[i] = (out_c * 255.0).round().clamp(0.0, 255.0) as u8;
            }
            base_px[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_layer(color: [u8; 4], mode: BlendMode, opacity: f64) -> CompositeLayer {
        CompositeLayer { image: Image::filled(2, 2, color), blend_mode: mode, opacity, visible: true }
    }

    #[test]
    fn normal_blend_is_source_over() {
        let layers = vec![solid_layer([255, 0, 0, 255], BlendMode::Normal, 0.5)];
        let out = composite(&layers, Some([0, 0, 0, 255]), 2, 2);
        assert_eq!(out.image.pixels[0][0], 128);
        assert_eq!(out.layer_count, 1);
    }

    #[test]
    fn invisible_layers_are_skipped() {
        let mut layer = solid_layer([255, 0, 0, 255], BlendMode::Normal, 1.0);
        layer.visible = false;
        let out = composite(&[layer], Some([10, 10, 10, 255]), 2, 2);
        assert_eq!(out.layer_count, 0);
        assert_eq!(out.image.pixels[0], [10, 10, 10, 255]);
    }

    #[test]
    fn multiply_darkens_toward_black() {
        let base = (200.0 / 255.0f64 * 100.0 / 255.0 * 255.0).round() as u8;
        let layers = vec![solid_layer([100, 100, 100, 255], BlendMode::Multiply, 1.0)];
        let out = composite(&layers, Some([200, 200, 200, 255]), 2, 2);
        assert_eq!(out.image.pixels[0][0], base);
    }

    #[test]
    fn subtract_uses_true_max_not_absolute_difference() {
        let layers = vec![solid_layer([200, 0, 0, 255], BlendMode::Subtract, 1.0)];
        let out = composite(&layers, Some([50, 50, 50, 255]), 1, 1);
        // base < layer on the red channel -> clamps to 0, not |b-l|.
        assert_eq!(out.image.pixels[0][0], 0);
    }
}
