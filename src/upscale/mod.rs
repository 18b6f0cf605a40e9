//! Upscaling Pipeline (§4.J): three quality tiers over a CPU reference
//! path (the `gpu` feature wires the same math to a WebGPU compute
//! pipeline; absent it, or on initialisation failure, the engine always
//! uses this path plus a bilinear fallback).

pub mod edge;
pub mod lanczos;
pub mod pool;
pub mod sharpen;

pub use edge::{EdgeMap, sobel_edges};
pub use lanczos::lanczos_resize;
pub use pool::TexturePool;
pub use sharpen::adaptive_sharpen;

use crate::compositor::blend::Image;

/// Upscaling quality tier (§4.J).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Fast,
    Balanced,
    Quality,
}

/// Upscale `src` to `(dw, dh)` at the given quality tier. Requires
/// `dw > sw || dh > sh`.
#[tracing::instrument(skip(src))]
pub fn upscale(src: &Image, dw: u32, dh: u32, quality: Quality) -> crate::foundation::error::CoreResult<Image> {
    if dw <= src.width && dh <= src.height {
        return Err(crate::foundation::error::CoreError::invalid_range(
            "upscale target must exceed source in at least one dimension",
        ));
    }

    let resized = lanczos_resize(src, dw, dh);
    if quality == Quality::Fast {
        return Ok(resized);
    }

    let edges = sobel_edges(&resized);
    let refined = edge::edge_directed_refine(&resized, &edges);
    if quality == Quality::Balanced {
        return Ok(refined);
    }

    Ok(adaptive_sharpen(&refined, &edges, 0.5))
}

/// CPU bilinear fallback used when the GPU pipeline fails to initialise.
pub fn bilinear_fallback(src: &Image, dw: u32, dh: u32) -> Image {
    let mut out = Image::transparent(dw, dh);
    let (sw, sh) = (src.width as f64, src.height as f64);
    for y in 0..dh {
        for x in 0..dw {
            let sx = (f64::from(x) + 0.5) * sw / f64::from(dw) - 0.5;
            let sy = (f64::from(y) + 0.5) * sh / f64::from(dh) - 0.5;
            out.pixels[(y * dw + x) as usize] = sample_bilinear(src, sx, sy);
        }
    }
    out
}

pub(crate) fn sample_bilinear(src: &Image, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor().clamp(0.0, (src.width - 1) as f64) as u32;
    let y0 = y.floor().clamp(0.0, (src.height - 1) as f64) as u32;
    let x1 = (x0 + 1).min(src.width - 1);
    let y1 = (y0 + 1).min(src.height - 1);
    let fx = (x - f64::from(x0)).clamp(0.0, 1.0);
    let fy = (y - f64::from(y0)).clamp(0.0, 1.0);

    let p00 = src.pixels[(y0 * src.width + x0) as usize];
    let p10 = src.pixels[(y0 * src.width + x1) as usize];
    let p01 = src.pixels[(y1 * src.width + x0) as usize];
    let p11 = src.pixels[(y1 * src.width + x1) as usize];

    std::array::from_fn(|c| {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bot = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        (top * (1.0 - fy) + bot * fy).round().clamp(0.0, 255.0) as u8
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upscale_rejects_non_growing_target() {
        let src = Image::filled(10, 10, [255, 255, 255, 255]);
        assert!(upscale(&src, 10, 10, Quality::Fast).is_err());
    }

    #[test]
    fn fast_tier_only_resamples() {
        let src = Image::filled(4, 4, [10, 20, 30, 255]);
        let out = upscale(&src, 8, 8, Quality::Fast).unwrap();
        assert_eq!((out.width, out.height), (8, 8));
    }
}
