//! Two-pass separable Lanczos-3 resampling (§4.J fast tier).

use crate::compositor::blend::Image;
use crate::foundation::math::sinc;

const A: f64 = 3.0;

fn lanczos_weight(d: f64) -> f64 {
    if d.abs() >= A {
        0.0
    } else {
        sinc(d) * sinc(d / A)
    }
}

/// Resample `src` to `(dw, dh)` via separable horizontal-then-vertical
/// Lanczos-3 passes, clamp-edge addressed.
pub fn lanczos_resize(src: &Image, dw: u32, dh: u32) -> Image {
    let horiz = resize_axis(src, dw, src.height, Axis::Horizontal);
    resize_axis(&horiz, dw, dh, Axis::Vertical)
}

enum Axis {
    Horizontal,
    Vertical,
}

fn resize_axis(src: &Image, dw: u32, dh: u32, axis: Axis) -> Image {
    let (src_extent, dst_extent) = match axis {
        Axis::Horizontal => (src.width, dw),
        Axis::Vertical => (src.height, dh),
    };
    let scale = f64::from(dst_extent) / f64::from(src_extent);
    let radius = (A * scale.max(1.0)).ceil() as i64;

    let mut out = Image::transparent(dw, dh);

    match axis {
        Axis::Horizontal => {
            for y in 0..src.height {
                for dx in 0..dw {
                    let px = resample_1d(src, dx, y, src.width, radius, scale, true);
                    out.pixels[(y * dw + dx) as usize] = px;
                }
            }
        }
        Axis::Vertical => {
            for dy in 0..dh {
                for x in 0..src.width.min(dw) {
                    let px = resample_1d(src, x, dy, src.height, radius, scale, false);
                    out.pixels[(dy * dw + x) as usize] = px;
                }
            }
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn resample_1d(src: &Image, fixed: u32, dst_pos: u32, src_extent: u32, radius: i64, scale: f64, horizontal: bool) -> [u8; 4] {
    let src_pos = (f64::from(dst_pos) + 0.5) / scale - 0.5;
    let center = src_pos.round() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for tap in (center - radius)..=(center + radius) {
        let d = (tap as f64 + 0.5 - src_pos) / scale.max(1.0);
        let w = lanczos_weight(d);
        if w == 0.0 {
            continue;
        }
        let clamped = tap.clamp(0, src_extent as i64 - 1) as u32;
        let px = if horizontal {
            src.pixels[(fixed * src.width + clamped) as usize]
        } else {
            src.pixels[(clamped * src.width + fixed) as usize]
        };
        for c in 0..4 {
            sum[c] += f64::from(px[c]) * w;
        }
        weight_sum += w;
    }

    if weight_sum.abs() < 1e-9 {
        return [0, 0, 0, 0];
    }
    std::array::from_fn(|c| (sum[c] / weight_sum).round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upscale_preserves_flat_color() {
        let src = Image::filled(4, 4, [100, 150, 200, 255]);
        let out = lanczos_resize(&src, 8, 8);
        for px in &out.pixels {
            assert!((i32::from(px[0]) - 100).abs() <= 2);
        }
    }

    #[test]
    fn output_has_requested_dimensions() {
        let src = Image::filled(3, 5, [0, 0, 0, 255]);
        let out = lanczos_resize(&src, 9, 11);
        assert_eq!((out.width, out.height), (9, 11));
    }
}
