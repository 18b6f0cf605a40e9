//! Shared geometry, time, and id types used throughout the core.
//!
//! Time is always seconds (`f64`); the host supplies the sample instant
//! `t` for every evaluation. Positions/scales are either absolute pixels
//! or normalized `[0,1]` of canvas depending on the field — never mixed
//! within a single field (see `spec.md` §3).

use crate::foundation::error::{CoreError, CoreResult};

pub use kurbo::{Affine, Point, Vec2};

/// An opaque, host-assigned identifier. All entities in the data model
/// (clips, tracks, subtitles, markers, media items, keyframes) are keyed
/// by one of these rather than by a core-owned index.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Id(pub String);

impl Id {
    /// Wrap an owned string as an [`Id`].
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Canvas / output resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::schema_invalid(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Premultiplied RGBA8 pixel. All intermediate and final render buffers
/// in this crate are premultiplied end-to-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }
        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// A 2-D/3-D transform bundle, per `spec.md` §3 `Transform`.
///
/// `position`/`anchor` are in whatever unit convention the owning field
/// uses (absolute pixels for graphics/text, normalized `[0,1]` for clip
/// placement); the core never mixes the two within one field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Position (x, y).
    pub position: Vec2,
    /// Scale (x, y), default (1,1).
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Pivot, normalized `[0,1]` within the layer's own box.
    pub anchor: Vec2,
    /// Opacity, clamped to `[0,1]` at evaluation time.
    pub opacity: f64,
    /// Optional 3-D rotation (degrees per axis).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate3d: Option<Vec3>,
    /// Optional perspective distance (`>= 0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            anchor: Vec2::new(0.5, 0.5),
            opacity: 1.0,
            rotate3d: None,
            perspective: None,
        }
    }
}

impl Transform {
    /// Clamp the fields whose domain is constrained (§4.C): opacity to
    /// `[0,1]`, perspective to `>= 0`.
    pub fn clamp(&mut self) {
        self.opacity = self.opacity.clamp(0.0, 1.0);
        if let Some(p) = self.perspective.as_mut() {
            *p = p.max(0.0);
        }
    }

    /// Compose anchor -> rotate -> scale -> translate into a single 2-D
    /// affine matrix for downstream rasterization (§4.C).
    pub fn to_affine(self, box_size: Vec2) -> Affine {
        let anchor_px = Vec2::new(self.anchor.x * box_size.x, self.anchor.y * box_size.y);
        let t_translate = Affine::translate(self.position);
        let t_anchor = Affine::translate(anchor_px);
        let t_unanchor = Affine::translate(-anchor_px);
        let t_rotate = Affine::rotate(self.rotation.to_radians());
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

/// Per-axis 3-D rotation in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// Rotation about X, degrees.
    pub x: f64,
    /// Rotation about Y, degrees.
    pub y: f64,
    /// Rotation about Z, degrees.
    pub z: f64,
}

/// An axis-aligned rectangle, `x0/y0` inclusive and `x1/y1` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_to_affine_identity() {
        let t = Transform::default();
        let affine = t.to_affine(Vec2::new(100.0, 100.0));
        // Anchor at center with no rotation/scale/translate collapses to identity.
        let p = affine * Point::new(10.0, 10.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn transform_clamp_bounds_opacity_and_perspective() {
        let mut t = Transform {
            opacity: 1.5,
            perspective: Some(-4.0),
            ..Transform::default()
        };
        t.clamp();
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.perspective, Some(0.0));
    }

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 10).is_ok());
    }
}
