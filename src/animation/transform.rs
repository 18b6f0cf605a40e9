//! Transform Animator (§4.C): evaluates a clip's keyframes against its
//! base [`Transform`] to produce an animated transform plus its 2-D
//! affine matrix for rasterization.

use crate::animation::keyframe::{Keyframe, value_at_time};
use crate::foundation::core::{Affine, Transform, Vec2};

/// Dotted property paths the animator knows how to fold back into a
/// [`Transform`]. Anything else is ignored (not an error — §7 policy 1).
const ANIMATABLE_PROPERTIES: &[&str] = &[
    "position.x",
    "position.y",
    "scale.x",
    "scale.y",
    "rotation",
    "opacity",
    "anchor.x",
    "anchor.y",
    "rotate3d.x",
    "rotate3d.y",
    "rotate3d.z",
    "perspective",
];

/// The result of animating a base transform against a clip's keyframes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedTransform {
    pub transform: Transform,
}

fn scalar_at(keyframes: &[Keyframe], property: &str, t: f64, fallback: f64) -> f64 {
    let matching: Vec<&Keyframe> = keyframes.iter().filter(|k| k.property == property).collect();
    if matching.is_empty() {
        return fallback;
    }
    let owned: Vec<Keyframe> = matching.into_iter().cloned().collect();
    value_at_time(&owned, t)
        .value
        .and_then(|v| v.as_f64())
        .unwrap_or(fallback)
}

/// Evaluate `base` against `keyframes` at time `t`, substituting each
/// animatable property in turn, then clamping opacity/perspective.
pub fn animate_transform(base: &Transform, keyframes: &[Keyframe], t: f64) -> AnimatedTransform {
    let mut out = *base;

    out.position.x = scalar_at(keyframes, "position.x", t, base.position.x);
    out.position.y = scalar_at(keyframes, "position.y", t, base.position.y);
    out.scale.x = scalar_at(keyframes, "scale.x", t, base.scale.x);
    out.scale.y = scalar_at(keyframes, "scale.y", t, base.scale.y);
    out.rotation = scalar_at(keyframes, "rotation", t, base.rotation);
    out.opacity = scalar_at(keyframes, "opacity", t, base.opacity);
    out.anchor.x = scalar_at(keyframes, "anchor.x", t, base.anchor.x);
    out.anchor.y = scalar_at(keyframes, "anchor.y", t, base.anchor.y);

    if base.rotate3d.is_some() || keyframes.iter().any(|k| k.property.starts_with("rotate3d.")) {
        let mut r3 = base.rotate3d.unwrap_or_default();
        r3.x = scalar_at(keyframes, "rotate3d.x", t, r3.x);
        r3.y = scalar_at(keyframes, "rotate3d.y", t, r3.y);
        r3.z = scalar_at(keyframes, "rotate3d.z", t, r3.z);
        out.rotate3d = Some(r3);
    }
    if base.perspective.is_some() || keyframes.iter().any(|k| k.property == "perspective") {
        let fallback = base.perspective.unwrap_or(0.0);
        out.perspective = Some(scalar_at(keyframes, "perspective", t, fallback));
    }

    out.clamp();
    AnimatedTransform { transform: out }
}

/// Compose the clip's 2-D affine matrix: anchor -> rotate -> scale ->
/// translate, given the layer's own box size (for anchor normalization).
pub fn to_affine(animated: &AnimatedTransform, box_size: Vec2) -> Affine {
    animated.transform.to_affine(box_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Ease;
    use crate::foundation::core::Id;
    use serde_json::json;

    fn kf(property: &str, time: f64, value: f64) -> Keyframe {
        Keyframe {
            id: Id::new(format!("{property}@{time}")),
            time,
            property: property.into(),
            value: json!(value),
            easing: Ease::Linear,
        }
    }

    #[test]
    fn animates_individual_properties() {
        let base = Transform::default();
        let kfs = vec![kf("opacity", 0.0, 0.0), kf("opacity", 1.0, 1.0)];
        let animated = animate_transform(&base, &kfs, 0.5);
        assert!((animated.transform.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn clamps_opacity_after_animating() {
        let base = Transform::default();
        let kfs = vec![kf("opacity", 0.0, 0.0), kf("opacity", 1.0, 3.0)];
        let animated = animate_transform(&base, &kfs, 1.0);
        assert_eq!(animated.transform.opacity, 1.0);
    }

    #[test]
    fn unanimated_properties_hold_base_value() {
        let base = Transform {
            rotation: 45.0,
            ..Transform::default()
        };
        let animated = animate_transform(&base, &[], 10.0);
        assert_eq!(animated.transform.rotation, 45.0);
    }

    #[test]
    fn property_list_covers_spec_set() {
        for p in ANIMATABLE_PROPERTIES {
            assert!(!p.is_empty());
        }
    }
}
