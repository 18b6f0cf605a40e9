//! Animation Kernel (§4.B): keyframe storage, interpolation, and the
//! `getValueAtTime` query contract.

use serde_json::Value as JsonValue;

use crate::easing::Ease;
use crate::foundation::core::Id;

/// A single keyframe: `{id, time, property, value, easing}`.
///
/// `property` is a dotted path such as `position.x`, `scale.y`,
/// `rotation`, `opacity`, `rotate3d.z`. Keyframes for a given property are
/// kept sorted ascending by `time`; inserting a duplicate `(property,
/// time)` pair replaces the existing entry rather than adding a second.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub id: Id,
    pub time: f64,
    pub property: String,
    pub value: JsonValue,
    pub easing: Ease,
}

/// Result of [`value_at_time`]: the resolved value plus the bracketing
/// keyframes and local progress, when available.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledValue<'a> {
    pub value: Option<JsonValue>,
    pub left: Option<&'a Keyframe>,
    pub right: Option<&'a Keyframe>,
    pub progress: f64,
}

impl<'a> SampledValue<'a> {
    fn empty() -> Self {
        Self {
            value: None,
            left: None,
            right: None,
            progress: 0.0,
        }
    }
}

/// Evaluate a single property's keyframes at time `t`.
///
/// `keyframes` need not already be sorted; this function sorts a local
/// copy of the references by time. Per §4.B / §8 invariant 1:
/// - empty input -> `{value: None, ...}`
/// - `t <= first.time` -> first value
/// - `t >= last.time` -> last value
/// - otherwise interpolate between the bracketing pair using the left
///   keyframe's easing.
pub fn value_at_time<'a>(keyframes: &'a [Keyframe], t: f64) -> SampledValue<'a> {
    if keyframes.is_empty() {
        return SampledValue::empty();
    }

    let mut sorted: Vec<&Keyframe> = keyframes.iter().collect();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

    let first = sorted[0];
    let last = *sorted.last().unwrap();

    if t <= first.time {
        return SampledValue {
            value: Some(first.value.clone()),
            left: None,
            right: Some(first),
            progress: 0.0,
        };
    }
    if t >= last.time {
        return SampledValue {
            value: Some(last.value.clone()),
            left: Some(last),
            right: None,
            progress: 1.0,
        };
    }

    // Locate the surrounding pair (A, B) with A.time <= t < B.time.
    let mut idx = 0;
    while idx + 1 < sorted.len() && sorted[idx + 1].time <= t {
        idx += 1;
    }
    let a = sorted[idx];
    let b = sorted[idx + 1];

    let span = b.time - a.time;
    let u = if span > 0.0 { (t - a.time) / span } else { 1.0 };
    let value = interpolate_value(&a.value, &b.value, u, a.easing);

    SampledValue {
        value: Some(value),
        left: Some(a),
        right: Some(b),
        progress: u.clamp(0.0, 1.0),
    }
}

/// Interpolate between two JSON values shaped like animatable properties.
///
/// - numeric <-> numeric: linear
/// - object <-> object with the same key set: recurse per key
/// - anything else (mismatched shape, strings, bools, arrays): step at
///   `u = 0.5` (A for `u < 0.5`, else B), per §4.B.
pub fn interpolate_value(a: &JsonValue, b: &JsonValue, u: f64, ease: Ease) -> JsonValue {
    let shaped = ease.apply(u.clamp(0.0, 1.0));
    match (a, b) {
        (JsonValue::Number(na), JsonValue::Number(nb)) => {
            let (Some(fa), Some(fb)) = (na.as_f64(), nb.as_f64()) else {
                return step(a, b, shaped);
            };
            let v = fa + (fb - fa) * shaped;
            serde_json::Number::from_f64(v)
                .map(JsonValue::Number)
                .unwrap_or_else(|| a.clone())
        }
        (JsonValue::Object(oa), JsonValue::Object(ob)) => {
            let mut keys: Vec<&String> = oa.keys().collect();
            let same_shape = oa.len() == ob.len() && oa.keys().all(|k| ob.contains_key(k));
            if !same_shape {
                return step(a, b, shaped);
            }
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                let va = &oa[k];
                let vb = &ob[k];
                // Progress/easing already collapsed into `shaped`; feed it
                // through as a linear progress so nested numerics land on
                // the same point the parent did.
                out.insert(k.clone(), interpolate_value(va, vb, shaped, Ease::Linear));
            }
            JsonValue::Object(out)
        }
        _ => step(a, b, shaped),
    }
}

fn step(a: &JsonValue, b: &JsonValue, u: f64) -> JsonValue {
    if u < 0.5 { a.clone() } else { b.clone() }
}

/// Insert or replace a keyframe, keyed by `(property, time)` equality.
pub fn add_keyframe(keyframes: &mut Vec<Keyframe>, kf: Keyframe) {
    if let Some(existing) = keyframes
        .iter_mut()
        .find(|k| k.property == kf.property && k.time == kf.time)
    {
        *existing = kf;
    } else {
        keyframes.push(kf);
    }
}

/// Remove a keyframe by id.
pub fn remove_keyframe(keyframes: &mut Vec<Keyframe>, id: &Id) {
    keyframes.retain(|k| &k.id != id);
}

/// Update a keyframe's value/easing/time by id. Re-sorts callers'
/// downstream reads naturally since [`value_at_time`] always sorts.
pub fn update_keyframe(
    keyframes: &mut [Keyframe],
    id: &Id,
    time: Option<f64>,
    value: Option<JsonValue>,
    easing: Option<Ease>,
) -> bool {
    let Some(kf) = keyframes.iter_mut().find(|k| &k.id == id) else {
        return false;
    };
    if let Some(t) = time {
        kf.time = t;
    }
    if let Some(v) = value {
        kf.value = v;
    }
    if let Some(e) = easing {
        kf.easing = e;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kf(id: &str, time: f64, value: f64, easing: Ease) -> Keyframe {
        Keyframe {
            id: Id::new(id),
            time,
            property: "opacity".into(),
            value: json!(value),
            easing,
        }
    }

    #[test]
    fn empty_keyframes_yield_no_value() {
        let sampled = value_at_time(&[], 0.5);
        assert_eq!(sampled.value, None);
    }

    #[test]
    fn boundary_sampling_is_exact() {
        let kfs = vec![kf("a", 0.0, 0.0, Ease::Linear), kf("b", 1.0, 1.0, Ease::Linear)];
        assert_eq!(value_at_time(&kfs, 0.0).value, Some(json!(0.0)));
        assert_eq!(value_at_time(&kfs, 1.0).value, Some(json!(1.0)));
        assert_eq!(value_at_time(&kfs, -5.0).value, Some(json!(0.0)));
        assert_eq!(value_at_time(&kfs, 5.0).value, Some(json!(1.0)));
    }

    #[test]
    fn s1_midpoint_linear() {
        let kfs = vec![kf("a", 0.0, 0.0, Ease::Linear), kf("b", 1.0, 1.0, Ease::Linear)];
        let v = value_at_time(&kfs, 0.5).value.unwrap();
        assert!((v.as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn object_interpolation_recurses_per_key() {
        let kfs = vec![
            Keyframe {
                id: Id::new("a"),
                time: 0.0,
                property: "position".into(),
                value: json!({"x": 0.0, "y": 0.0}),
                easing: Ease::Linear,
            },
            Keyframe {
                id: Id::new("b"),
                time: 1.0,
                property: "position".into(),
                value: json!({"x": 10.0, "y": 20.0}),
                easing: Ease::Linear,
            },
        ];
        let v = value_at_time(&kfs, 0.5).value.unwrap();
        assert_eq!(v["x"].as_f64().unwrap(), 5.0);
        assert_eq!(v["y"].as_f64().unwrap(), 10.0);
    }

    #[test]
    fn mismatched_shapes_step_at_half() {
        let a = json!("left");
        let b = json!("right");
        assert_eq!(interpolate_value(&a, &b, 0.49, Ease::Linear), a);
        assert_eq!(interpolate_value(&a, &b, 0.51, Ease::Linear), b);
    }

    #[test]
    fn add_keyframe_replaces_on_property_time_equality() {
        let mut kfs = vec![kf("a", 0.0, 1.0, Ease::Linear)];
        add_keyframe(&mut kfs, kf("b", 0.0, 2.0, Ease::Linear));
        assert_eq!(kfs.len(), 1);
        assert_eq!(kfs[0].value, json!(2.0));
        assert_eq!(kfs[0].id, Id::new("b"));
    }

    #[test]
    fn remove_and_update_by_id() {
        let mut kfs = vec![kf("a", 0.0, 1.0, Ease::Linear), kf("b", 1.0, 2.0, Ease::Linear)];
        assert!(update_keyframe(&mut kfs, &Id::new("a"), Some(0.5), None, None));
        assert_eq!(kfs[0].time, 0.5);
        remove_keyframe(&mut kfs, &Id::new("b"));
        assert_eq!(kfs.len(), 1);
    }
}
