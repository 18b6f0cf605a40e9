//! End-to-end scenario tests (§8): one test per testable property,
//! exercising the public API the way a host integration would.

use std::collections::HashMap;

use serde_json::json;

use timeline_core::easing::Ease;
use timeline_core::easing::bezier::cubic_bezier;
use timeline_core::foundation::core::Id;
use timeline_core::{
    BlendMode, ChromaKeyParams, CompositeLayer, Image, Keyframe, apply_chroma_key, composite,
    value_at_time,
};

#[test]
fn s1_keyframe_eval_linear_opacity() {
    let kfs = vec![
        Keyframe { id: Id::new("k0"), time: 0.0, property: "opacity".into(), value: json!(0.0), easing: Ease::Linear },
        Keyframe { id: Id::new("k1"), time: 1.0, property: "opacity".into(), value: json!(1.0), easing: Ease::Linear },
    ];

    let at_half = value_at_time(&kfs, 0.5).value.and_then(|v| v.as_f64()).unwrap();
    assert!((at_half - 0.5).abs() < 1e-9);

    assert_eq!(value_at_time(&kfs, 0.0).value.and_then(|v| v.as_f64()), Some(0.0));
    assert_eq!(value_at_time(&kfs, 1.0).value.and_then(|v| v.as_f64()), Some(1.0));
}

#[test]
fn s2_cubic_bezier_matches_reference_range() {
    let bez = cubic_bezier(0.25, 0.1, 0.25, 1.0);
    assert_eq!(bez.ease(0.0), 0.0);
    assert_eq!(bez.ease(1.0), 1.0);
    let mid = bez.ease(0.5);
    assert!((0.78..=0.83).contains(&mid), "ease(0.5)={mid} out of expected range");
}

#[test]
fn s3_srt_parse_two_subtitles() {
    let content = "1\n00:00:01,000 --> 00:00:02,500\nHello\nworld\n\n2\n00:00:03,000 --> 00:00:04,000\nNext\n";
    let (subs, diagnostics) = timeline_core::parse_srt(content);
    assert!(diagnostics.is_empty());
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].start_time, 1.0);
    assert_eq!(subs[0].end_time, 2.5);
    assert_eq!(subs[0].text, "Hello\nworld");
    assert_eq!(subs[1].start_time, 3.0);
    assert_eq!(subs[1].end_time, 4.0);
    assert_eq!(subs[1].text, "Next");
}

#[test]
fn s4_srt_parse_bad_timestamp_yields_no_subtitles() {
    let content = "1\n00:00:01,000 --> 00:99:02,500\noops\n";
    let (subs, diagnostics) = timeline_core::parse_srt(content);
    assert!(subs.is_empty());
    assert!(!diagnostics.is_empty());
}

#[test]
fn s5_variable_substitution_overrides_and_preserves_missing() {
    use timeline_core::schema::substitute::substitute_variables;

    let schema_vars: HashMap<String, serde_json::Value> = HashMap::new();
    let caller_vars = HashMap::from([
        ("title".to_string(), json!("Demo")),
        ("count".to_string(), json!(3)),
    ]);

    let serialized = r#"{"project":{"name":"{{title}}"},"note":"n={{count}} {{missing}}"}"#;
    let out = substitute_variables(serialized, &schema_vars, &caller_vars);
    assert!(out.contains(r#""name":"Demo""#));
    assert!(out.contains("n=3"));
    assert!(out.contains("{{missing}}"));
}

#[test]
fn s6_multiply_blend_of_grey_and_white_is_grey() {
    let top = Image::filled(1, 1, [255, 255, 255, 255]);

    let layers = vec![CompositeLayer { image: top, blend_mode: BlendMode::Multiply, opacity: 1.0, visible: true }];
    let out = composite(&layers, Some([128, 128, 128, 255]), 1, 1);

    let px = out.image.pixels[0];
    for c in &px[..3] {
        assert!((i32::from(*c) - 128).abs() <= 1, "channel {c} should be ~128");
    }
}

#[test]
fn s7_chroma_key_green_screen() {
    let mut image = Image::transparent(3, 1);
    image.pixels[0] = [0, 255, 0, 255]; // pure key colour
    image.pixels[1] = [255, 0, 0, 255]; // unrelated colour
    image.pixels[2] = [77, 204, 77, 255]; // within the soft-edge band around the key colour

    let params = ChromaKeyParams {
        key_color: [0.0, 1.0, 0.0],
        tolerance: 0.3,
        edge_softness: 0.05,
        spill_suppression: 0.5,
    };
    apply_chroma_key(&mut image, &params);

    assert_eq!(image.pixels[0][3], 0);
    assert_eq!(image.pixels[1][3], 255);
    let edge_alpha = image.pixels[2][3];
    assert!(edge_alpha > 0 && edge_alpha < 255, "edge pixel alpha {edge_alpha} should be strictly between 0 and 255");
}
