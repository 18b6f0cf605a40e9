//! Import/export between [`AnimationSchema`](crate::schema::AnimationSchema)
//! documents and the internal [`Project`]/[`Timeline`] model (§4.K).

use crate::animation::keyframe::Keyframe;
use crate::easing::Ease;
use crate::foundation::core::{Id, Transform};
use crate::schema::{AnimationSchema, Layer, SchemaAnimation};
use crate::timeline::clip::{Clip, ClipPayload, OpaqueClipStyle, SerializableTextStyle, TextClipStyle};
use crate::timeline::project::{CanvasSettings, Project};
use crate::timeline::track::{Track, TrackKind};

/// A non-fatal issue surfaced while importing a schema document: a
/// layer kind with no timeline counterpart, or a dropped field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportWarning {
    pub layer_id: String,
    pub message: String,
}

fn keyframes_from_schema(layer_id: &str, anim: &SchemaAnimation) -> Vec<Keyframe> {
    anim.keyframes
        .iter()
        .enumerate()
        .map(|(i, kf)| Keyframe {
            id: Id::new(format!("{layer_id}-{}-{i}", anim.property)),
            time: kf.time,
            property: anim.property.clone(),
            value: kf.value.clone(),
            easing: kf.easing.unwrap_or(Ease::Linear),
        })
        .collect()
}

/// Translate a schema document into a [`Project`]. Text/image/video/shape
/// layers become clips on a dedicated per-kind track; lottie/particle/group
/// layers have no native timeline representation, so they are carried
/// through as opaque clips on their own track (warned about, but never
/// dropped) so [`export_animation`] can re-emit them unchanged.
pub fn import_animation(schema: &AnimationSchema) -> (Project, Vec<ImportWarning>) {
    let mut project = Project::new(schema.project.name.clone());
    project.canvas = CanvasSettings {
        width: schema.project.width as u32,
        height: schema.project.height as u32,
        frame_rate: schema.project.fps,
        ..CanvasSettings::default()
    };

    let mut warnings = Vec::new();
    let mut text_track = Track::new("imported-text", TrackKind::Text, "Text");
    let mut image_track = Track::new("imported-image", TrackKind::Image, "Image");
    let mut video_track = Track::new("imported-video", TrackKind::Video, "Video");
    let mut shape_track = Track::new("imported-shape", TrackKind::Graphics, "Shapes");
    let mut opaque_track = Track::new("imported-opaque", TrackKind::Graphics, "Unsupported layers");

    for layer in &schema.layers {
        import_layer(layer, &mut text_track, &mut image_track, &mut video_track, &mut shape_track, &mut opaque_track, &mut warnings);
    }

    for track in [text_track, image_track, video_track, shape_track, opaque_track] {
        if !track.clips.is_empty() {
            project.timeline.tracks.push(track);
        }
    }

    for w in &warnings {
        tracing::warn!(layer_id = %w.layer_id, message = %w.message, "schema import warning");
    }

    (project, warnings)
}

fn import_layer(
    layer: &Layer,
    text_track: &mut Track,
    image_track: &mut Track,
    video_track: &mut Track,
    shape_track: &mut Track,
    opaque_track: &mut Track,
    warnings: &mut Vec<ImportWarning>,
) {
    match layer {
        Layer::Text { id, text, animations, .. } => {
            let keyframes = animations.iter().flat_map(|a| keyframes_from_schema(id, a)).collect();
            text_track.clips.push(Clip {
                id: Id::new(id.clone()),
                media_id: None,
                track_id: text_track.id.clone(),
                start_time: 0.0,
                duration: layer_duration(animations),
                in_point: 0.0,
                out_point: layer_duration(animations),
                volume: 1.0,
                transform: Transform::default(),
                keyframes,
                effects: vec![],
                audio_effects: vec![],
                payload: ClipPayload::Text(TextClipStyle {
                    text: text.clone(),
                    style: default_text_style(),
                    animation: None,
                }),
                blend_mode: None,
                blend_opacity: None,
                entry_animation: None,
                entry_window: 0.0,
                exit_animation: None,
                exit_window: 0.0,
                emphasis_animation: None,
            });
        }
        Layer::Image { id, animations, .. } => {
            let keyframes = animations.iter().flat_map(|a| keyframes_from_schema(id, a)).collect();
            image_track.clips.push(media_clip(id, image_track.id.clone(), keyframes, animations));
        }
        Layer::Video { id, animations, .. } => {
            let keyframes = animations.iter().flat_map(|a| keyframes_from_schema(id, a)).collect();
            video_track.clips.push(media_clip(id, video_track.id.clone(), keyframes, animations));
        }
        Layer::Shape { id, animations, .. } => {
            warnings.push(ImportWarning {
                layer_id: id.clone(),
                message: "shape layer geometry is not carried by the schema; imported as an empty graphics clip".into(),
            });
            let keyframes = animations.iter().flat_map(|a| keyframes_from_schema(id, a)).collect();
            shape_track.clips.push(media_clip(id, shape_track.id.clone(), keyframes, animations));
        }
        Layer::Lottie { id, .. } => {
            warnings.push(ImportWarning { layer_id: id.clone(), message: "lottie layers have no timeline counterpart; carried as an opaque clip".into() });
            opaque_track.clips.push(opaque_clip(id, opaque_track.id.clone(), "lottie", layer));
        }
        Layer::Particle { id, .. } => {
            warnings.push(ImportWarning { layer_id: id.clone(), message: "particle layers have no timeline counterpart; carried as an opaque clip".into() });
            opaque_track.clips.push(opaque_clip(id, opaque_track.id.clone(), "particle", layer));
        }
        Layer::Group { id, .. } => {
            warnings.push(ImportWarning { layer_id: id.clone(), message: "group layers have no timeline counterpart; carried as an opaque clip".into() });
            opaque_track.clips.push(opaque_clip(id, opaque_track.id.clone(), "group", layer));
        }
    }
}

/// Serialize `layer` verbatim into an opaque clip so [`export_animation`]
/// can reconstruct it byte-for-byte, regardless of how little the timeline
/// model understands about its contents.
fn opaque_clip(id: &str, track_id: Id, source_kind: &str, layer: &Layer) -> Clip {
    let payload = serde_json::to_value(layer).unwrap_or(serde_json::Value::Null);
    Clip {
        id: Id::new(id.to_string()),
        media_id: None,
        track_id,
        start_time: 0.0,
        duration: 1.0,
        in_point: 0.0,
        out_point: 1.0,
        volume: 1.0,
        transform: Transform::default(),
        keyframes: vec![],
        effects: vec![],
        audio_effects: vec![],
        payload: ClipPayload::Opaque(OpaqueClipStyle { source_kind: source_kind.into(), payload }),
        blend_mode: None,
        blend_opacity: None,
        entry_animation: None,
        entry_window: 0.0,
        exit_animation: None,
        exit_window: 0.0,
        emphasis_animation: None,
    }
}

fn media_clip(id: &str, track_id: Id, keyframes: Vec<Keyframe>, animations: &[SchemaAnimation]) -> Clip {
    let duration = layer_duration(animations);
    Clip {
        id: Id::new(id.to_string()),
        media_id: None,
        track_id,
        start_time: 0.0,
        duration,
        in_point: 0.0,
        out_point: duration,
        volume: 1.0,
        transform: Transform::default(),
        keyframes,
        effects: vec![],
        audio_effects: vec![],
        payload: ClipPayload::Media,
        blend_mode: None,
        blend_opacity: None,
        entry_animation: None,
        entry_window: 0.0,
        exit_animation: None,
        exit_window: 0.0,
        emphasis_animation: None,
    }
}

fn layer_duration(animations: &[SchemaAnimation]) -> f64 {
    animations
        .iter()
        .flat_map(|a| a.keyframes.iter())
        .map(|k| k.time)
        .fold(0.0_f64, f64::max)
        .max(1.0)
}

fn default_text_style() -> SerializableTextStyle {
    SerializableTextStyle {
        font: "sans-serif".into(),
        size_px: 48.0,
        weight: 400,
        letter_spacing: 0.0,
        line_height: 1.2,
        color: [255, 255, 255, 255],
        stroke_color: None,
        stroke_width: 0.0,
        background_color: None,
    }
}

/// Translate a [`Project`] back into a schema document. The inverse of
/// [`import_animation`] for the layer kinds it produces; tracks with no
/// schema counterpart (audio, transitions, markers) are dropped.
pub fn export_animation(project: &Project) -> AnimationSchema {
    use crate::schema::ProjectMeta;
    use std::collections::HashMap;

    let mut layers = Vec::new();
    for track in &project.timeline.tracks {
        for clip in &track.clips {
            let animations = export_animations(clip);
            match &clip.payload {
                ClipPayload::Text(t) => layers.push(Layer::Text {
                    id: clip.id.as_str().to_string(),
                    text: t.text.clone(),
                    animations,
                    extra: serde_json::Map::new(),
                }),
                ClipPayload::Media if track.kind == TrackKind::Image => layers.push(Layer::Image {
                    id: clip.id.as_str().to_string(),
                    url: String::new(),
                    animations,
                    extra: serde_json::Map::new(),
                }),
                ClipPayload::Media if track.kind == TrackKind::Video => layers.push(Layer::Video {
                    id: clip.id.as_str().to_string(),
                    url: String::new(),
                    animations,
                    extra: serde_json::Map::new(),
                }),
                ClipPayload::Shape(_) => layers.push(Layer::Shape {
                    id: clip.id.as_str().to_string(),
                    animations,
                    extra: serde_json::Map::new(),
                }),
                ClipPayload::Opaque(o) => {
                    if let Ok(layer) = serde_json::from_value::<Layer>(o.payload.clone()) {
                        layers.push(layer);
                    }
                }
                _ => {}
            }
        }
    }

    AnimationSchema {
        version: "1.0".into(),
        project: ProjectMeta {
            name: project.name.clone(),
            width: f64::from(project.canvas.width),
            height: f64::from(project.canvas.height),
            fps: project.canvas.frame_rate,
            duration: project.timeline.duration(),
            background_color: None,
        },
        assets: None,
        layers,
        audio: None,
        variables: HashMap::new(),
    }
}

fn export_animations(clip: &Clip) -> Vec<SchemaAnimation> {
    use crate::schema::SchemaKeyframe;
    use std::collections::BTreeMap;

    let mut by_property: BTreeMap<&str, Vec<&Keyframe>> = BTreeMap::new();
    for kf in &clip.keyframes {
        by_property.entry(kf.property.as_str()).or_default().push(kf);
    }

    by_property
        .into_iter()
        .map(|(property, kfs)| SchemaAnimation {
            property: property.to_string(),
            keyframes: kfs
                .into_iter()
                .map(|k| SchemaKeyframe {
                    time: k.time,
                    value: k.value.clone(),
                    easing: Some(k.easing),
                })
                .collect(),
            delay: None,
            repeat: None,
            yoyo: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ProjectMeta;
    use std::collections::HashMap;

    fn schema_with_text_layer() -> AnimationSchema {
        AnimationSchema {
            version: "1.0".into(),
            project: ProjectMeta { name: "demo".into(), width: 1920.0, height: 1080.0, fps: 30.0, duration: 5.0, background_color: None },
            assets: None,
            layers: vec![Layer::Text {
                id: "t1".into(),
                text: "Hello".into(),
                animations: vec![SchemaAnimation {
                    property: "opacity".into(),
                    keyframes: vec![
                        crate::schema::SchemaKeyframe { time: 0.0, value: serde_json::json!(0.0), easing: None },
                        crate::schema::SchemaKeyframe { time: 2.0, value: serde_json::json!(1.0), easing: None },
                    ],
                    delay: None,
                    repeat: None,
                    yoyo: None,
                }],
                extra: serde_json::Map::new(),
            }],
            audio: None,
            variables: HashMap::new(),
        }
    }

    #[test]
    fn imports_text_layer_as_text_clip_with_keyframes() {
        let (project, warnings) = import_animation(&schema_with_text_layer());
        assert!(warnings.is_empty());
        let track = project.timeline.tracks.iter().find(|t| t.kind == TrackKind::Text).unwrap();
        assert_eq!(track.clips.len(), 1);
        assert_eq!(track.clips[0].keyframes.len(), 2);
    }

    #[test]
    fn lottie_layer_produces_a_warning_and_an_opaque_clip() {
        let mut schema = schema_with_text_layer();
        schema.layers.push(Layer::Lottie { id: "l1".into(), extra: serde_json::Map::new() });
        let (project, warnings) = import_animation(&schema);
        assert!(warnings.iter().any(|w| w.layer_id == "l1"));
        let opaque_track = project.timeline.tracks.iter().find(|t| t.id.as_str() == "imported-opaque").unwrap();
        assert_eq!(opaque_track.clips.len(), 1);
    }

    #[test]
    fn export_round_trips_lottie_particle_and_group_layers() {
        let mut schema = schema_with_text_layer();
        schema.layers.push(Layer::Lottie { id: "l1".into(), extra: serde_json::Map::new() });
        schema.layers.push(Layer::Particle { id: "p1".into(), extra: serde_json::Map::new() });
        schema.layers.push(Layer::Group { id: "g1".into(), children: vec![], extra: serde_json::Map::new() });

        let (project, _) = import_animation(&schema);
        let exported = export_animation(&project);
        assert_eq!(exported.layers.len(), schema.layers.len());
        assert!(exported.layers.iter().any(|l| matches!(l, Layer::Lottie { id, .. } if id == "l1")));
        assert!(exported.layers.iter().any(|l| matches!(l, Layer::Particle { id, .. } if id == "p1")));
        assert!(exported.layers.iter().any(|l| matches!(l, Layer::Group { id, .. } if id == "g1")));
    }

    #[test]
    fn export_round_trips_a_text_layer() {
        let (project, _) = import_animation(&schema_with_text_layer());
        let exported = export_animation(&project);
        assert_eq!(exported.layers.len(), 1);
        match &exported.layers[0] {
            Layer::Text { text, animations, .. } => {
                assert_eq!(text, "Hello");
                assert_eq!(animations[0].keyframes.len(), 2);
            }
            _ => panic!("expected a text layer"),
        }
    }
}
