//! Clip and its specialized text/shape/SVG/sticker payloads (§3).

use crate::animation::keyframe::Keyframe;
use crate::compositor::blend::BlendMode;
use crate::foundation::core::{Id, Transform};
use crate::graphics::emphasis::EmphasisAnimation;
use crate::graphics::entry_exit::EntryExitAnimation;
use crate::graphics::shapes::{ShapeKind, ShapeStyle};
use crate::graphics::svg::ColorStyle;
use crate::text::animate::TextAnimation;
use crate::text::render::TextRenderStyle;

/// An opaque effect/audio-effect entry: a typed kind plus pass-through
/// JSON params, the same convention used for track transitions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectSpec {
    pub id: Id,
    pub kind: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Specialized payload carried by a clip beyond the shared fields (§3).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClipPayload {
    /// Plain video/image/audio clip backed by `Clip::media_id`.
    Media,
    Text(TextClipStyle),
    Shape(ShapeClipStyle),
    Svg(SvgClipStyle),
    Sticker(GraphicsPayload),
    /// A layer kind with no native timeline representation (schema
    /// lottie/particle/group layers): the original document fragment is
    /// kept verbatim so import/export round-trips without loss.
    Opaque(OpaqueClipStyle),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpaqueClipStyle {
    pub source_kind: String,
    pub payload: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextClipStyle {
    pub text: String,
    pub style: SerializableTextStyle,
    #[serde(default)]
    pub animation: Option<TextAnimation>,
}

/// A serde-friendly mirror of [`TextRenderStyle`] (which embeds a
/// `dyn`-free but non-`Default` layout service type).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerializableTextStyle {
    pub font: String,
    pub size_px: f32,
    pub weight: u16,
    pub letter_spacing: f64,
    pub line_height: f64,
    pub color: [u8; 4],
    #[serde(default)]
    pub stroke_color: Option<[u8; 4]>,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub background_color: Option<[u8; 4]>,
}

impl From<&SerializableTextStyle> for TextRenderStyle {
    fn from(s: &SerializableTextStyle) -> Self {
        TextRenderStyle {
            text_style: crate::text::layout::TextStyle {
                font: s.font.clone(),
                size_px: s.size_px,
                weight: s.weight,
                letter_spacing: s.letter_spacing,
                line_height: s.line_height,
            },
            color: s.color,
            stroke_color: s.stroke_color,
            stroke_width: s.stroke_width,
            background_color: s.background_color,
            shadow_color: None,
            shadow_blur: 0.0,
            shadow_offset: crate::foundation::core::Vec2::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeClipStyle {
    pub shape_type: ShapeKind,
    pub style: ShapeStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SvgClipStyle {
    pub svg_content: String,
    pub view_box: (f64, f64, f64, f64),
    #[serde(default)]
    pub color_style: Option<ColorStyle>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphicsPayload {
    pub image_url: String,
}

/// A single timeline clip (§3). `payload` carries specialization;
/// `media_id` is only meaningful for `ClipPayload::Media`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    pub id: Id,
    #[serde(default)]
    pub media_id: Option<Id>,
    pub track_id: Id,
    pub start_time: f64,
    pub duration: f64,
    pub in_point: f64,
    pub out_point: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    pub transform: Transform,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    #[serde(default)]
    pub audio_effects: Vec<EffectSpec>,
    pub payload: ClipPayload,
    #[serde(default)]
    pub blend_mode: Option<BlendMode>,
    #[serde(default)]
    pub blend_opacity: Option<f64>,
    #[serde(default)]
    pub entry_animation: Option<EntryExitAnimation>,
    #[serde(default)]
    pub entry_window: f64,
    #[serde(default)]
    pub exit_animation: Option<EntryExitAnimation>,
    #[serde(default)]
    pub exit_window: f64,
    #[serde(default)]
    pub emphasis_animation: Option<EmphasisAnimation>,
}

fn default_volume() -> f64 {
    1.0
}

impl Clip {
    /// `duration > 0`; `0 <= inPoint <= outPoint`; `outPoint - inPoint
    /// >= duration` unless time-stretched (§3 Clip invariants).
    pub fn is_well_formed(&self) -> bool {
        self.duration > 0.0
            && self.in_point >= 0.0
            && self.in_point <= self.out_point
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}
