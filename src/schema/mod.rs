//! Animation Schema I/O (§4.K): a portable JSON document describing a
//! project, validated, variable-substituted, and imported/exported to
//! and from the internal timeline model.

pub mod import_export;
pub mod substitute;
pub mod validate;

pub use import_export::{export_animation, import_animation, ImportWarning};
pub use substitute::substitute_variables;
pub use validate::{validate, SchemaValidation};

use std::collections::HashMap;

/// Top-level animation schema document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSchema {
    pub version: String,
    pub project: ProjectMeta,
    #[serde(default)]
    pub assets: Option<Assets>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub audio: Option<AudioTracks>,
    #[serde(default)]
    pub variables: HashMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub fps: f64,
    pub duration: f64,
    #[serde(default)]
    pub background_color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Assets {
    #[serde(default)]
    pub fonts: Vec<serde_json::Value>,
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
    #[serde(default)]
    pub videos: Vec<serde_json::Value>,
    #[serde(default)]
    pub audio: Vec<serde_json::Value>,
    #[serde(default)]
    pub lottie: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioTracks {
    #[serde(default)]
    pub tracks: Vec<serde_json::Value>,
}

/// A keyframe as it appears inside a schema layer's `animations[]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchemaKeyframe {
    pub time: f64,
    pub value: serde_json::Value,
    #[serde(default)]
    pub easing: Option<crate::easing::Ease>,
}

/// One property animation within a layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchemaAnimation {
    pub property: String,
    pub keyframes: Vec<SchemaKeyframe>,
    #[serde(default)]
    pub delay: Option<f64>,
    #[serde(default)]
    pub repeat: Option<u32>,
    #[serde(default)]
    pub yoyo: Option<bool>,
}

/// Layer union discriminated by `type`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Text {
        id: String,
        text: String,
        #[serde(default)]
        animations: Vec<SchemaAnimation>,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Image {
        id: String,
        url: String,
        #[serde(default)]
        animations: Vec<SchemaAnimation>,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Video {
        id: String,
        url: String,
        #[serde(default)]
        animations: Vec<SchemaAnimation>,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Shape {
        id: String,
        #[serde(default)]
        animations: Vec<SchemaAnimation>,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Lottie {
        id: String,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Particle {
        id: String,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Group {
        id: String,
        #[serde(default)]
        children: Vec<Layer>,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
}
