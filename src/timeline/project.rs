//! Project (§3): canvas settings, the media library, and the timeline.

use std::collections::HashMap;

use crate::foundation::core::Id;
use crate::timeline::Timeline;

/// The kind of source media a [`MediaItem`] wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

/// An entry in the project's media library, referenced by clips via
/// `Clip::media_id`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaItem {
    pub id: Id,
    pub name: String,
    pub kind: MediaKind,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub frame_rate: Option<f64>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub channels: Option<u16>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub waveform: Option<Vec<f32>>,
}

/// Canvas/output settings shared by every track (§3 Project).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frame_rate: 30.0,
            sample_rate: 48_000,
            channels: 2,
        }
    }
}

/// The top-level editable document (§3 Project).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub media_library: HashMap<String, MediaItem>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub created_at: f64,
    #[serde(default)]
    pub modified_at: f64,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canvas: CanvasSettings::default(),
            media_library: HashMap::new(),
            timeline: Timeline::new(),
            created_at: 0.0,
            modified_at: 0.0,
        }
    }

    /// Every clip's `media_id`, when present, must resolve to an entry
    /// in `media_library` (§3 Project invariant).
    pub fn media_references_resolve(&self) -> bool {
        self.timeline
            .tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .filter_map(|c| c.media_id.as_ref())
            .all(|id| self.media_library.contains_key(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_has_no_dangling_media_refs() {
        let p = Project::new("untitled");
        assert!(p.media_references_resolve());
    }

    #[test]
    fn canvas_defaults_to_1080p30() {
        let c = CanvasSettings::default();
        assert_eq!(c.width, 1920);
        assert_eq!(c.frame_rate, 30.0);
    }
}
