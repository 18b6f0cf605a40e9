//! Track (§3): clip container with visibility/edit-lock flags.

use crate::foundation::core::Id;
use crate::timeline::clip::Clip;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Image,
    Text,
    Graphics,
}

/// A transition attached between two adjacent clips, pass-through as a
/// typed kind plus opaque JSON params (mirroring the effect-stack
/// convention used elsewhere in the data model).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub id: Id,
    pub kind: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub id: Id,
    pub kind: TrackKind,
    pub name: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl Track {
    pub fn new(id: impl Into<Id>, kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            locked: false,
            hidden: false,
            muted: false,
            solo: false,
            clips: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Whether `kind` may be placed on this track (§3 Track invariant i).
    pub fn accepts(&self, clip_kind: TrackKind) -> bool {
        self.kind == clip_kind
    }
}

/// A time-point annotation on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    pub id: Id,
    pub time: f64,
    pub label: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_accepts_only_its_own_kind() {
        let t = Track::new("t1", TrackKind::Video, "V1");
        assert!(t.accepts(TrackKind::Video));
        assert!(!t.accepts(TrackKind::Audio));
    }
}
