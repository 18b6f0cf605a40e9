//! Timeline Model (§4.L, §3): project/timeline/track/clip data model and
//! the operations the host invokes against it.

pub mod clip;
pub mod ops;
pub mod project;
pub mod track;

pub use clip::{Clip, ClipPayload, GraphicsPayload, OpaqueClipStyle, ShapeClipStyle, SvgClipStyle, TextClipStyle};
pub use ops::TimelineOp;
pub use project::{CanvasSettings, MediaItem, MediaKind, Project};
pub use track::{Marker, Track, TrackKind};

use crate::foundation::core::Id;
use crate::foundation::error::{CoreError, CoreResult};
use crate::subtitle::srt::{self, Subtitle};

/// The core timeline: an ordered sequence of tracks, plus subtitles and markers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl Timeline {
    pub fn new() -> Self {
        Self { tracks: Vec::new(), subtitles: Vec::new(), markers: Vec::new() }
    }

    /// `duration = max over clips of (startTime + duration)` (§3). Never
    /// stored; always recomputed.
    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .map(|c| c.start_time + c.duration)
            .fold(0.0, f64::max)
    }

    /// Scan tracks in order for the clip with `id`.
    pub fn find_clip(&self, id: &Id) -> Option<&Clip> {
        self.tracks.iter().flat_map(|t| t.clips.iter()).find(|c| &c.id == id)
    }

    pub fn find_track(&self, id: &Id) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn find_track_mut(&mut self, id: &Id) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| &t.id == id)
    }

    /// Append a marker (§3 Marker, §2 supplemented feature).
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn remove_marker(&mut self, id: &Id) -> CoreResult<()> {
        let before = self.markers.len();
        self.markers.retain(|m| &m.id != id);
        if self.markers.len() == before {
            return Err(CoreError::invalid_range(format!("no marker with id {id}")));
        }
        Ok(())
    }

    pub fn update_marker(&mut self, id: &Id, time: Option<f64>, label: Option<String>, color: Option<String>) -> CoreResult<()> {
        let marker = self
            .markers
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| CoreError::invalid_range(format!("no marker with id {id}")))?;
        if let Some(t) = time {
            marker.time = t;
        }
        if let Some(l) = label {
            marker.label = l;
        }
        if let Some(c) = color {
            marker.color = c;
        }
        Ok(())
    }

    /// The §4.G subtitle operations exposed directly on `Timeline`, since
    /// the host invokes them through the timeline rather than as bare
    /// functions over a detached subtitle list.
    pub fn add_subtitle(&mut self, new: Subtitle) -> CoreResult<()> {
        self.subtitles = srt::add(&self.subtitles, new).map_err(CoreError::invalid_range)?;
        Ok(())
    }

    pub fn update_subtitle(&mut self, id: &Id, text: Option<String>, start: Option<f64>, end: Option<f64>) -> CoreResult<()> {
        self.subtitles = srt::update(&self.subtitles, id, text, start, end).map_err(CoreError::invalid_range)?;
        Ok(())
    }

    pub fn remove_subtitle(&mut self, id: &Id) -> CoreResult<()> {
        self.subtitles = srt::remove(&self.subtitles, id).map_err(CoreError::invalid_range)?;
        Ok(())
    }

    pub fn split_subtitle(&mut self, id: &Id, split_time: f64) -> CoreResult<()> {
        self.subtitles = srt::split(&self.subtitles, id, split_time).map_err(CoreError::invalid_range)?;
        Ok(())
    }

    pub fn merge_adjacent_subtitles(&mut self, threshold: f64) -> CoreResult<()> {
        self.subtitles = srt::merge_adjacent(&self.subtitles, threshold).map_err(CoreError::invalid_range)?;
        Ok(())
    }

    pub fn shift_all_subtitles(&mut self, offset: f64) -> CoreResult<()> {
        self.subtitles = srt::shift_all(&self.subtitles, offset).map_err(CoreError::invalid_range)?;
        Ok(())
    }

    pub fn apply_subtitle_style_preset(&mut self, id: &Id, preset: &str) -> CoreResult<()> {
        self.subtitles = srt::apply_style_preset(&self.subtitles, id, preset).map_err(CoreError::invalid_range)?;
        Ok(())
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_crud_round_trips() {
        let mut tl = Timeline::new();
        tl.add_marker(Marker { id: Id::new("m1"), time: 1.0, label: "chapter".into(), color: "#fff".into() });
        tl.update_marker(&Id::new("m1"), Some(2.0), None, None).unwrap();
        assert_eq!(tl.markers[0].time, 2.0);
        tl.remove_marker(&Id::new("m1")).unwrap();
        assert!(tl.markers.is_empty());
    }

    #[test]
    fn subtitle_crud_delegates_to_srt_ops() {
        let mut tl = Timeline::new();
        tl.add_subtitle(Subtitle { id: Id::new("s1"), start_time: 0.0, end_time: 1.0, text: "hi".into(), words: vec![], style_preset: None }).unwrap();
        assert_eq!(tl.subtitles.len(), 1);
        tl.shift_all_subtitles(2.0).unwrap();
        assert_eq!(tl.subtitles[0].start_time, 2.0);
    }
}
