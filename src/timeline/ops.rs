//! Timeline mutation operations (§4.L): each takes an (immutable)
//! [`Project`] and returns a patched copy or an error — the actor that
//! owns the project decides whether to commit (§3).

use crate::foundation::core::Id;
use crate::foundation::error::{CoreError, CoreResult};
use crate::timeline::clip::Clip;
use crate::timeline::project::Project;
use crate::timeline::track::{Track, TrackKind};

/// A marker trait-ish tag for documentation purposes only; every
/// operation below is a free function taking/returning `Project`.
pub enum TimelineOp {}

fn track_mut<'a>(project: &'a mut Project, track_id: &Id) -> CoreResult<&'a mut Track> {
    project
        .timeline
        .find_track_mut(track_id)
        .ok_or_else(|| CoreError::invalid_range(format!("no track with id {track_id}")))
}

fn reject_if_locked(track: &Track) -> CoreResult<()> {
    if track.locked {
        return Err(CoreError::unsupported("track is locked"));
    }
    Ok(())
}

pub fn add_track(mut project: Project, kind: TrackKind, name: impl Into<String>, id: impl Into<Id>) -> Project {
    project.timeline.tracks.push(Track::new(id, kind, name));
    project
}

pub fn remove_track(mut project: Project, track_id: &Id) -> CoreResult<Project> {
    let before = project.timeline.tracks.len();
    project.timeline.tracks.retain(|t| &t.id != track_id);
    if project.timeline.tracks.len() == before {
        return Err(CoreError::invalid_range(format!("no track with id {track_id}")));
    }
    Ok(project)
}

pub fn reorder_track(mut project: Project, track_id: &Id, new_index: usize) -> CoreResult<Project> {
    let pos = project
        .timeline
        .tracks
        .iter()
        .position(|t| &t.id == track_id)
        .ok_or_else(|| CoreError::invalid_range(format!("no track with id {track_id}")))?;
    let track = project.timeline.tracks.remove(pos);
    let idx = new_index.min(project.timeline.tracks.len());
    project.timeline.tracks.insert(idx, track);
    Ok(project)
}

pub fn set_track_flags(
    mut project: Project,
    track_id: &Id,
    locked: Option<bool>,
    hidden: Option<bool>,
    muted: Option<bool>,
    solo: Option<bool>,
) -> CoreResult<Project> {
    let track = track_mut(&mut project, track_id)?;
    if let Some(v) = locked {
        track.locked = v;
    }
    if let Some(v) = hidden {
        track.hidden = v;
    }
    if let Some(v) = muted {
        track.muted = v;
    }
    if let Some(v) = solo {
        track.solo = v;
    }
    Ok(project)
}

pub fn add_clip(mut project: Project, track_id: &Id, clip: Clip) -> CoreResult<Project> {
    if !clip.is_well_formed() {
        return Err(CoreError::invalid_range("clip violates duration/in-out invariants"));
    }
    let track = track_mut(&mut project, track_id)?;
    reject_if_locked(track)?;
    let new_start = clip.start_time;
    let new_end = clip.end_time();
    if track.clips.iter().any(|c| overlaps(c.start_time, c.end_time(), new_start, new_end)) {
        return Err(CoreError::invalid_range("clip overlaps an existing clip on this track"));
    }
    track.clips.push(clip);
    Ok(project)
}

fn overlaps(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn remove_clip(mut project: Project, clip_id: &Id) -> CoreResult<Project> {
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    project.timeline.tracks[ti].clips.remove(ci);
    Ok(project)
}

/// Move `clip_id` to `new_start_time`, optionally re-targeting its
/// track (only permitted when the destination track's media type matches).
pub fn move_clip(
    mut project: Project,
    clip_id: &Id,
    new_start_time: f64,
    new_track_id: Option<&Id>,
) -> CoreResult<Project> {
    let (src_track_idx, clip_idx) = locate_clip(&project, clip_id)?;

    if let Some(dest_id) = new_track_id {
        let dest_idx = project
            .timeline
            .tracks
            .iter()
            .position(|t| &t.id == dest_id)
            .ok_or_else(|| CoreError::invalid_range(format!("no track with id {dest_id}")))?;
        if project.timeline.tracks[dest_idx].kind != project.timeline.tracks[src_track_idx].kind {
            return Err(CoreError::unsupported("moveClip cannot change media type"));
        }
        reject_if_locked(&project.timeline.tracks[src_track_idx])?;
        reject_if_locked(&project.timeline.tracks[dest_idx])?;
        let mut clip = project.timeline.tracks[src_track_idx].clips.remove(clip_idx);
        clip.start_time = new_start_time;
        clip.track_id = dest_id.clone();
        project.timeline.tracks[dest_idx].clips.push(clip);
    } else {
        reject_if_locked(&project.timeline.tracks[src_track_idx])?;
        project.timeline.tracks[src_track_idx].clips[clip_idx].start_time = new_start_time;
    }
    Ok(project)
}

fn locate_clip(project: &Project, clip_id: &Id) -> CoreResult<(usize, usize)> {
    for (ti, track) in project.timeline.tracks.iter().enumerate() {
        if let Some(ci) = track.clips.iter().position(|c| &c.id == clip_id) {
            return Ok((ti, ci));
        }
    }
    Err(CoreError::invalid_range(format!("no clip with id {clip_id}")))
}

pub fn trim_clip(mut project: Project, clip_id: &Id, in_point: f64, out_point: f64) -> CoreResult<Project> {
    if in_point < 0.0 || in_point > out_point {
        return Err(CoreError::invalid_range("trimClip requires 0 <= inPoint <= outPoint"));
    }
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    let clip = &mut project.timeline.tracks[ti].clips[ci];
    clip.in_point = in_point;
    clip.out_point = out_point;
    clip.duration = (out_point - in_point).min(clip.duration).max(f64::EPSILON);
    Ok(project)
}

/// Split the clip at absolute time `t`, yielding two clips whose
/// durations sum to the original and which share the source trim
/// boundaries at the cut point.
pub fn split_clip(mut project: Project, clip_id: &Id, t: f64) -> CoreResult<Project> {
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    let clip = project.timeline.tracks[ti].clips[ci].clone();

    if t <= clip.start_time || t >= clip.end_time() {
        return Err(CoreError::invalid_range("splitClip time must fall strictly within the clip"));
    }

    let first_duration = t - clip.start_time;
    let second_duration = clip.end_time() - t;
    let cut_source_point = clip.in_point + first_duration;

    let mut first = clip.clone();
    first.id = Id::new(format!("{}-a", clip.id.as_str()));
    first.duration = first_duration;
    first.out_point = cut_source_point;

    let mut second = clip;
    second.id = Id::new(format!("{}-b", second.id.as_str()));
    second.start_time = t;
    second.duration = second_duration;
    second.in_point = cut_source_point;

    project.timeline.tracks[ti].clips.splice(ci..=ci, [first, second]);
    Ok(project)
}

/// Remove the clip and shift every later clip on the same track left by
/// the removed clip's duration.
pub fn ripple_delete_clip(mut project: Project, clip_id: &Id) -> CoreResult<Project> {
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    let removed = project.timeline.tracks[ti].clips.remove(ci);
    for clip in &mut project.timeline.tracks[ti].clips {
        if clip.start_time >= removed.end_time() {
            clip.start_time -= removed.duration;
        }
    }
    Ok(project)
}

/// Shift `inPoint`/`outPoint` equally; `startTime` is unchanged.
pub fn slip_clip(mut project: Project, clip_id: &Id, delta: f64) -> CoreResult<Project> {
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    let clip = &mut project.timeline.tracks[ti].clips[ci];
    let new_in = clip.in_point + delta;
    let new_out = clip.out_point + delta;
    if new_in < 0.0 {
        return Err(CoreError::invalid_range("slipClip would push inPoint below 0"));
    }
    clip.in_point = new_in;
    clip.out_point = new_out;
    Ok(project)
}

/// Shift `startTime`, trimming whichever neighbour it now overlaps.
pub fn slide_clip(mut project: Project, clip_id: &Id, delta: f64) -> CoreResult<Project> {
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    let new_start = (project.timeline.tracks[ti].clips[ci].start_time + delta).max(0.0);
    let new_end = new_start + project.timeline.tracks[ti].clips[ci].duration;

    for (i, other) in project.timeline.tracks[ti].clips.iter_mut().enumerate() {
        if i == ci {
            continue;
        }
        if delta > 0.0 && other.start_time >= new_end.min(other.start_time + f64::EPSILON) && other.start_time < new_end {
            let trimmed = new_end - other.start_time;
            other.start_time = new_end;
            other.duration = (other.duration - trimmed).max(f64::EPSILON);
        } else if delta < 0.0 && other.end_time() > new_start && other.end_time() <= project.timeline.tracks[ti].clips[ci].end_time() {
            other.duration = (new_start - other.start_time).max(f64::EPSILON);
        }
    }
    project.timeline.tracks[ti].clips[ci].start_time = new_start;
    Ok(project)
}

/// Move the boundary between two adjacent clips on the same track.
pub fn roll_edit(mut project: Project, left_clip_id: &Id, right_clip_id: &Id, new_boundary: f64) -> CoreResult<Project> {
    let (lt, li) = locate_clip(&project, left_clip_id)?;
    let (rt, ri) = locate_clip(&project, right_clip_id)?;
    if lt != rt {
        return Err(CoreError::unsupported("rollEdit requires clips on the same track"));
    }
    reject_if_locked(&project.timeline.tracks[lt])?;

    let left_start = project.timeline.tracks[lt].clips[li].start_time;
    let right_end = project.timeline.tracks[rt].clips[ri].end_time();
    if new_boundary <= left_start || new_boundary >= right_end {
        return Err(CoreError::invalid_range("rollEdit boundary must stay within both clips"));
    }

    project.timeline.tracks[lt].clips[li].duration = new_boundary - left_start;
    project.timeline.tracks[rt].clips[ri].out_point -= project.timeline.tracks[rt].clips[ri].start_time - new_boundary;
    project.timeline.tracks[rt].clips[ri].duration = right_end - new_boundary;
    project.timeline.tracks[rt].clips[ri].start_time = new_boundary;
    Ok(project)
}

/// Trim `clip_id` so it starts (if `t` is before its midpoint) or ends
/// at the playhead `t`.
pub fn trim_to_playhead(mut project: Project, clip_id: &Id, t: f64) -> CoreResult<Project> {
    let (ti, ci) = locate_clip(&project, clip_id)?;
    reject_if_locked(&project.timeline.tracks[ti])?;
    let clip = &mut project.timeline.tracks[ti].clips[ci];
    if t <= clip.start_time || t >= clip.end_time() {
        return Err(CoreError::invalid_range("trimToPlayhead requires t within the clip"));
    }
    let midpoint = clip.start_time + clip.duration / 2.0;
    if t < midpoint {
        let trimmed = t - clip.start_time;
        clip.in_point += trimmed;
        clip.duration -= trimmed;
        clip.start_time = t;
    } else {
        clip.duration = t - clip.start_time;
        clip.out_point = clip.in_point + clip.duration;
    }
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Transform;
    use crate::timeline::clip::ClipPayload;
    use crate::timeline::project::Project;

    fn clip(id: &str, track_id: &str, start: f64, duration: f64) -> Clip {
        Clip {
            id: Id::new(id),
            media_id: None,
            track_id: Id::new(track_id),
            start_time: start,
            duration,
            in_point: 0.0,
            out_point: duration,
            volume: 1.0,
            transform: Transform::default(),
            keyframes: vec![],
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

    fn project_with_track() -> Project {
        let mut p = Project::new("test");
        p = add_track(p, TrackKind::Video, "V1", "t1");
        p
    }

    #[test]
    fn add_clip_rejects_overlap() {
        let p = project_with_track();
        let p = add_clip(p, &Id::new("t1"), clip("c1", "t1", 0.0, 5.0)).unwrap();
        assert!(add_clip(p, &Id::new("t1"), clip("c2", "t1", 2.0, 5.0)).is_err());
    }

    #[test]
    fn split_clip_durations_sum_to_original() {
        let p = project_with_track();
        let p = add_clip(p, &Id::new("t1"), clip("c1", "t1", 0.0, 10.0)).unwrap();
        let p = split_clip(p, &Id::new("c1"), 4.0).unwrap();
        let clips = &p.timeline.tracks[0].clips;
        assert_eq!(clips.len(), 2);
        assert!((clips[0].duration + clips[1].duration - 10.0).abs() < 1e-9);
    }

    #[test]
    fn split_clip_rejects_boundary_times() {
        let p = project_with_track();
        let p = add_clip(p, &Id::new("t1"), clip("c1", "t1", 0.0, 10.0)).unwrap();
        assert!(split_clip(p.clone(), &Id::new("c1"), 0.0).is_err());
        assert!(split_clip(p, &Id::new("c1"), 10.0).is_err());
    }

    #[test]
    fn ripple_delete_shifts_later_clips() {
        let p = project_with_track();
        let p = add_clip(p, &Id::new("t1"), clip("c1", "t1", 0.0, 5.0)).unwrap();
        let p = add_clip(p, &Id::new("t1"), clip("c2", "t1", 5.0, 5.0)).unwrap();
        let p = ripple_delete_clip(p, &Id::new("c1")).unwrap();
        assert_eq!(p.timeline.tracks[0].clips[0].start_time, 0.0);
    }

    #[test]
    fn locked_track_rejects_mutation() {
        let p = project_with_track();
        let p = set_track_flags(p, &Id::new("t1"), Some(true), None, None, None).unwrap();
        assert!(add_clip(p, &Id::new("t1"), clip("c1", "t1", 0.0, 5.0)).is_err());
    }

    #[test]
    fn remove_clip_on_unlocked_track_ignores_an_earlier_locked_track() {
        let mut p = Project::new("test");
        p = add_track(p, TrackKind::Video, "locked", "t1");
        p = add_track(p, TrackKind::Video, "editable", "t2");
        p = add_clip(p, &Id::new("t2"), clip("c1", "t2", 0.0, 5.0)).unwrap();
        p = set_track_flags(p, &Id::new("t1"), Some(true), None, None, None).unwrap();

        let p = remove_clip(p, &Id::new("c1")).unwrap();
        assert!(p.timeline.tracks[1].clips.is_empty());
    }
}
