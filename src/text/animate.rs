//! Per-character/word/line text animation (§4.D, the char-animator half).

use crate::easing::Ease;

/// The granularity an animation preset staggers over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimUnit {
    Character,
    Word,
    Line,
}

/// Horizontal/vertical slide direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDir {
    Left,
    Right,
    Up,
    Down,
}

/// Closed set of per-unit text animation presets (§4.D).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "preset", rename_all = "kebab-case")]
pub enum TextAnimPreset {
    None,
    Typewriter,
    Fade,
    Slide { dir: SlideDir, distance_px: f64 },
    Scale,
    Blur { max_blur_px: f64 },
    Bounce,
    Rotate { degrees: f64 },
    Wave { amplitude_px: f64, speed: f64 },
    Shake { amplitude_px: f64, speed: f64 },
    Pop,
    Glitch { amplitude_px: f64 },
    Split,
    Flip,
    WordByWord,
    Rainbow { speed: f64 },
}

/// Animation parameters attached to a text clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextAnimation {
    pub preset: TextAnimPreset,
    pub unit: AnimUnit,
    pub stagger: f64,
    pub in_duration: f64,
    pub out_duration: f64,
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

fn default_ease() -> Ease {
    Ease::OutCubic
}

/// Per-unit animated render state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitState {
    pub opacity: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: Option<[u8; 4]>,
    pub skew_x: Option<f64>,
    pub skew_y: Option<f64>,
}

impl Default for UnitState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            color: None,
            skew_x: None,
            skew_y: None,
        }
    }
}

/// Which phase of the clip's lifetime `t` falls in, and the unit-local
/// progress/direction for that phase.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Phase {
    progress: f64,
    is_in: bool,
}

fn phase_for(relative: f64, duration: f64, in_duration: f64, out_duration: f64) -> Phase {
    if in_duration > 0.0 && relative < in_duration {
        Phase {
            progress: relative / in_duration,
            is_in: true,
        }
    } else if out_duration > 0.0 && relative >= duration - out_duration {
        Phase {
            progress: (relative - (duration - out_duration)) / out_duration,
            is_in: false,
        }
    } else {
        Phase {
            progress: 1.0,
            is_in: true,
        }
    }
}

/// Deterministic pseudo-random in `[0,1)` from a phase value, matching
/// the `sin(phase*12.9898)*43758.5453` trick used by the glitch preset.
fn glitch_rand(phase: f64) -> f64 {
    let v = (phase * 12.9898).sin() * 43758.5453;
    v - v.floor()
}

/// Evaluate one unit's animated state.
///
/// `unit_index`/`total_units` drive stagger; `absolute_t` is the clip's
/// full playback time (used by the continuously-looping presets —
/// wave/shake/rainbow — which animate off absolute time rather than the
/// unit's own in/out timeline).
pub fn unit_state(
    anim: &TextAnimation,
    unit_index: usize,
    total_units: usize,
    relative: f64,
    clip_duration: f64,
    absolute_t: f64,
) -> UnitState {
    let unit_duration = (clip_duration
        - (total_units.saturating_sub(1) as f64) * anim.stagger)
        .max(0.1);
    let unit_start = unit_index as f64 * anim.stagger;
    let unit_relative = relative - unit_start;

    let phase = phase_for(unit_relative, unit_duration, anim.in_duration, anim.out_duration);
    let mut progress = phase.progress.clamp(0.0, 1.0);
    if !phase.is_in {
        progress = 1.0 - progress;
    }
    let eased = anim.ease.apply(progress);

    let mut state = UnitState::default();

    match anim.preset {
        TextAnimPreset::None => {}
        TextAnimPreset::Typewriter => {
            state.opacity = if progress >= 0.5 { 1.0 } else { 0.0 };
        }
        TextAnimPreset::Fade => {
            state.opacity = eased;
        }
        TextAnimPreset::Slide { dir, distance_px } => {
            state.opacity = eased;
            let remaining = (1.0 - eased) * distance_px;
            match dir {
                SlideDir::Left => state.offset_x = remaining,
                SlideDir::Right => state.offset_x = -remaining,
                SlideDir::Up => state.offset_y = remaining,
                SlideDir::Down => state.offset_y = -remaining,
            }
        }
        TextAnimPreset::Scale => {
            state.opacity = eased;
            state.scale_x = eased;
            state.scale_y = eased;
        }
        TextAnimPreset::Blur { max_blur_px } => {
            state.opacity = eased;
            state.blur = (1.0 - eased) * max_blur_px;
        }
        TextAnimPreset::Bounce => {
            state.opacity = progress.min(1.0);
            let bounced = Ease::OutBounce.apply(progress);
            state.scale_x = bounced;
            state.scale_y = bounced;
        }
        TextAnimPreset::Rotate { degrees } => {
            state.opacity = eased;
            state.rotation = (1.0 - eased) * degrees;
        }
        TextAnimPreset::Wave { amplitude_px, speed } => {
            state.offset_y = amplitude_px
                * (absolute_t * speed + unit_index as f64 * 0.5).sin();
        }
        TextAnimPreset::Shake { amplitude_px, speed } => {
            let n = glitch_rand(absolute_t * speed + unit_index as f64) * 2.0 - 1.0;
            state.offset_x = amplitude_px * n;
        }
        TextAnimPreset::Pop => {
            let pop = if progress < 0.6 {
                Ease::OutBack.apply(progress / 0.6)
            } else {
                1.0
            };
            state.opacity = progress.min(1.0);
            state.scale_x = pop;
            state.scale_y = pop;
        }
        TextAnimPreset::Glitch { amplitude_px } => {
            state.opacity = eased;
            let r1 = glitch_rand(unit_relative * 37.0 + unit_index as f64) * 2.0 - 1.0;
            let r2 = glitch_rand(unit_relative * 71.0 + unit_index as f64 * 3.0) * 2.0 - 1.0;
            state.offset_x = r1 * amplitude_px * (1.0 - eased);
            state.offset_y = r2 * amplitude_px * 0.5 * (1.0 - eased);
        }
        TextAnimPreset::Split => {
            state.opacity = eased;
            let dir = if unit_index % 2 == 0 { -1.0 } else { 1.0 };
            state.offset_x = dir * (1.0 - eased) * 24.0;
        }
        TextAnimPreset::Flip => {
            state.opacity = eased;
            state.scale_y = eased;
        }
        TextAnimPreset::WordByWord => {
            state.opacity = if progress >= 0.5 { 1.0 } else { 0.0 };
        }
        TextAnimPreset::Rainbow { speed } => {
            let hue = ((absolute_t * speed + unit_index as f64 * 0.1) % 1.0 + 1.0) % 1.0;
            state.color = Some(hsv_to_rgb8(hue));
        }
    }

    if !phase.is_in && anim.out_duration <= 0.0 && anim.in_duration <= 0.0 {
        // No entry/exit window configured: hold the final (middle-phase) state.
        state.opacity = 1.0;
    }

    state
}

fn hsv_to_rgb8(hue01: f64) -> [u8; 4] {
    let h = hue01 * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as i32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim(preset: TextAnimPreset) -> TextAnimation {
        TextAnimation {
            preset,
            unit: AnimUnit::Character,
            stagger: 0.02,
            in_duration: 0.3,
            out_duration: 0.3,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn typewriter_is_a_hard_step() {
        let a = anim(TextAnimPreset::Typewriter);
        let early = unit_state(&a, 0, 5, 0.0, 1.0, 0.0);
        let late = unit_state(&a, 0, 5, 0.3, 1.0, 0.3);
        assert_eq!(early.opacity, 0.0);
        assert_eq!(late.opacity, 1.0);
    }

    #[test]
    fn fade_in_reaches_full_opacity_at_window_end() {
        let a = anim(TextAnimPreset::Fade);
        let s = unit_state(&a, 0, 1, 0.3, 1.0, 0.3);
        assert!((s.opacity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stagger_delays_later_units() {
        let a = anim(TextAnimPreset::Fade);
        let first = unit_state(&a, 0, 10, 0.05, 1.0, 0.05);
        let later = unit_state(&a, 5, 10, 0.05, 1.0, 0.05);
        assert!(later.opacity <= first.opacity);
    }

    #[test]
    fn wave_is_continuous_and_loops_on_absolute_time() {
        let a = anim(TextAnimPreset::Wave { amplitude_px: 10.0, speed: 1.0 });
        let s1 = unit_state(&a, 0, 1, 5.0, 1.0, 5.0);
        let s2 = unit_state(&a, 0, 1, 5.0, 1.0, 5.0 + std::f64::consts::TAU);
        assert!((s1.offset_y - s2.offset_y).abs() < 1e-6);
    }
}
