//! Emphasis animation (§4.F step 3): 25 continuous presets applied to a
//! graphic (or text) layer once it's outside its entry/exit windows.

use crate::foundation::core::Vec2;

/// Additive/multiplicative delta produced by entry/exit and emphasis
/// animation, composed into the layer's final transform (§4.F step 4).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicDelta {
    /// Added to position.
    pub offset: Vec2,
    /// Multiplied into scale.
    pub scale: Vec2,
    /// Added to rotation, degrees.
    pub rotation: f64,
    /// Multiplied into opacity.
    pub opacity: f64,
}

impl Default for GraphicDelta {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

/// The closed set of 25 continuous emphasis presets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmphasisPreset {
    Pulse,
    Shake,
    Bounce,
    Float,
    Spin,
    Flash,
    Heartbeat,
    Swing,
    Wobble,
    Jello,
    RubberBand,
    Tada,
    Vibrate,
    Flicker,
    Glow,
    Breathe,
    Wave,
    Tilt,
    ZoomPulse,
    FocusZoom,
    PanL,
    PanR,
    PanU,
    PanD,
    KenBurns,
}

/// Emphasis animation parameters attached to a clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmphasisAnimation {
    pub preset: EmphasisPreset,
    pub speed: f64,
    pub intensity: f64,
    pub loop_: bool,
    pub start_time: f64,
    pub animation_duration: f64,
}

/// Evaluate the emphasis delta at absolute time `t`.
///
/// `cycleTime = loop ? ((t-startTime)*speed) % 1 : min((t-startTime)*speed, 1)`,
/// and returns identity before `startTime` and after
/// `startTime + animationDuration`.
pub fn evaluate(anim: &EmphasisAnimation, t: f64) -> GraphicDelta {
    if t < anim.start_time || t > anim.start_time + anim.animation_duration {
        return GraphicDelta::default();
    }

    let raw = (t - anim.start_time) * anim.speed;
    let cycle = if anim.loop_ {
        let c = raw % 1.0;
        if c < 0.0 { c + 1.0 } else { c }
    } else {
        raw.min(1.0)
    };
    let i = anim.intensity;
    let mut d = GraphicDelta::default();

    match anim.preset {
        EmphasisPreset::Pulse => {
            let s = 1.0 + i * (std::f64::consts::TAU * cycle).sin().abs() * 0.2;
            d.scale = Vec2::new(s, s);
        }
        EmphasisPreset::Shake => {
            d.offset.x = i * (std::f64::consts::TAU * cycle * 8.0).sin() * 10.0;
        }
        EmphasisPreset::Bounce => {
            d.offset.y = -i * (std::f64::consts::PI * cycle).sin().abs() * 20.0;
        }
        EmphasisPreset::Float => {
            d.offset.y = i * (std::f64::consts::TAU * cycle).sin() * 8.0;
        }
        EmphasisPreset::Spin => {
            d.rotation = cycle * 360.0;
        }
        EmphasisPreset::Flash => {
            d.opacity = 0.5 + 0.5 * (std::f64::consts::TAU * cycle).cos().abs();
        }
        EmphasisPreset::Heartbeat => {
            let beat = ((std::f64::consts::TAU * cycle * 2.0).sin().max(0.0)).powf(2.0);
            d.scale = Vec2::new(1.0 + i * beat * 0.15, 1.0 + i * beat * 0.15);
        }
        EmphasisPreset::Swing => {
            d.rotation = i * (std::f64::consts::TAU * cycle).sin() * 15.0;
        }
        EmphasisPreset::Wobble => {
            d.offset.x = i * (std::f64::consts::TAU * cycle * 2.0).sin() * 12.0;
            d.rotation = i * (std::f64::consts::TAU * cycle * 2.0).sin() * 8.0;
        }
        EmphasisPreset::Jello => {
            let decay = (1.0 - cycle).max(0.0);
            d.rotation = i * decay * (std::f64::consts::TAU * cycle * 3.0).sin() * 10.0;
        }
        EmphasisPreset::RubberBand => {
            let s = 1.0 + i * ((std::f64::consts::TAU * cycle * 2.0).sin() * (1.0 - cycle)) * 0.3;
            d.scale = Vec2::new(s, 2.0 - s);
        }
        EmphasisPreset::Tada => {
            let s = 1.0 + i * (std::f64::consts::TAU * cycle * 4.0).sin().abs() * 0.1;
            d.scale = Vec2::new(s, s);
            d.rotation = i * (std::f64::consts::TAU * cycle * 4.0).sin() * 3.0;
        }
        EmphasisPreset::Vibrate => {
            d.offset = Vec2::new(
                i * (std::f64::consts::TAU * cycle * 20.0).sin() * 2.0,
                i * (std::f64::consts::TAU * cycle * 23.0).cos() * 2.0,
            );
        }
        EmphasisPreset::Flicker => {
            d.opacity = if (std::f64::consts::TAU * cycle * 10.0).sin() > 0.0 {
                1.0
            } else {
                1.0 - i.clamp(0.0, 1.0)
            };
        }
        EmphasisPreset::Glow => {
            d.opacity = 0.7 + 0.3 * (std::f64::consts::TAU * cycle).sin().abs();
        }
        EmphasisPreset::Breathe => {
            let s = 1.0 + i * (std::f64::consts::TAU * cycle).sin() * 0.1;
            d.scale = Vec2::new(s, s);
        }
        EmphasisPreset::Wave => {
            d.offset.y = i * (std::f64::consts::TAU * cycle).sin() * 10.0;
            d.rotation = i * (std::f64::consts::TAU * cycle).cos() * 5.0;
        }
        EmphasisPreset::Tilt => {
            d.rotation = i * (std::f64::consts::TAU * cycle).sin() * 6.0;
        }
        EmphasisPreset::ZoomPulse => {
            let s = 1.0 + i * (std::f64::consts::TAU * cycle * 2.0).sin().abs() * 0.25;
            d.scale = Vec2::new(s, s);
        }
        EmphasisPreset::FocusZoom => {
            let s = 1.0 + i * cycle * 0.15;
            d.scale = Vec2::new(s, s);
        }
        EmphasisPreset::PanL => d.offset.x = -i * cycle * 40.0,
        EmphasisPreset::PanR => d.offset.x = i * cycle * 40.0,
        EmphasisPreset::PanU => d.offset.y = -i * cycle * 40.0,
        EmphasisPreset::PanD => d.offset.y = i * cycle * 40.0,
        EmphasisPreset::KenBurns => {
            let s = 1.0 + i * cycle * 0.2;
            d.scale = Vec2::new(s, s);
            d.offset = Vec2::new(i * cycle * 15.0, i * cycle * 10.0);
        }
    }

    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim(preset: EmphasisPreset) -> EmphasisAnimation {
        EmphasisAnimation {
            preset,
            speed: 1.0,
            intensity: 1.0,
            loop_: true,
            start_time: 0.0,
            animation_duration: 10.0,
        }
    }

    #[test]
    fn identity_before_start_and_after_duration() {
        let a = anim(EmphasisPreset::Spin);
        assert_eq!(evaluate(&a, -1.0), GraphicDelta::default());
        assert_eq!(evaluate(&a, 11.0), GraphicDelta::default());
    }

    #[test]
    fn looping_cycle_wraps_into_unit_interval() {
        let a = anim(EmphasisPreset::Spin);
        let d1 = evaluate(&a, 0.25);
        let d2 = evaluate(&a, 1.25);
        assert!((d1.rotation - d2.rotation).abs() < 1e-9);
    }

    #[test]
    fn non_looping_clamps_at_one_cycle() {
        let mut a = anim(EmphasisPreset::Spin);
        a.loop_ = false;
        let d = evaluate(&a, 5.0);
        assert_eq!(d.rotation, 360.0);
    }
}
