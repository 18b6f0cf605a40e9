//! Entry/exit animation (§4.F step 2): applied while `t` is within the
//! clip's entry or exit window, converting eased progress into a
//! [`GraphicDelta`].

use crate::easing::Ease;
use crate::foundation::core::Vec2;
use crate::graphics::emphasis::GraphicDelta;

/// The closed set of entry/exit animation kinds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryExitKind {
    Fade,
    SlideL,
    SlideR,
    SlideU,
    SlideD,
    Scale,
    Rotate,
    Bounce,
    Pop,
    Draw,
    WipeL,
    WipeR,
    WipeU,
    WipeD,
    RevealCenter,
    RevealEdges,
    Elastic,
    FlipH,
    FlipV,
}

/// An entry or exit animation attached to a clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntryExitAnimation {
    pub kind: EntryExitKind,
    pub ease: Ease,
    pub distance_px: f64,
    pub degrees: f64,
}

/// Evaluate the delta for `kind` at raw (unreversed) progress `progress`
/// in `[0,1]`, where `0` is "not yet appeared"/"fully gone" and `1` is
/// "fully in place". Callers invert progress for exit windows before
/// calling this.
pub fn apply(anim: &EntryExitAnimation, progress: f64) -> GraphicDelta {
    let progress = progress.clamp(0.0, 1.0);
    let eased = anim.ease.apply(progress);
    let mut d = GraphicDelta::default();

    match anim.kind {
        EntryExitKind::Fade => {
            d.opacity = eased;
        }
        EntryExitKind::SlideL => {
            d.opacity = eased;
            d.offset.x = (1.0 - eased) * -anim.distance_px;
        }
        EntryExitKind::SlideR => {
            d.opacity = eased;
            d.offset.x = (1.0 - eased) * anim.distance_px;
        }
        EntryExitKind::SlideU => {
            d.opacity = eased;
            d.offset.y = (1.0 - eased) * -anim.distance_px;
        }
        EntryExitKind::SlideD => {
            d.opacity = eased;
            d.offset.y = (1.0 - eased) * anim.distance_px;
        }
        EntryExitKind::Scale => {
            d.opacity = eased;
            d.scale = Vec2::new(eased, eased);
        }
        EntryExitKind::Rotate => {
            d.opacity = eased;
            d.rotation = (1.0 - eased) * anim.degrees;
        }
        EntryExitKind::Bounce => {
            let b = Ease::OutBounce.apply(progress);
            d.opacity = progress.min(1.0);
            d.scale = Vec2::new(b, b);
        }
        EntryExitKind::Pop => {
            let p = Ease::OutBack.apply(progress);
            d.opacity = progress.min(1.0);
            d.scale = Vec2::new(p, p);
        }
        EntryExitKind::Draw => {
            // Progressive stroke reveal: caller uses `opacity` as the
            // path-length fraction to draw.
            d.opacity = eased;
        }
        EntryExitKind::WipeL | EntryExitKind::WipeR | EntryExitKind::WipeU | EntryExitKind::WipeD => {
            // Caller clips the draw region using `eased` as the reveal
            // fraction along the wipe axis; opacity stays full.
            d.opacity = if progress > 0.0 { 1.0 } else { 0.0 };
        }
        EntryExitKind::RevealCenter | EntryExitKind::RevealEdges => {
            d.opacity = if progress > 0.0 { 1.0 } else { 0.0 };
        }
        EntryExitKind::Elastic => {
            let e = Ease::OutElastic.apply(progress);
            d.opacity = progress.min(1.0);
            d.scale = Vec2::new(e, e);
        }
        EntryExitKind::FlipH => {
            d.opacity = eased;
            d.scale = Vec2::new(eased, 1.0);
        }
        EntryExitKind::FlipV => {
            d.opacity = eased;
            d.scale = Vec2::new(1.0, eased);
        }
    }

    d
}
