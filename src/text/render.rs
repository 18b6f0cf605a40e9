//! Text Render Engine (§4.E): turns a text clip + measured/animated
//! layout into an ordered, backend-agnostic draw plan. The actual glyph
//! rasterization is a host/backend concern (§6 `TextMetrics`); this
//! module only decides *what* to draw and in what transformed state.

use crate::animation::keyframe::Keyframe;
use crate::animation::transform::animate_transform;
use crate::foundation::core::{Rect, Transform, Vec2};
use crate::graphics::emphasis::{self, EmphasisAnimation};
use crate::text::animate::{TextAnimation, unit_state};
use crate::text::layout::{TextLayout, TextMetrics, TextStyle, measure_text};

/// Visual styling for a text clip, independent of animation.
#[derive(Clone, Debug)]
pub struct TextRenderStyle {
    pub text_style: TextStyle,
    pub color: [u8; 4],
    pub stroke_color: Option<[u8; 4]>,
    pub stroke_width: f64,
    pub background_color: Option<[u8; 4]>,
    pub shadow_color: Option<[u8; 4]>,
    pub shadow_blur: f64,
    pub shadow_offset: Vec2,
}

/// A text clip as consumed by the render engine.
#[derive(Clone, Debug)]
pub struct TextClip {
    pub text: String,
    pub style: TextRenderStyle,
    pub animation: Option<TextAnimation>,
    pub emphasis: Option<EmphasisAnimation>,
    pub transform: Transform,
    pub keyframes: Vec<Keyframe>,
    pub start_time: f64,
    pub duration: f64,
}

/// A single glyph's resolved draw instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphDraw {
    pub ch: char,
    pub x: f64,
    pub y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub opacity: f64,
    pub blur: f64,
    pub color: [u8; 4],
}

/// Everything the backend needs to paint one frame of a text clip.
#[derive(Clone, Debug)]
pub struct TextDrawPlan {
    pub canvas_transform: crate::foundation::core::Affine,
    pub global_alpha: f64,
    pub background_box: Option<Rect>,
    pub glyphs: Vec<GlyphDraw>,
    pub stroke_before_fill: bool,
}

/// Render a text clip at time `t` into a draw plan.
pub fn render_text(
    clip: &TextClip,
    canvas: Vec2,
    t: f64,
    metrics: &dyn TextMetrics,
) -> crate::foundation::error::CoreResult<TextDrawPlan> {
    let layout: TextLayout = measure_text(&clip.text, &clip.style.text_style, metrics)?;

    let animated = animate_transform(&clip.transform, &clip.keyframes, t);
    let mut global_alpha = animated.transform.opacity;

    let relative = t - clip.start_time;
    let box_size = Vec2::new(layout.total_width.max(1.0), layout.total_height.max(1.0));

    let mut glyphs = Vec::with_capacity(layout.characters.len());
    for ch in &layout.characters {
        let mut state = clip
            .animation
            .as_ref()
            .map(|a| {
                unit_state(
                    a,
                    ch.global_index,
                    layout.characters.len(),
                    relative,
                    clip.duration,
                    t,
                )
            })
            .unwrap_or_default();

        // Emphasis modulation only applies outside the clip's own
        // entry/exit animation windows (§4.E step 2 / §4.F step 3).
        let in_entry_exit = clip
            .animation
            .as_ref()
            .map(|a| relative < a.in_duration || relative >= clip.duration - a.out_duration)
            .unwrap_or(false);

        if !in_entry_exit {
            if let Some(emph) = &clip.emphasis {
                let e = emphasis::evaluate(emph, t);
                state.offset_x += e.offset.x;
                state.offset_y += e.offset.y;
                state.scale_x *= e.scale.x;
                state.scale_y *= e.scale.y;
                state.rotation += e.rotation;
                state.opacity *= e.opacity;
            }
        }

        glyphs.push(GlyphDraw {
            ch: ch.ch,
            x: ch.x,
            y: ch.y,
            offset_x: state.offset_x,
            offset_y: state.offset_y,
            rotation: state.rotation,
            scale_x: state.scale_x,
            scale_y: state.scale_y,
            opacity: state.opacity,
            blur: state.blur,
            color: state.color.unwrap_or(clip.style.color),
        });
    }

    global_alpha = global_alpha.clamp(0.0, 1.0);

    let background_box = clip.style.background_color.map(|_| Rect {
        x0: 0.0,
        y0: 0.0,
        x1: box_size.x,
        y1: box_size.y,
    });

    Ok(TextDrawPlan {
        canvas_transform: animated.transform.to_affine(canvas),
        global_alpha,
        background_box,
        glyphs,
        stroke_before_fill: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Ease;
    use crate::text::animate::{AnimUnit, TextAnimPreset};

    struct FixedWidth(f64);
    impl TextMetrics for FixedWidth {
        fn width(&self, _t: &str, _f: &str, _s: f32, _w: u16) -> f64 {
            self.0
        }
    }

    fn style() -> TextRenderStyle {
        TextRenderStyle {
            text_style: TextStyle {
                font: "sans".into(),
                size_px: 10.0,
                weight: 400,
                letter_spacing: 0.0,
                line_height: 1.2,
            },
            color: [255, 255, 255, 255],
            stroke_color: None,
            stroke_width: 0.0,
            background_color: None,
            shadow_color: None,
            shadow_blur: 0.0,
            shadow_offset: Vec2::ZERO,
        }
    }

    #[test]
    fn renders_one_glyph_per_char() {
        let clip = TextClip {
            text: "Hi".into(),
            style: style(),
            animation: None,
            emphasis: None,
            transform: Transform::default(),
            keyframes: vec![],
            start_time: 0.0,
            duration: 1.0,
        };
        let plan = render_text(&clip, Vec2::new(100.0, 100.0), 0.5, &FixedWidth(5.0)).unwrap();
        assert_eq!(plan.glyphs.len(), 2);
    }

    #[test]
    fn fade_preset_drives_per_char_opacity() {
        let clip = TextClip {
            text: "Hi".into(),
            style: style(),
            animation: Some(TextAnimation {
                preset: TextAnimPreset::Fade,
                unit: AnimUnit::Character,
                stagger: 0.0,
                in_duration: 1.0,
                out_duration: 0.0,
                ease: Ease::Linear,
            }),
            emphasis: None,
            transform: Transform::default(),
            keyframes: vec![],
            start_time: 0.0,
            duration: 2.0,
        };
        let plan = render_text(&clip, Vec2::new(100.0, 100.0), 0.5, &FixedWidth(5.0)).unwrap();
        assert!(plan.glyphs[0].opacity > 0.0 && plan.glyphs[0].opacity < 1.0);
    }
}
