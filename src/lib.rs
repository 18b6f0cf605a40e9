//! A timeline composition core for a browser-based nonlinear video editor.
//!
//! This crate is the pure-compute kernel behind the editor: given a
//! [`timeline::Project`] and a sample instant, it answers "what does the
//! canvas look like" without touching the network, the filesystem, or a
//! playback clock — all of that is the host's job.
//!
//! # Pipeline overview
//!
//! 1. **Animate**: keyframes (`animation::keyframe`) and named/custom
//!    easing (`easing`) turn a property timeline into a value at `t`.
//! 2. **Render per layer**: text (`text`), vector graphics and stickers
//!    (`graphics`), and subtitles (`subtitle`) turn a clip plus `t` into a
//!    draw plan.
//! 3. **Composite**: `compositor` blends layers (14 blend modes, chroma
//!    key) into a single premultiplied frame.
//! 4. **Upscale** (optional): `upscale` resizes a composited frame with a
//!    Lanczos/edge-refine/sharpen pipeline.
//! 5. **Audio**: `audio` runs a streaming compressor/EQ/gain chain.
//! 6. **Interop**: `schema` imports/exports a portable JSON animation
//!    document; `timeline` holds the editable project/track/clip model and
//!    its mutation operations.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every evaluation is a pure function of
//!   its inputs and the sample instant `t`.
//! - **No IO**: asset decoding and playback scheduling are the host's job.
//! - **Premultiplied RGBA8** for the SVG raster cache; straight-alpha
//!   `[u8; 4]` for compositor/upscaler buffers (see `foundation::core`).
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

pub mod animation;
pub mod audio;
pub mod compositor;
pub mod easing;
pub mod foundation;
pub mod graphics;
pub mod schema;
pub mod subtitle;
pub mod text;
pub mod timeline;
pub mod upscale;

pub use animation::keyframe::{Keyframe, SampledValue, value_at_time};
pub use animation::transform::{AnimatedTransform, animate_transform, to_affine};
pub use audio::dsp::{AudioParams, DspNode};
pub use compositor::blend::{BlendMode, CompositeLayer, CompositeOutput, Image, composite};
pub use compositor::chroma::{ChromaKeyParams, apply_chroma_key};
pub use easing::Ease;
pub use foundation::core::{Affine, Canvas, Id, Point, Rect, Rgba8Premul, Transform, Vec2};
pub use foundation::error::{CoreError, CoreResult};
pub use graphics::emphasis::{EmphasisAnimation, EmphasisPreset, GraphicDelta};
pub use graphics::entry_exit::{EntryExitAnimation, EntryExitKind};
pub use graphics::render::{GraphicClip, GraphicDrawPlan, GraphicKind, render_graphic};
pub use graphics::shapes::{DrawOp, ShapeKind, ShapeStyle, shape_draw_ops};
pub use graphics::svg::{RasterImage, SvgCache, default_rasterizer, rasterize_svg};
pub use schema::{AnimationSchema, ImportWarning, SchemaValidation, export_animation, import_animation, validate};
pub use subtitle::caption::{CaptionMode, CaptionState, render_caption};
pub use subtitle::srt::{Subtitle, export_srt, parse_srt};
pub use text::animate::{TextAnimPreset, TextAnimation, unit_state};
pub use text::layout::{ParleyTextMetrics, TextLayout, TextMetrics, TextStyle, measure_text};
pub use text::render::{TextClip, TextDrawPlan, render_text};
pub use timeline::clip::{Clip, ClipPayload, EffectSpec, OpaqueClipStyle};
pub use timeline::project::{CanvasSettings, MediaItem, MediaKind, Project};
pub use timeline::track::{Marker, Track, TrackKind, Transition};
pub use timeline::Timeline;
pub use upscale::{Quality, upscale};
