//! Graphics Engine (§4.F): shapes, SVGs, and stickers share one
//! animated-state pipeline (transform -> entry/exit -> emphasis) before
//! their own draw-plan generation.

pub mod emphasis;
pub mod entry_exit;
pub mod render;
pub mod shapes;
pub mod svg;

pub use emphasis::{EmphasisAnimation, EmphasisPreset, evaluate as evaluate_emphasis};
pub use entry_exit::{EntryExitAnimation, EntryExitKind, apply as apply_entry_exit};
pub use render::{GraphicClip, GraphicDrawPlan, GraphicKind, render_graphic};
pub use shapes::{Gradient, GradientKind, ShapeKind, ShapeStyle, Stroke, shape_draw_ops, DrawOp};
pub use svg::{ColorMode, ColorStyle, SvgCache, default_rasterizer, rasterize_svg};
