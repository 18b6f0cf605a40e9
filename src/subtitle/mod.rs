//! Subtitle Engine (§4.G): SRT parse/emit, CRUD operations, and the
//! animated caption renderer.

pub mod caption;
pub mod srt;

pub use caption::{CaptionMode, CaptionState, WordState, render_caption};
pub use srt::{Subtitle, Word, export_srt, parse_srt};
