//! Audio DSP Node (§4.H).

pub mod dsp;

pub use dsp::{AudioParams, DspNode};
