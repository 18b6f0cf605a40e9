//! Animation Kernel (§4.B) and Transform Animator (§4.C).

pub mod keyframe;
pub mod transform;

pub use keyframe::{Keyframe, SampledValue, add_keyframe, interpolate_value, remove_keyframe, update_keyframe, value_at_time};
pub use transform::{AnimatedTransform, animate_transform, to_affine};
