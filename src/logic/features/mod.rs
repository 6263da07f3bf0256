//! Feature schema: the authoritative layout and the sample type built on it.

pub mod layout;
pub mod sample;

pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use sample::WaterSample;
