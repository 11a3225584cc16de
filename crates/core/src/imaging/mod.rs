//! Image acceptance checks.
//!
//! - `classify` - content-type and extension gate, no byte inspection
//! - `dimensions` - header decode and pixel bound checks

mod classify;
mod dimensions;

pub use classify::{ACCEPTED_EXTENSIONS, is_image};
pub use dimensions::{DimensionLimits, ImageDimensions, is_within_dimensions, read_dimensions};

#[cfg(test)]
pub(crate) use dimensions::test_images;
