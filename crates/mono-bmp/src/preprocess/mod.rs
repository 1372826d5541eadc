//! Geometry: cropping, scaling and placing the source on the label canvas.
//!
//! [`Fit`] computes where the cropped source lands on the canvas;
//! [`compose`] performs the crop, resample and white-background composite.

mod compose;
mod fit;

pub use compose::compose;
pub use fit::Fit;
