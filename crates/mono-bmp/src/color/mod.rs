//! Luminance and black/white classification.
//!
//! Printers only know "ink" and "no ink", so colour handling reduces to a
//! single weighted luminance value compared against a threshold.

mod luma;

pub use luma::{luma, Threshold};
