//! Public API for the mono-bmp crate.
//!
//! This module provides the high-level API: [`MonoEncoder`] builder,
//! the [`encode()`] shortcut and the [`EncodeError`] error type.

mod builder;
mod error;

pub use builder::{encode, MonoEncoder};
pub use error::EncodeError;
