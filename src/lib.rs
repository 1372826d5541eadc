//! Labeldeck - label template manager for thermal label printers
//!
//! Keeps a directory of 1-bit template bitmaps and the two printer scripts
//! referencing them in sync. This library exposes modules for integration
//! testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod ledger;
pub mod models;
pub mod server;
pub mod services;
