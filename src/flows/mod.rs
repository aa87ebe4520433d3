//! Flows module - Operations combining several backends
//!
//! Provides:
//! - sync: discover, copy, build and write the manifest in one run

pub mod sync;
