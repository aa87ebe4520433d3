//! Core module - Configuration, run model and shared utilities
//!
//! This module provides:
//! - Run configuration and defaults
//! - Error taxonomy
//! - Unit / report model
//! - Name normalization
//! - Rendering of run reports
//! - Path utilities and the working-directory guard

pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod paths;
pub mod render;
pub mod util;
pub mod workdir;
