//! Backends module - Filesystem operations and external tool integration
//!
//! Provides:
//! - discover: Unit discovery with walkdir
//! - copy: Replace-and-copy of unit trees
//! - build: Code file lookup and the external build command

pub mod build;
pub mod copy;
pub mod discover;
