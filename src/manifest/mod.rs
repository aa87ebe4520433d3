//! Manifest module - The metadata.json summary written into the target root
//!
//! Provides:
//! - The manifest document (gameNames, numberOfGames)
//! - Writing it with the expected formatting

pub mod meta;
pub mod store;
