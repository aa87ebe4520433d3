//! Manifest document

use serde::{Deserialize, Serialize};

/// Summary of a run, stored as `<target>/metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Normalized unit names, in discovery order
    pub game_names: Vec<String>,

    /// Always equal to `game_names.len()`
    pub number_of_games: usize,
}

impl Manifest {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            number_of_games: names.len(),
            game_names: names,
        }
    }
}
