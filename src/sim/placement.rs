//! Placement resolution
//!
//! Decides how many points a word earns for where it ended up. Pure: the
//! caller removes the word and applies the score.

use serde::{Deserialize, Serialize};

use super::state::FallingWord;
use crate::catalog::GameConfig;

/// Where a word was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// Released over a category box
    Category(&'a str),
    /// Released inside the play area but outside every box
    PlayArea,
    /// Fell past the loss boundary
    Boundary,
}

impl<'a> Target<'a> {
    /// Map an optional category (drop/touch reporting) to a target
    pub fn from_category(category: Option<&'a str>) -> Self {
        match category {
            Some(c) => Target::Category(c),
            None => Target::PlayArea,
        }
    }

    pub fn category(&self) -> Option<&'a str> {
        match self {
            Target::Category(c) => Some(c),
            Target::PlayArea | Target::Boundary => None,
        }
    }
}

/// Scored outcome of one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub correct: bool,
    pub points: i32,
}

/// Score `word` against `target`.
///
/// Only a category equal to the word's own scores `correct_points`; any
/// other category, the bare play area, and the loss boundary all score
/// `incorrect_points`.
pub fn resolve(word: &FallingWord, target: Target<'_>, config: &GameConfig) -> Placement {
    let correct = target.category() == Some(word.category.as_str());
    Placement {
        correct,
        points: if correct {
            config.correct_points
        } else {
            config.incorrect_points
        },
    }
}
