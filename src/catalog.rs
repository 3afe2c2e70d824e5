//! Word catalog and data-driven game configuration
//!
//! The catalog maps each category to the words that belong in it. It is
//! loaded once at startup (remote JSON or the embedded fallback) and never
//! mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::WordSeed;

/// Errors produced while building or loading a catalog
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog source could not be retrieved at all.
    Fetch(String),
    /// The payload was not valid JSON or did not have the expected shape.
    Malformed(String),
    /// No category contained a single word.
    Empty,
    /// A category name was blank.
    BlankCategory,
    /// The same category name appeared twice.
    DuplicateCategory(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Fetch(msg) => write!(f, "Failed to fetch word catalog: {msg}"),
            CatalogError::Malformed(msg) => write!(f, "Malformed word catalog: {msg}"),
            CatalogError::Empty => write!(f, "Word catalog contains no words"),
            CatalogError::BlankCategory => write!(f, "Word catalog has a blank category name"),
            CatalogError::DuplicateCategory(name) => {
                write!(f, "Word catalog lists category '{name}' twice")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}

/// One category and its member words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: String,
    pub words: Vec<String>,
}

impl CatalogEntry {
    pub fn new(category: impl Into<String>, words: &[&str]) -> Self {
        Self {
            category: category.into(),
            words: words.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

/// Remote catalog payload: `{ "data": [ { "gamedata": { "<category>": [...] } } ] }`
#[derive(Debug, Deserialize)]
struct ApiResponse {
    data: Vec<ApiItem>,
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    gamedata: serde_json::Map<String, serde_json::Value>,
}

/// Immutable, validated category → words mapping (categories in load order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting blank/duplicate categories and empty word sets
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.category.trim().is_empty() {
                return Err(CatalogError::BlankCategory);
            }
            if entries[..i].iter().any(|e| e.category == entry.category) {
                return Err(CatalogError::DuplicateCategory(entry.category.clone()));
            }
        }
        if entries.iter().all(|e| e.words.is_empty()) {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    /// Parse the remote catalog JSON.
    ///
    /// Categories from every item are merged in document order; a repeated
    /// category replaces the earlier word list in place.
    pub fn from_api_json(json: &str) -> Result<Self, CatalogError> {
        let response: ApiResponse = serde_json::from_str(json)?;

        let mut entries: Vec<CatalogEntry> = Vec::new();
        for item in response.data {
            for (category, words) in item.gamedata {
                let words: Vec<String> = serde_json::from_value(words)?;
                match entries.iter_mut().find(|e| e.category == category) {
                    Some(existing) => existing.words = words,
                    None => entries.push(CatalogEntry { category, words }),
                }
            }
        }

        Self::new(entries)
    }

    /// Embedded dataset used when the remote catalog is unavailable
    pub fn fallback() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("REPTILES", &["Iguana", "Serpiente", "Cocodrilo"]),
                CatalogEntry::new("MAMÍFEROS", &["Perro", "Gato", "Elefante"]),
                CatalogEntry::new("INSECTOS", &["Mariposa", "Hormiga", "Abeja"]),
                CatalogEntry::new("AVES", &["Águila", "Loro", "Pato"]),
            ],
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Category names in display order
    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }

    /// Total number of words across all categories
    pub fn word_count(&self) -> usize {
        self.entries.iter().map(|e| e.words.len()).sum()
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    /// First category listing `word`, if any
    pub fn category_of(&self, word: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.words.iter().any(|w| w == word))
            .map(|e| e.category.as_str())
    }

    /// Every (word, category) pair in catalog order
    pub fn seeds(&self) -> Vec<WordSeed> {
        self.entries
            .iter()
            .flat_map(|e| {
                e.words.iter().map(|w| WordSeed {
                    text: w.clone(),
                    category: e.category.clone(),
                })
            })
            .collect()
    }
}

/// Session tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Countdown length
    pub duration_seconds: u32,
    /// Points for a correct placement (positive)
    pub correct_points: i32,
    /// Points for an incorrect placement or a missed word (non-positive)
    pub incorrect_points: i32,
    /// Pixels a word falls per fall tick
    pub fall_speed: f32,
    /// Delay between two spawns
    pub spawn_interval_ms: u32,
    /// Whether the session reports its result to the results sink
    pub submit_results: bool,
    /// Identifier sent along with submitted attempts
    pub game_id: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 60,
            correct_points: 10,
            incorrect_points: 0,
            fall_speed: 1.5,
            spawn_interval_ms: 1500,
            submit_results: true,
            game_id: 7,
        }
    }
}

impl GameConfig {
    /// Parse a config bundle; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Clamp values the simulation cannot work with
    pub fn validated(mut self) -> Self {
        if self.duration_seconds == 0 {
            log::warn!("durationSeconds must be at least 1, using 1");
            self.duration_seconds = 1;
        }
        if self.correct_points < 1 {
            log::warn!("correctPoints {} is not positive, using 1", self.correct_points);
            self.correct_points = 1;
        }
        if self.incorrect_points > 0 {
            log::warn!("incorrectPoints {} is positive, using 0", self.incorrect_points);
            self.incorrect_points = 0;
        }
        if !self.fall_speed.is_finite() || self.fall_speed <= 0.0 {
            log::warn!("fallSpeed {} is invalid, using default", self.fall_speed);
            self.fall_speed = GameConfig::default().fall_speed;
        }
        if self.spawn_interval_ms == 0 {
            log::warn!("spawnIntervalMs must be at least 1, using 1");
            self.spawn_interval_ms = 1;
        }
        self
    }

    /// Highest score a session can reach with `word_count` words
    pub fn max_obtainable(&self, word_count: usize) -> i64 {
        word_count as i64 * self.correct_points as i64
    }

    /// Score needed for a victory: half the words (rounded down) placed correctly
    pub fn victory_threshold(&self, word_count: usize) -> i64 {
        (word_count / 2) as i64 * self.correct_points as i64
    }
}

/// Everything the catalog loader hands to the core
#[derive(Debug, Clone)]
pub struct GameData {
    pub catalog: Catalog,
    pub config: GameConfig,
}

impl GameData {
    pub fn new(catalog: Catalog, config: GameConfig) -> Self {
        Self {
            catalog,
            config: config.validated(),
        }
    }

    /// Embedded catalog with default tuning
    pub fn fallback() -> Self {
        Self::new(Catalog::fallback(), GameConfig::default())
    }

    /// Use the loaded catalog, or the embedded one if loading failed
    pub fn with_fallback(loaded: Result<Catalog, CatalogError>, config: GameConfig) -> Self {
        let catalog = match loaded {
            Ok(catalog) => {
                log::info!(
                    "Loaded catalog: {} categories, {} words",
                    catalog.entries().len(),
                    catalog.word_count()
                );
                catalog
            }
            Err(e) => {
                log::error!("{e}; using built-in catalog");
                Catalog::fallback()
            }
        };
        Self::new(catalog, config)
    }
}
