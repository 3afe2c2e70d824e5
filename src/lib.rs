//! Word Sort - a falling-words classification arcade game
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (spawning, falling, scoring)
//! - `catalog`: Word catalog and data-driven game configuration
//! - `results`: End-of-session reporting
//! - `platform`: Browser glue (fetch, storage, JS bindings)

pub mod audio;
pub mod catalog;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod results;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, CatalogEntry, CatalogError, GameConfig, GameData};
pub use highscores::HighScores;
pub use results::{AttemptRecord, ResultsError, ResultsSink};
pub use settings::Settings;
pub use sim::{GamePhase, Outcome, Session, SessionSummary};

/// Game configuration constants
pub mod consts {
    /// Fall simulation tick period (60 Hz, one animation frame)
    pub const FALL_TICK_MS: f64 = 1000.0 / 60.0;
    /// Countdown period
    pub const COUNTDOWN_TICK_MS: f64 = 1000.0;
    /// Longest frame delta the host loop may feed in one update.
    /// Anything beyond this (tab in background, debugger) is dropped.
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Rendered word box width (pixels)
    pub const WORD_WIDTH: f32 = 90.0;
    /// Rendered word box height (pixels)
    pub const WORD_HEIGHT: f32 = 45.0;
    /// Minimum distance between a freshly spawned word and the left edge
    pub const SPAWN_MIN_X: f32 = 10.0;
    /// Distance between the loss boundary and the bottom of the play area
    pub const LOSS_MARGIN: f32 = 10.0;

    /// Default play area used before the host reports its real size
    pub const DEFAULT_AREA_WIDTH: f32 = 800.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 600.0;
}
