//! Session state and core simulation types
//!
//! Exactly one `SessionState` exists per game; it is reset at the start of
//! every session and mutated only by the session controller.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::placement::Placement;
use crate::consts::WORD_HEIGHT;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing scheduled
    Idle,
    /// Words spawn and fall, countdown running
    Running,
    /// Everything frozen, remaining time preserved
    Paused,
    /// Results screen
    Ended,
}

/// Opaque handle of a falling word; the presentation layer maps it to its
/// own renderable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub u32);

/// A word waiting in the unused pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSeed {
    pub text: String,
    pub category: String,
}

/// A word in transit from spawn to resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingWord {
    pub id: WordId,
    pub text: String,
    /// The category this word belongs to
    pub category: String,
    /// Top-left corner inside the play area (x: horizontal, y: vertical)
    pub pos: Vec2,
}

impl FallingWord {
    pub fn from_seed(id: WordId, seed: WordSeed, pos: Vec2) -> Self {
        Self {
            id,
            text: seed.text,
            category: seed.category,
            pos,
        }
    }

    /// Bottom edge if the word were at vertical position `y`
    #[inline]
    pub fn bottom_at(y: f32) -> f32 {
        y + WORD_HEIGHT
    }
}

/// How the player is moving a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    /// Desktop drag and drop
    Drag,
    /// Touch screen
    Touch,
}

/// An in-flight drag or touch gesture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gesture {
    pub word: WordId,
    pub kind: GestureKind,
    /// Pointer position relative to the word's top-left corner at grab time
    pub grab_offset: Vec2,
    /// Category box currently under the pointer
    pub hover: Option<String>,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every word was spawned and resolved
    Exhausted,
    /// The countdown reached zero
    TimedOut,
}

/// End screen classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Timeout,
    Defeat,
}

impl Outcome {
    /// Timer expiry is always a Timeout; otherwise the threshold decides.
    pub fn classify(score: i64, victory_threshold: i64, reason: EndReason) -> Self {
        match reason {
            EndReason::TimedOut => Outcome::Timeout,
            EndReason::Exhausted if score >= victory_threshold => Outcome::Victory,
            EndReason::Exhausted => Outcome::Defeat,
        }
    }
}

/// What removed a word from play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveCause {
    /// Dropped or released by the player
    Placed,
    /// Fell past the loss boundary
    Boundary,
}

/// Final numbers of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: i64,
    pub outcome: Outcome,
    pub reason: EndReason,
    /// Seconds the countdown ran
    pub total_time_secs: u32,
    pub max_obtainable: i64,
    pub victory_threshold: i64,
    pub words_total: usize,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

/// Things the presentation layer (and audio) react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    WordSpawned { id: WordId, text: String, x: f32, y: f32 },
    WordResolved { id: WordId, placement: Placement, cause: ResolveCause },
    ScoreChanged { score: i64, delta: i32 },
    TimeChanged { remaining: u32 },
    HoverChanged { category: Option<String> },
    /// All falling words were torn down (end or return home)
    WordsCleared,
    SessionEnded(SessionSummary),
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Seed the current session's shuffle/spawn positions derive from
    pub seed: u64,
    pub score: i64,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    pub phase: GamePhase,
    /// Words not yet spawned, front is next
    pub unused: VecDeque<WordSeed>,
    /// Falling words (sorted by id, i.e. spawn order)
    pub active: Vec<FallingWord>,
    pub gesture: Option<Gesture>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Summary of the most recently ended session
    pub last_summary: Option<SessionSummary>,
    next_id: u32,
}

impl SessionState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            time_remaining: 0,
            phase: GamePhase::Idle,
            unused: VecDeque::new(),
            active: Vec::new(),
            gesture: None,
            correct_count: 0,
            incorrect_count: 0,
            last_summary: None,
            next_id: 1,
        }
    }

    /// Clear everything for a new session. Word IDs keep counting so a
    /// stale handle from the previous session can never match a new word.
    pub fn reset(&mut self, seed: u64, duration_seconds: u32) {
        self.seed = seed;
        self.score = 0;
        self.time_remaining = duration_seconds;
        self.unused.clear();
        self.active.clear();
        self.gesture = None;
        self.correct_count = 0;
        self.incorrect_count = 0;
    }

    /// Allocate a new word ID (never reused within a process)
    pub fn next_word_id(&mut self) -> WordId {
        let id = WordId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn word(&self, id: WordId) -> Option<&FallingWord> {
        self.active.iter().find(|w| w.id == id)
    }

    pub fn word_mut(&mut self, id: WordId) -> Option<&mut FallingWord> {
        self.active.iter_mut().find(|w| w.id == id)
    }

    /// Remove a word from play; `None` if it was already resolved
    pub fn take_word(&mut self, id: WordId) -> Option<FallingWord> {
        let index = self.active.iter().position(|w| w.id == id)?;
        Some(self.active.remove(index))
    }

    /// Word currently held by a gesture
    pub fn held_word(&self) -> Option<WordId> {
        self.gesture.as_ref().map(|g| g.word)
    }

    /// Nothing left to spawn, nothing falling, nothing in hand
    pub fn is_exhausted(&self) -> bool {
        self.unused.is_empty() && self.active.is_empty() && self.gesture.is_none()
    }

    /// Words in the unused pool or in play
    pub fn words_remaining(&self) -> usize {
        self.unused.len() + self.active.len()
    }
}
