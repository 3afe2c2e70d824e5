//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `Session::update`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod fall;
pub mod layout;
pub mod placement;
pub mod scheduler;
pub mod session;
pub mod spawn;
pub mod state;

pub use fall::advance_falling;
pub use layout::{CategoryBox, PlayArea, Rect};
pub use placement::{Placement, Target, resolve};
pub use scheduler::{Scheduler, TimerHandle};
pub use session::Session;
pub use spawn::{refill_pool, spawn_next};
pub use state::{
    EndReason, FallingWord, GameEvent, GamePhase, Gesture, GestureKind, Outcome, ResolveCause,
    SessionState, SessionSummary, WordId, WordSeed,
};
