//! Session controller
//!
//! Owns the session state and drives it through
//! Idle → Running ⇄ Paused → Ended → Idle. The host calls `update` once per
//! animation frame with the elapsed wall time; the scheduler turns that into
//! countdown, spawn and fall ticks. Interaction events arrive through the
//! gesture methods in between frames.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::fall::advance_falling;
use super::layout::PlayArea;
use super::placement::{self, Placement, Target};
use super::scheduler::{Scheduler, TimerHandle};
use super::spawn::{refill_pool, spawn_next};
use super::state::{
    EndReason, GameEvent, GamePhase, Gesture, GestureKind, Outcome, ResolveCause, SessionState,
    SessionSummary, WordId,
};
use crate::catalog::{Catalog, GameConfig, GameData};
use crate::consts::*;
use crate::results::ResultsSink;

/// Periodic work driven by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Countdown,
    Spawn,
    Fall,
}

/// One game, reused across sessions
pub struct Session {
    state: SessionState,
    data: GameData,
    area: PlayArea,
    scheduler: Scheduler<Task>,
    spawn_timer: Option<TimerHandle>,
    rng: Pcg32,
    events: Vec<GameEvent>,
    results: Box<dyn ResultsSink>,
}

impl Session {
    pub fn new(data: GameData, results: Box<dyn ResultsSink>) -> Self {
        Self {
            state: SessionState::new(0),
            data,
            area: PlayArea::default(),
            scheduler: Scheduler::new(),
            spawn_timer: None,
            rng: Pcg32::seed_from_u64(0),
            events: Vec::new(),
            results,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.data.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.data.catalog
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    /// The presentation layer reports its size and box layout here
    pub fn set_play_area(&mut self, area: PlayArea) {
        self.area = area;
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn victory_threshold(&self) -> i64 {
        self.data
            .config
            .victory_threshold(self.data.catalog.word_count())
    }

    pub fn max_obtainable(&self) -> i64 {
        self.data.config.max_obtainable(self.data.catalog.word_count())
    }

    // === Transitions ===

    /// Start a session from the start or results screen
    pub fn start(&mut self, seed: u64) -> bool {
        if !matches!(self.state.phase, GamePhase::Idle | GamePhase::Ended) {
            return false;
        }

        self.scheduler.cancel_all();
        self.rng = Pcg32::seed_from_u64(seed);
        self.state
            .reset(seed, self.data.config.duration_seconds);
        refill_pool(&mut self.state, self.data.catalog.seeds(), &mut self.rng);

        self.set_phase(GamePhase::Running);
        self.events.push(GameEvent::ScoreChanged { score: 0, delta: 0 });
        self.events.push(GameEvent::TimeChanged {
            remaining: self.state.time_remaining,
        });

        self.scheduler.schedule(COUNTDOWN_TICK_MS, Task::Countdown);
        self.scheduler.schedule(FALL_TICK_MS, Task::Fall);
        self.spawn_timer = Some(
            self.scheduler
                .schedule(self.data.config.spawn_interval_ms as f64, Task::Spawn),
        );

        log::info!(
            "Session started (seed {seed}, {} words, {}s)",
            self.state.unused.len(),
            self.state.time_remaining
        );

        // First word appears immediately
        self.spawn_tick();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.scheduler.suspend();
        self.set_phase(GamePhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.scheduler.resume();
        self.set_phase(GamePhase::Running);
        true
    }

    /// Pause button: pause when running, resume when paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Finish the running session and report it. No-op unless running.
    pub fn end(&mut self, reason: EndReason) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }

        self.teardown();
        self.set_phase(GamePhase::Ended);

        let summary = self.summarize(reason);
        log::info!(
            "Session ended: {:?} ({:?}) score {} / threshold {}",
            summary.outcome,
            reason,
            summary.score,
            summary.victory_threshold
        );
        self.state.last_summary = Some(summary.clone());
        self.events.push(GameEvent::SessionEnded(summary.clone()));

        if self.data.config.submit_results {
            if let Err(e) = self.results.submit(&summary) {
                log::warn!("{e}");
            }
        }
        true
    }

    /// Back to the start screen from anywhere, dropping the session
    pub fn go_home(&mut self) {
        self.teardown();
        if self.state.phase != GamePhase::Idle {
            self.set_phase(GamePhase::Idle);
        }
    }

    /// Host tick entry point: feed elapsed wall time since the last frame
    pub fn update(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let dt_ms = dt_ms.min(MAX_FRAME_MS);
        for (_, task) in self.scheduler.advance(dt_ms) {
            match task {
                Task::Countdown => self.countdown_tick(),
                Task::Spawn => self.spawn_tick(),
                Task::Fall => self.fall_tick(),
            }
        }
    }

    // === Interaction ===

    /// Grab a falling word. Rejected unless running and the hand is free.
    pub fn begin_gesture(&mut self, id: WordId, kind: GestureKind, pointer: Vec2) -> bool {
        if self.state.phase != GamePhase::Running || self.state.gesture.is_some() {
            return false;
        }
        let Some(grab_offset) = self.state.word(id).map(|w| pointer - w.pos) else {
            return false;
        };
        log::debug!("{kind:?} gesture on {id:?}");
        self.state.gesture = Some(Gesture {
            word: id,
            kind,
            grab_offset,
            hover: None,
        });
        true
    }

    /// Move the held word with the pointer. Touch gestures also hit-test
    /// the category boxes. Frozen while paused.
    pub fn move_gesture(&mut self, pointer: Vec2) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let Some(gesture) = self.state.gesture.as_ref() else {
            return;
        };
        let (id, offset, kind) = (gesture.word, gesture.grab_offset, gesture.kind);
        if let Some(word) = self.state.word_mut(id) {
            word.pos = pointer - offset;
        }

        // Drags get their hover from drag-over reports instead
        if kind == GestureKind::Touch && !self.area.boxes.is_empty() {
            let hover = self.area.category_at(pointer).map(str::to_string);
            self.set_hover(hover);
        }
    }

    /// Drag-over / drag-leave reporting from the presentation layer
    pub fn hover_category(&mut self, category: Option<&str>) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let hover = category
            .filter(|c| self.data.catalog.contains_category(c))
            .map(str::to_string);
        self.set_hover(hover);
    }

    /// Let go of the held word over whatever box it is hovering
    pub fn release_gesture(&mut self) -> Option<Placement> {
        if !matches!(self.state.phase, GamePhase::Running | GamePhase::Paused) {
            return None;
        }
        let gesture = self.state.gesture.take()?;
        if gesture.hover.is_some() {
            self.events.push(GameEvent::HoverChanged { category: None });
        }
        let target = Target::from_category(gesture.hover.as_deref());
        self.resolve_word(gesture.word, target, ResolveCause::Placed)
    }

    /// Desktop drop: `Some(category)` on a box, `None` on the bare play area
    pub fn drop_on(&mut self, category: Option<&str>) -> Option<Placement> {
        if !matches!(self.state.phase, GamePhase::Running | GamePhase::Paused) {
            return None;
        }
        let gesture = self.state.gesture.take()?;
        if gesture.hover.is_some() {
            self.events.push(GameEvent::HoverChanged { category: None });
        }
        self.resolve_word(
            gesture.word,
            Target::from_category(category),
            ResolveCause::Placed,
        )
    }

    /// Abandon the gesture; the word starts falling again from where it is
    pub fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.state.gesture.take() {
            if gesture.hover.is_some() {
                self.events.push(GameEvent::HoverChanged { category: None });
            }
        }
    }

    // === Ticks ===

    fn countdown_tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        self.events.push(GameEvent::TimeChanged {
            remaining: self.state.time_remaining,
        });
        if self.state.time_remaining == 0 {
            self.end(EndReason::TimedOut);
        }
    }

    fn spawn_tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        match spawn_next(&mut self.state, &self.area, &mut self.rng) {
            Some(id) => {
                if let Some(word) = self.state.word(id) {
                    self.events.push(GameEvent::WordSpawned {
                        id,
                        text: word.text.clone(),
                        x: word.pos.x,
                        y: word.pos.y,
                    });
                }
            }
            None => {
                if let Some(handle) = self.spawn_timer.take() {
                    self.scheduler.cancel(handle);
                    log::debug!("Word pool drained, spawning stopped");
                }
            }
        }
    }

    fn fall_tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let crossed = advance_falling(&mut self.state, &self.area, self.data.config.fall_speed);
        for id in crossed {
            self.resolve_word(id, Target::Boundary, ResolveCause::Boundary);
        }
        if self.state.is_exhausted() {
            self.end(EndReason::Exhausted);
        }
    }

    // === Internals ===

    /// Score and remove a word. A word that is no longer in play has
    /// already been scored and is ignored.
    fn resolve_word(
        &mut self,
        id: WordId,
        target: Target<'_>,
        cause: ResolveCause,
    ) -> Option<Placement> {
        let Some(word) = self.state.take_word(id) else {
            log::warn!("{id:?} already resolved, ignoring {cause:?}");
            return None;
        };
        if self.state.held_word() == Some(id) {
            self.state.gesture = None;
        }

        let placement = placement::resolve(&word, target, &self.data.config);
        self.state.score += placement.points as i64;
        if placement.correct {
            self.state.correct_count += 1;
        } else {
            self.state.incorrect_count += 1;
        }
        log::debug!(
            "'{}' ({}) → {:?}: {:+}",
            word.text,
            word.category,
            target,
            placement.points
        );

        self.events.push(GameEvent::WordResolved {
            id,
            placement,
            cause,
        });
        self.events.push(GameEvent::ScoreChanged {
            score: self.state.score,
            delta: placement.points,
        });
        Some(placement)
    }

    /// Cancel all scheduled work and remove every word in play
    fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.spawn_timer = None;
        self.state.gesture = None;
        if !self.state.active.is_empty() {
            self.state.active.clear();
            self.events.push(GameEvent::WordsCleared);
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.state.phase;
        self.state.phase = to;
        log::info!("Phase {from:?} → {to:?}");
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    fn set_hover(&mut self, hover: Option<String>) {
        let Some(gesture) = self.state.gesture.as_mut() else {
            return;
        };
        if gesture.hover != hover {
            gesture.hover = hover.clone();
            self.events.push(GameEvent::HoverChanged { category: hover });
        }
    }

    fn summarize(&self, reason: EndReason) -> SessionSummary {
        let threshold = self.victory_threshold();
        SessionSummary {
            score: self.state.score,
            outcome: Outcome::classify(self.state.score, threshold, reason),
            reason,
            total_time_secs: self
                .data
                .config
                .duration_seconds
                .saturating_sub(self.state.time_remaining),
            max_obtainable: self.max_obtainable(),
            victory_threshold: threshold,
            words_total: self.data.catalog.word_count(),
            correct_count: self.state.correct_count,
            incorrect_count: self.state.incorrect_count,
        }
    }
}
