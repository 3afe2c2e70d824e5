//! Property tests for scoring and the session state machine

use std::collections::HashMap;

use glam::Vec2;
use proptest::prelude::*;
use word_sort::consts::FALL_TICK_MS;
use word_sort::results::MemorySink;
use word_sort::sim::{
    EndReason, FallingWord, GameEvent, GamePhase, GestureKind, Outcome, PlayArea, Target, WordId,
    resolve,
};
use word_sort::{Catalog, GameConfig, GameData, Session};

#[derive(Debug, Clone, Copy)]
enum Action {
    Wait(u8),
    PlaceCorrect,
    PlaceWrong,
    DropOnArea,
    Grab,
    Release,
    PauseResume(u8),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (1u8..60).prop_map(Action::Wait),
        2 => Just(Action::PlaceCorrect),
        1 => Just(Action::PlaceWrong),
        1 => Just(Action::DropOnArea),
        1 => Just(Action::Grab),
        1 => Just(Action::Release),
        1 => (0u8..30).prop_map(Action::PauseResume),
    ]
}

fn new_session(incorrect_points: i32, height: f32) -> Session {
    let config = GameConfig {
        incorrect_points,
        ..GameConfig::default()
    };
    let mut session = Session::new(
        GameData::new(Catalog::fallback(), config),
        Box::new(MemorySink::new()),
    );
    session.set_play_area(PlayArea::new(400.0, height));
    session
}

fn frames(session: &mut Session, n: u32, events: &mut Vec<GameEvent>) {
    for _ in 0..n {
        session.update(FALL_TICK_MS);
    }
    events.extend(session.drain_events());
}

fn apply(session: &mut Session, action: Action, events: &mut Vec<GameEvent>) {
    let oldest = session.state().active.first().cloned();
    let wrong_category = |word: &FallingWord, session: &Session| {
        session
            .catalog()
            .categories()
            .into_iter()
            .find(|c| *c != word.category)
            .map(str::to_string)
    };

    match action {
        Action::Wait(n) => frames(session, n as u32, events),
        Action::PlaceCorrect => {
            if let Some(word) = oldest {
                session.begin_gesture(word.id, GestureKind::Drag, word.pos);
                session.drop_on(Some(&word.category));
                // Second drop of the same word must be ignored
                session.drop_on(Some(&word.category));
            }
        }
        Action::PlaceWrong => {
            if let Some(word) = oldest {
                let other = wrong_category(&word, session);
                session.begin_gesture(word.id, GestureKind::Drag, word.pos);
                session.drop_on(other.as_deref());
            }
        }
        Action::DropOnArea => {
            if let Some(word) = oldest {
                session.begin_gesture(word.id, GestureKind::Touch, word.pos);
                session.move_gesture(word.pos + Vec2::new(3.0, 3.0));
                session.drop_on(None);
            }
        }
        Action::Grab => {
            if let Some(word) = oldest {
                session.begin_gesture(word.id, GestureKind::Touch, word.pos);
            }
        }
        Action::Release => {
            session.release_gesture();
        }
        Action::PauseResume(n) => {
            session.pause();
            frames(session, n as u32, events);
            session.resume();
        }
    }
    events.extend(session.drain_events());
}

/// Drive a session to its end with the given script, then idle it out
fn run_script(session: &mut Session, seed: u64, script: &[Action]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    session.start(seed);
    for &action in script {
        if session.phase() == GamePhase::Ended {
            break;
        }
        apply(session, action, &mut events);
    }
    session.cancel_gesture();
    let mut guard = 0;
    while session.phase() != GamePhase::Ended && guard < 5_000 {
        session.resume();
        frames(session, 1, &mut events);
        guard += 1;
    }
    events
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_resolve_scores_by_category(
        correct in 1i32..100,
        incorrect in -100i32..=0,
        word_idx in 0usize..12,
        target_idx in 0usize..5,
    ) {
        let config = GameConfig {
            correct_points: correct,
            incorrect_points: incorrect,
            ..GameConfig::default()
        };
        let catalog = Catalog::fallback();
        let seed = catalog.seeds()[word_idx].clone();
        let word = FallingWord::from_seed(WordId(1), seed, Vec2::ZERO);
        let categories = catalog.categories();

        let target = match categories.get(target_idx) {
            Some(c) => Target::Category(c),
            None => Target::PlayArea,
        };
        let placement = resolve(&word, target, &config);

        if target.category() == Some(word.category.as_str()) {
            prop_assert!(placement.correct);
            prop_assert_eq!(placement.points, correct);
        } else {
            prop_assert!(!placement.correct);
            prop_assert_eq!(placement.points, incorrect);
        }
        prop_assert_eq!(resolve(&word, Target::Boundary, &config).points, incorrect);
    }

    #[test]
    fn prop_pause_resume_round_trip(seed in any::<u64>(), warmup in 0u32..900, paused_frames in 0u32..600) {
        let mut session = new_session(0, 500.0);
        let mut events = Vec::new();
        session.start(seed);
        frames(&mut session, warmup, &mut events);
        prop_assume!(session.phase() == GamePhase::Running);

        let before = session.state().clone();
        prop_assert!(session.pause());
        frames(&mut session, paused_frames, &mut events);
        prop_assert!(session.resume());
        let after = session.state();

        prop_assert_eq!(after.score, before.score);
        prop_assert_eq!(after.time_remaining, before.time_remaining);
        prop_assert_eq!(&after.unused, &before.unused);
        let ids = |s: &word_sort::sim::SessionState| s.active.iter().map(|w| w.id).collect::<Vec<_>>();
        prop_assert_eq!(ids(after), ids(&before));
        for (a, b) in after.active.iter().zip(&before.active) {
            prop_assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn prop_each_word_scored_at_most_once(
        seed in any::<u64>(),
        incorrect in -10i32..=0,
        script in prop::collection::vec(action(), 0..80),
    ) {
        let mut session = new_session(incorrect, 500.0);
        let events = run_script(&mut session, seed, &script);
        prop_assert_eq!(session.phase(), GamePhase::Ended);

        let mut resolved: HashMap<WordId, usize> = HashMap::new();
        let mut points = 0i64;
        for event in &events {
            if let GameEvent::WordResolved { id, placement, .. } = event {
                *resolved.entry(*id).or_default() += 1;
                points += placement.points as i64;
            }
        }
        prop_assert!(resolved.values().all(|&n| n == 1));

        let summary = session.state().last_summary.clone().unwrap();
        let scored = (summary.correct_count + summary.incorrect_count) as usize;
        prop_assert_eq!(scored, resolved.len());
        prop_assert!(scored <= summary.words_total);
        prop_assert_eq!(summary.score, points);
        prop_assert_eq!(
            summary.score,
            summary.correct_count as i64 * 10 + summary.incorrect_count as i64 * incorrect as i64
        );
    }

    #[test]
    fn prop_end_reason_matches_outcome(
        seed in any::<u64>(),
        tall in any::<bool>(),
        script in prop::collection::vec(action(), 0..80),
    ) {
        let height = if tall { 20_000.0 } else { 500.0 };
        let mut session = new_session(0, height);
        run_script(&mut session, seed, &script);

        let summary = session.state().last_summary.clone().unwrap();
        match summary.reason {
            EndReason::TimedOut => {
                prop_assert_eq!(summary.outcome, Outcome::Timeout);
                prop_assert_eq!(session.state().time_remaining, 0);
            }
            EndReason::Exhausted => {
                prop_assert_ne!(summary.outcome, Outcome::Timeout);
                prop_assert_eq!(summary.correct_count + summary.incorrect_count, 12);
                let victory = summary.score >= summary.victory_threshold;
                prop_assert_eq!(summary.outcome == Outcome::Victory, victory);
            }
        }
    }
}
