//! Fall simulation step
//!
//! Moves every free word down by the fall speed and reports the ones that
//! would cross the loss boundary. Crossing words are left where they were;
//! the session resolves and removes them.

use super::layout::PlayArea;
use super::state::{FallingWord, GamePhase, SessionState, WordId};

/// Advance one fall tick. Returns words that crossed the loss boundary,
/// in spawn order. Held words neither move nor cross.
pub fn advance_falling(state: &mut SessionState, area: &PlayArea, fall_speed: f32) -> Vec<WordId> {
    if state.phase != GamePhase::Running {
        return Vec::new();
    }

    let held = state.held_word();
    let boundary = area.loss_boundary();
    let mut crossed = Vec::new();

    for word in state.active.iter_mut() {
        if Some(word.id) == held {
            continue;
        }
        let new_y = word.pos.y + fall_speed;
        if FallingWord::bottom_at(new_y) > boundary {
            crossed.push(word.id);
            continue;
        }
        word.pos.y = new_y;
    }

    crossed
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::WORD_HEIGHT;
    use crate::sim::state::{Gesture, GestureKind, WordSeed};

    fn state_with_words(ys: &[f32]) -> SessionState {
        let mut state = SessionState::new(1);
        state.phase = GamePhase::Running;
        for &y in ys {
            let id = state.next_word_id();
            state.active.push(FallingWord::from_seed(
                id,
                WordSeed {
                    text: format!("w{}", id.0),
                    category: "C".into(),
                },
                Vec2::new(20.0, y),
            ));
        }
        state
    }

    #[test]
    fn test_words_fall_by_speed() {
        let mut state = state_with_words(&[0.0, 100.0]);
        let area = PlayArea::new(400.0, 500.0);
        let crossed = advance_falling(&mut state, &area, 1.5);
        assert!(crossed.is_empty());
        assert_eq!(state.active[0].pos.y, 1.5);
        assert_eq!(state.active[1].pos.y, 101.5);
    }

    #[test]
    fn test_boundary_crossing_reported() {
        let area = PlayArea::new(400.0, 500.0);
        // Bottom edge may reach exactly the boundary (490) without crossing
        let at_edge = area.loss_boundary() - WORD_HEIGHT - 2.0;
        let mut state = state_with_words(&[at_edge, 10.0]);

        let crossed = advance_falling(&mut state, &area, 2.0);
        assert!(crossed.is_empty());
        assert_eq!(state.active[0].pos.y, at_edge + 2.0);

        let crossed = advance_falling(&mut state, &area, 2.0);
        assert_eq!(crossed, vec![state.active[0].id]);
        // Crossing word is not moved
        assert_eq!(state.active[0].pos.y, at_edge + 2.0);
        assert_eq!(state.active[1].pos.y, 14.0);
    }

    #[test]
    fn test_held_word_does_not_fall() {
        let mut state = state_with_words(&[440.0]);
        let id = state.active[0].id;
        state.gesture = Some(Gesture {
            word: id,
            kind: GestureKind::Drag,
            grab_offset: Vec2::ZERO,
            hover: None,
        });
        let area = PlayArea::new(400.0, 500.0);

        let crossed = advance_falling(&mut state, &area, 50.0);
        assert!(crossed.is_empty());
        assert_eq!(state.active[0].pos.y, 440.0);
    }

    #[test]
    fn test_paused_does_nothing() {
        let mut state = state_with_words(&[0.0]);
        state.phase = GamePhase::Paused;
        let crossed = advance_falling(&mut state, &PlayArea::default(), 1.5);
        assert!(crossed.is_empty());
        assert_eq!(state.active[0].pos.y, 0.0);
    }
}
