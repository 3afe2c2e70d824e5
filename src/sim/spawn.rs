//! Word spawning
//!
//! Draws the next word from the front of the unused pool and drops it in at
//! the top of the play area.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::layout::PlayArea;
use super::state::{FallingWord, GamePhase, SessionState, WordId, WordSeed};

/// Fill the unused pool with `seeds` in random order
pub fn refill_pool<R: Rng>(state: &mut SessionState, mut seeds: Vec<WordSeed>, rng: &mut R) {
    seeds.shuffle(rng);
    state.unused = seeds.into();
}

/// Spawn one word. Inert unless the session is running; returns `None`
/// once the pool is drained.
pub fn spawn_next<R: Rng>(state: &mut SessionState, area: &PlayArea, rng: &mut R) -> Option<WordId> {
    if state.phase != GamePhase::Running {
        return None;
    }
    let seed = state.unused.pop_front()?;

    let id = state.next_word_id();
    let pos = Vec2::new(area.spawn_x(rng), 0.0);
    log::debug!("Spawned {:?} '{}' at x={:.1}", id, seed.text, pos.x);
    state.active.push(FallingWord::from_seed(id, seed, pos));
    Some(id)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::catalog::Catalog;

    fn running_state(seed: u64) -> (SessionState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = SessionState::new(seed);
        refill_pool(&mut state, Catalog::fallback().seeds(), &mut rng);
        state.phase = GamePhase::Running;
        (state, rng)
    }

    #[test]
    fn test_spawn_moves_word_from_pool_to_active() {
        let (mut state, mut rng) = running_state(42);
        let area = PlayArea::default();
        let next_text = state.unused[0].text.clone();

        let id = spawn_next(&mut state, &area, &mut rng).unwrap();
        assert_eq!(state.unused.len(), 11);
        assert_eq!(state.active.len(), 1);

        let word = state.word(id).unwrap();
        assert_eq!(word.text, next_text);
        assert_eq!(word.pos.y, 0.0);
    }

    #[test]
    fn test_spawn_is_inert_when_not_running() {
        let (mut state, mut rng) = running_state(42);
        let area = PlayArea::default();
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::Ended] {
            state.phase = phase;
            assert!(spawn_next(&mut state, &area, &mut rng).is_none());
        }
        assert_eq!(state.unused.len(), 12);
        assert!(state.active.is_empty());
    }

    #[test]
    fn test_spawn_drains_pool_without_panicking() {
        let (mut state, mut rng) = running_state(3);
        let area = PlayArea::default();
        let mut spawned = 0;
        while spawn_next(&mut state, &area, &mut rng).is_some() {
            spawned += 1;
        }
        assert_eq!(spawned, 12);
        assert!(spawn_next(&mut state, &area, &mut rng).is_none());
        assert_eq!(state.active.len(), 12);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let (a, _) = running_state(99);
        let (b, _) = running_state(99);
        assert_eq!(a.unused, b.unused);

        let mut sorted: Vec<String> = a.unused.iter().map(|s| s.text.clone()).collect();
        sorted.sort();
        let mut expected: Vec<String> =
            Catalog::fallback().seeds().into_iter().map(|s| s.text).collect();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
