//! Word Sort entry point
//!
//! On the web the page script drives the game through the bindings in
//! `word_sort::platform`. Natively this runs a headless session with a
//! scripted player, which is handy for checking tuning from a terminal.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Word Sort (native) starting...");
    log::info!("Native mode is headless - serve the web build for the playable version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);
    let accuracy = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.75)
        .clamp(0.0, 1.0);

    match demo::play(seed, accuracy) {
        Some(summary) => demo::report(&summary),
        None => log::error!("Session never ended"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in the library bindings
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use word_sort::consts::*;
    use word_sort::hud;
    use word_sort::results::LogSink;
    use word_sort::sim::{FallingWord, GameEvent, GamePhase, GestureKind, PlayArea, SessionState};
    use word_sort::{GameData, Session, SessionSummary};

    /// Words are grabbed once they have fallen this far
    const GRAB_DEPTH: f32 = 120.0;

    /// Play one session with a bot that sorts `accuracy` of its picks correctly
    pub fn play(seed: u64, accuracy: f64) -> Option<SessionSummary> {
        let data = GameData::fallback();
        let categories: Vec<String> = data
            .catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut session = Session::new(data, Box::new(LogSink));
        session.set_play_area(PlayArea::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT));
        let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);

        session.start(seed);
        while session.phase() == GamePhase::Running {
            if let Some(word) = pick(session.state()).cloned() {
                let wrong: Vec<&String> =
                    categories.iter().filter(|c| **c != word.category).collect();
                let target = if wrong.is_empty() || bot.random_bool(accuracy) {
                    word.category.clone()
                } else {
                    wrong[bot.random_range(0..wrong.len())].clone()
                };
                session.begin_gesture(word.id, GestureKind::Drag, word.pos + Vec2::splat(5.0));
                session.drop_on(Some(&target));
            }

            session.update(FALL_TICK_MS);
            for event in session.drain_events() {
                match event {
                    GameEvent::WordResolved { placement, .. } => {
                        print!("  {}", hud::feedback_label(placement.points));
                    }
                    GameEvent::ScoreChanged { score, .. } => {
                        println!(
                            "  ({}, {})",
                            hud::score_label(score),
                            hud::timer_label(session.state().time_remaining)
                        );
                    }
                    _ => {}
                }
            }
        }

        session.state().last_summary.clone()
    }

    /// Oldest word that has fallen deep enough to be read
    fn pick(state: &SessionState) -> Option<&FallingWord> {
        state
            .active
            .iter()
            .filter(|w| w.pos.y >= GRAB_DEPTH)
            .min_by_key(|w| w.id)
    }

    pub fn report(summary: &SessionSummary) {
        let view = hud::end_view(summary);
        println!();
        println!("{} {}", view.screen.icon, view.screen.title);
        println!("{} ({})", view.final_score, view.time_spent);
        println!(
            "{} correct, {} incorrect (victory at {} of {})",
            summary.correct_count,
            summary.incorrect_count,
            summary.victory_threshold,
            summary.max_obtainable
        );
    }
}
