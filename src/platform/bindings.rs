//! JS bindings
//!
//! The DOM presentation layer owns rendering and input listeners; it drives
//! the session through `WordSortGame` and renders from `snapshot()` and the
//! events returned by `frame()`.

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::net::{WebResultsSink, load_game_data};
use crate::audio::{AudioManager, cue_for};
use crate::catalog::GameConfig;
use crate::highscores::HighScores;
use crate::hud;
use crate::settings::Settings;
use crate::sim::{CategoryBox, GameEvent, GamePhase, GestureKind, PlayArea, Rect, Session, WordId};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Word Sort WASM loaded");
}

/// Load catalog/config and build a game.
///
/// `config_json` may omit any field; `results_url` `None` keeps results
/// local (LocalStorage only).
#[wasm_bindgen(js_name = loadGame)]
pub async fn load_game(
    catalog_url: Option<String>,
    config_json: Option<String>,
    results_url: Option<String>,
    music_url: Option<String>,
) -> WordSortGame {
    let config = match config_json.as_deref().map(GameConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::error!("{e}; using default configuration");
            GameConfig::default()
        }
        None => GameConfig::default(),
    };
    let data = load_game_data(catalog_url.as_deref(), config).await;
    let sink = WebResultsSink::new(results_url, data.config.game_id);
    let settings = Settings::load();

    WordSortGame {
        audio: AudioManager::new(music_url.as_deref(), &settings),
        session: Session::new(data, Box::new(sink)),
        high_scores: HighScores::load(),
        settings,
    }
}

#[derive(Serialize)]
struct WordView<'a> {
    id: u32,
    text: &'a str,
    x: f32,
    y: f32,
    held: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    phase: GamePhase,
    score: i64,
    time_remaining: u32,
    score_label: String,
    timer_label: String,
    words: Vec<WordView<'a>>,
    hover: Option<&'a str>,
}

#[wasm_bindgen]
pub struct WordSortGame {
    session: Session,
    audio: AudioManager,
    high_scores: HighScores,
    settings: Settings,
}

#[wasm_bindgen]
impl WordSortGame {
    // === Start screen ===

    /// Category names as a JSON array, in box order
    pub fn categories(&self) -> String {
        serde_json::to_string(&self.session.catalog().categories()).unwrap_or_else(|_| "[]".into())
    }

    #[wasm_bindgen(js_name = durationLabel)]
    pub fn duration_label(&self) -> String {
        hud::duration_label(self.session.config().duration_seconds)
    }

    #[wasm_bindgen(js_name = recordLabel)]
    pub fn record_label(&self) -> String {
        hud::record_label(self.high_scores.best())
    }

    /// Results screen text for the last finished session, `"null"` before one
    #[wasm_bindgen(js_name = endScreen)]
    pub fn end_screen(&self) -> String {
        let view = self.session.state().last_summary.as_ref().map(hud::end_view);
        serde_json::to_string(&view).unwrap_or_else(|_| "null".into())
    }

    // === Layout ===

    #[wasm_bindgen(js_name = setPlayArea)]
    pub fn set_play_area(&mut self, width: f32, height: f32) {
        let mut area = PlayArea::new(width, height);
        area.boxes = self.session.area().boxes.clone();
        self.session.set_play_area(area);
    }

    /// Register a category box, in play-area coordinates
    #[wasm_bindgen(js_name = setCategoryBox)]
    pub fn set_category_box(&mut self, category: String, x: f32, y: f32, width: f32, height: f32) {
        let mut area = self.session.area().clone();
        area.boxes.retain(|b| b.category != category);
        area.boxes.push(CategoryBox {
            category,
            rect: Rect::new(x, y, width, height),
        });
        self.session.set_play_area(area);
    }

    // === Session ===

    pub fn start(&mut self) -> bool {
        self.session.start(js_sys::Date::now() as u64)
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) -> bool {
        self.session.toggle_pause()
    }

    #[wasm_bindgen(js_name = goHome)]
    pub fn go_home(&mut self) {
        self.session.go_home();
    }

    /// Tab hidden / window blurred
    #[wasm_bindgen(js_name = onHidden)]
    pub fn on_hidden(&mut self) {
        if self.settings.pause_on_blur && self.session.pause() {
            log::info!("Auto-paused (tab hidden)");
        }
    }

    /// Advance by `dt_ms`, play cues, and return the frame's events as JSON
    pub fn frame(&mut self, dt_ms: f64) -> String {
        self.session.update(dt_ms);
        let events = self.session.drain_events();

        for event in &events {
            if let Some(cue) = cue_for(event) {
                self.audio.play(cue);
            }
            if let GameEvent::SessionEnded(summary) = event {
                if let Some(rank) = self.high_scores.record(summary, js_sys::Date::now()) {
                    log::info!("New high score, rank {rank}");
                    self.high_scores.save();
                }
            }
        }

        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to encode events: {e}");
            "[]".into()
        })
    }

    /// Current words, score and timer as JSON
    pub fn snapshot(&self) -> String {
        let state = self.session.state();
        let held = state.held_word();
        let snapshot = Snapshot {
            phase: state.phase,
            score: state.score,
            time_remaining: state.time_remaining,
            score_label: hud::score_label(state.score),
            timer_label: hud::timer_label(state.time_remaining),
            words: state
                .active
                .iter()
                .map(|w| WordView {
                    id: w.id.0,
                    text: &w.text,
                    x: w.pos.x,
                    y: w.pos.y,
                    held: Some(w.id) == held,
                })
                .collect(),
            hover: state.gesture.as_ref().and_then(|g| g.hover.as_deref()),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".into())
    }

    // === Interaction ===

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.session
            .begin_gesture(WordId(id), GestureKind::Drag, Vec2::new(x, y))
    }

    #[wasm_bindgen(js_name = beginTouch)]
    pub fn begin_touch(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.session
            .begin_gesture(WordId(id), GestureKind::Touch, Vec2::new(x, y))
    }

    #[wasm_bindgen(js_name = movePointer)]
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.session.move_gesture(Vec2::new(x, y));
    }

    /// Drag-over (`Some`) / drag-leave (`None`)
    pub fn hover(&mut self, category: Option<String>) {
        self.session.hover_category(category.as_deref());
    }

    /// Touch end: resolve against the hovered box. Returns the points
    /// scored, or `undefined` if nothing was held.
    pub fn release(&mut self) -> Option<i32> {
        self.session.release_gesture().map(|p| p.points)
    }

    /// Drop on a box (`Some`) or the bare play area (`None`)
    #[wasm_bindgen(js_name = dropOn)]
    pub fn drop_on(&mut self, category: Option<String>) -> Option<i32> {
        self.session.drop_on(category.as_deref()).map(|p| p.points)
    }

    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self) {
        self.session.cancel_gesture();
    }

    // === Settings ===

    /// Current preferences as JSON
    pub fn settings(&self) -> String {
        self.settings.to_json()
    }

    /// Replace preferences from JSON; missing fields take their defaults
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&mut self, json: &str) {
        self.settings = Settings::from_json(json);
        self.apply_and_save();
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.apply_and_save();
    }

    #[wasm_bindgen(js_name = setVolumes)]
    pub fn set_volumes(&mut self, master: f32, sfx: f32, music: f32) {
        self.settings.master_volume = master;
        self.settings.sfx_volume = sfx;
        self.settings.music_volume = music;
        self.settings = self.settings.clone().clamped();
        self.apply_and_save();
    }
}

impl WordSortGame {
    fn apply_and_save(&mut self) {
        self.audio.apply_settings(&self.settings);
        self.settings.save();
    }
}
