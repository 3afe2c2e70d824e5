//! Audio cues
//!
//! The simulation never plays sound itself; the host maps each `GameEvent`
//! to an `AudioCue` and hands it to the `AudioManager`. Effects are
//! procedurally generated with the Web Audio API, background music is a
//! looping media element. Playback failures (autoplay policy, missing
//! context) are swallowed.

use crate::sim::{GameEvent, GamePhase, Outcome};

/// Fire-and-forget sound triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Word placed in its own category
    Correct,
    /// Wrong box, bare play area or missed word
    Incorrect,
    /// Session ended with a victory
    Victory,
    /// Session ended by timeout or below the threshold
    Defeat,
    MusicStart,
    MusicStop,
}

/// Sound to play for an event, if any
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::WordResolved { placement, .. } => Some(if placement.points > 0 {
            AudioCue::Correct
        } else {
            AudioCue::Incorrect
        }),
        GameEvent::SessionEnded(summary) => Some(match summary.outcome {
            Outcome::Victory => AudioCue::Victory,
            Outcome::Timeout | Outcome::Defeat => AudioCue::Defeat,
        }),
        GameEvent::PhaseChanged { to: GamePhase::Running, .. } => Some(AudioCue::MusicStart),
        GameEvent::PhaseChanged { from: GamePhase::Running, .. } => Some(AudioCue::MusicStop),
        // Returning home from a paused session stops music too
        GameEvent::PhaseChanged { from: GamePhase::Paused, to: GamePhase::Idle } => {
            Some(AudioCue::MusicStop)
        }
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::AudioCue;
    use crate::settings::Settings;

    /// Background music volume before settings are applied
    const MUSIC_BASE_VOLUME: f32 = 0.4;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        /// `music_src` is the URL of the looping background track
        pub fn new(music_src: Option<&str>, settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }

            let music = music_src.and_then(|src| match HtmlAudioElement::new_with_src(src) {
                Ok(el) => {
                    el.set_loop(true);
                    Some(el)
                }
                Err(e) => {
                    log::warn!("Background music unavailable: {e:?}");
                    None
                }
            });

            let mut manager = Self {
                ctx,
                music,
                master_volume: 0.8,
                sfx_volume: 1.0,
                music_volume: 0.7,
                muted: false,
            };
            manager.apply_settings(settings);
            manager
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.music_volume = settings.music_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
            if let Some(music) = &self.music {
                music.set_volume(self.effective_music_volume() as f64);
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        fn effective_music_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                MUSIC_BASE_VOLUME * self.master_volume * self.music_volume
            }
        }

        /// Play a cue
        pub fn play(&self, cue: AudioCue) {
            match cue {
                AudioCue::MusicStart => return self.start_music(),
                AudioCue::MusicStop => return self.stop_music(),
                _ => {}
            }

            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                AudioCue::Correct => self.play_correct(ctx, vol),
                AudioCue::Incorrect => self.play_incorrect(ctx, vol),
                AudioCue::Victory => self.play_victory(ctx, vol),
                AudioCue::Defeat => self.play_defeat(ctx, vol),
                AudioCue::MusicStart | AudioCue::MusicStop => {}
            }
        }

        fn start_music(&self) {
            let Some(music) = &self.music else { return };
            match music.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::info!("Music did not start (needs user interaction): {e:?}");
                    }
                }),
                Err(e) => log::info!("Music did not start: {e:?}"),
            }
        }

        fn stop_music(&self) {
            if let Some(music) = &self.music {
                let _ = music.pause();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short rising two-note chime
        fn play_correct(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [660.0, 880.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Low falling buzz
        fn play_incorrect(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        /// Triumphant fanfare
        fn play_victory(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.12;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Sad descending
        fn play_defeat(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}
