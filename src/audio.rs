//! Audio cues via the Web Audio API
//!
//! Procedurally generated beeps, no sample files. On native builds the
//! manager keeps the same interface but plays nothing; the cue mapping
//! still runs so the embedding code is identical on both targets.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::progress::AudioSettings;

/// Discrete cue triggers emitted by the embedding per game event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Collect,
    /// Avatar took damage
    Hit,
    EnemyDefeat,
    LevelComplete,
    GameOver,
}

/// Audio manager holding the persisted mute/volume preferences
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    muted: bool,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            muted: false,
            volume: 0.4,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            muted: false,
            volume: 0.4,
        }
    }

    /// Apply persisted preferences
    pub fn update_settings(&mut self, settings: &AudioSettings) {
        self.muted = settings.muted;
        self.volume = settings.volume.clamp(0.0, 1.0);
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play one cue; silent when muted or without an audio context
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Jump => self.play_jump(ctx, vol),
            SoundCue::Collect => self.play_collect(ctx, vol),
            SoundCue::Hit => self.play_hit(ctx, vol),
            SoundCue::EnemyDefeat => self.play_defeat(ctx, vol),
            SoundCue::LevelComplete => self.play_complete(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Play one cue; no-op off the web
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, cue: SoundCue) {
        if self.effective_volume() > 0.0 {
            log::debug!("audio cue {cue:?}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    /// Create an oscillator with a gain envelope
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

    /// Jump - quick upward chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 420.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(420.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(590.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Collect - bright two-note ding
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [780.0, 940.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }
    }

    /// Hit - harsh low buzz
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(70.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Enemy defeat - falling squash tone
    fn play_defeat(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 330.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(330.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(220.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Level complete - rising fanfare
    fn play_complete(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [440.0, 560.0, 700.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Game over - sad descending run
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [360.0, 280.0, 210.0, 130.0].iter().enumerate() {
            let delay = i as f64 * 0.18;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sawtooth) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}

/// Map a simulation event to its cue, if it has one
pub fn cue_for_event(event: &crate::sim::GameEvent) -> Option<SoundCue> {
    use crate::sim::GameEvent;
    match event {
        GameEvent::Jumped => Some(SoundCue::Jump),
        GameEvent::ItemCollected { .. } => Some(SoundCue::Collect),
        GameEvent::AvatarHit { .. } => Some(SoundCue::Hit),
        GameEvent::EnemyDefeated => Some(SoundCue::EnemyDefeat),
        GameEvent::LevelComplete { .. } => Some(SoundCue::LevelComplete),
        GameEvent::GameOver => Some(SoundCue::GameOver),
    }
}
