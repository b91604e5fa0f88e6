//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no asset files.

use web_sys::{AudioContext, OscillatorType};

use crate::events::GameEvent;
use crate::settings::Settings;
use crate::sim::CollisionKind;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Wing flap
    Flap,
    /// Obstacle passed
    Point,
    /// Crashed into an obstacle
    Hit,
    /// Hit the ground
    Fall,
    /// New best score
    HighScore,
}

impl SoundEffect {
    /// Effect for a game event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(SoundEffect::Flap),
            GameEvent::ScoreChanged { .. } => Some(SoundEffect::Point),
            GameEvent::GameOver {
                cause: CollisionKind::Obstacle,
                ..
            } => Some(SoundEffect::Hit),
            GameEvent::GameOver {
                cause: CollisionKind::Ground,
                ..
            } => Some(SoundEffect::Fall),
            GameEvent::HighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::PhaseChanged { .. }
            | GameEvent::RankChanged { .. }
            | GameEvent::LeaderboardUpdated { .. } => None,
        }
    }
}

pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: Settings::default().effective_volume(),
        }
    }

    /// Pick up volume and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let tones: &[Tone] = match effect {
            SoundEffect::Flap => &FLAP,
            SoundEffect::Point => &POINT,
            SoundEffect::Hit => &HIT,
            SoundEffect::Fall => &FALL,
            SoundEffect::HighScore => &HIGH_SCORE,
        };
        self.play_tones(ctx, vol, tones);
    }

    /// One oscillator with an exponential decay envelope, routed to the output
    fn tone(&self, ctx: &AudioContext, vol: f32, tone: Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(tone.wave);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = ctx.current_time() + tone.delay;
        let end = t + tone.duration;
        osc.frequency().set_value_at_time(tone.freq, t).ok()?;
        if let Some(to) = tone.sweep_to {
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, end)
                .ok()?;
        }
        gain.gain().set_value_at_time(vol * tone.level, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, end)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end + 0.02).ok()
    }

    fn play_tones(&self, ctx: &AudioContext, vol: f32, tones: &[Tone]) {
        for tone in tones {
            if self.tone(ctx, vol, *tone).is_none() {
                log::debug!("Web Audio refused a tone");
                return;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Pitch slide target over the tone's duration
    sweep_to: Option<f32>,
    wave: OscillatorType,
    /// Peak gain before volume scaling
    level: f32,
    /// Seconds from now
    delay: f64,
    duration: f64,
}

impl Tone {
    const fn new(freq: f32, wave: OscillatorType, level: f32, duration: f64) -> Self {
        Self {
            freq,
            sweep_to: None,
            wave,
            level,
            delay: 0.0,
            duration,
        }
    }

    const fn sweep(mut self, to: f32) -> Self {
        self.sweep_to = Some(to);
        self
    }

    const fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Short upward swish
const FLAP: [Tone; 1] = [Tone::new(220.0, OscillatorType::Triangle, 0.25, 0.09).sweep(520.0)];

/// Two-note ding
const POINT: [Tone; 2] = [
    Tone::new(880.0, OscillatorType::Sine, 0.25, 0.15),
    Tone::new(1320.0, OscillatorType::Sine, 0.25, 0.15).after(0.07),
];

/// Thud with a bright crack on top
const HIT: [Tone; 2] = [
    Tone::new(140.0, OscillatorType::Sine, 0.5, 0.2).sweep(50.0),
    Tone::new(1800.0, OscillatorType::Square, 0.15, 0.05),
];

/// Falling whistle into the ground
const FALL: [Tone; 1] = [Tone::new(700.0, OscillatorType::Sine, 0.3, 0.45).sweep(90.0)];

/// Rising arpeggio, after the crash has played
const HIGH_SCORE: [Tone; 5] = [
    Tone::new(500.0, OscillatorType::Triangle, 0.25, 0.25).after(0.30),
    Tone::new(600.0, OscillatorType::Triangle, 0.25, 0.25).after(0.38),
    Tone::new(700.0, OscillatorType::Triangle, 0.25, 0.25).after(0.46),
    Tone::new(800.0, OscillatorType::Triangle, 0.25, 0.25).after(0.54),
    Tone::new(1000.0, OscillatorType::Triangle, 0.25, 0.25).after(0.62),
];
