//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each cue owns its voices: re-triggering a cue cuts the previous voice
//! instead of layering a second copy on top.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{Cue, CuePlayer};
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    /// Temporarily silenced (window blur)
    suspended: bool,
    /// Oscillators still sounding, per cue
    voices: [Vec<OscillatorNode>; 3],
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            suspended: false,
            voices: Default::default(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Silence everything until `set_suspended(false)`
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
        if suspended {
            for cue in Cue::ALL {
                self.cut(cue);
            }
        }
    }

    /// Apply changed preferences (takes effect on the next cue)
    pub fn set_settings(&mut self, settings: Settings) {
        if settings.muted {
            for cue in Cue::ALL {
                self.cut(cue);
            }
        }
        self.settings = settings;
    }

    /// Stop every voice a cue still has
    fn cut(&mut self, cue: Cue) {
        for osc in self.voices[cue.index()].drain(..) {
            let _ = osc.stop();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
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

    // === Sound generators ===

    /// Jump - short rising chirp
    fn jump_voices(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Square) else {
            return Vec::new();
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
        vec![osc]
    }

    /// Score - two-note chime
    fn score_voices(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let mut voices = Vec::with_capacity(2);
        for (i, freq) in [880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
                voices.push(osc);
            }
        }
        voices
    }

    /// Hit - falling sawtooth crunch
    fn hit_voices(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let mut voices = Vec::with_capacity(2);
        let t = ctx.current_time();

        if let Some((osc, gain)) = Self::create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
            voices.push(osc);
        }

        // Bass thump
        if let Some((osc, gain)) = Self::create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
            voices.push(osc);
        }
        voices
    }
}

impl CuePlayer for AudioManager {
    fn play_cue(&mut self, cue: Cue) {
        let vol = self.settings.cue_volume(cue);
        if vol <= 0.0 || self.suspended {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let voices = match cue {
            Cue::Jump => Self::jump_voices(ctx, vol),
            Cue::Score => Self::score_voices(ctx, vol),
            Cue::Hit => Self::hit_voices(ctx, vol),
        };
        self.cut(cue);
        self.voices[cue.index()] = voices;
    }
}
