//! Audio cue playback
//!
//! On the web every cue is synthesized with Web Audio oscillators, so no
//! sound files ship with the game. Native builds log cues instead.

use crate::platform::PlatformError;

/// Every cue the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Pop,
    Whoosh,
    Crunch,
    Squish,
    Splash,
    Laugh,
    Cry,
    Grunt,
    Yeah,
    Kiss,
    Sparkle,
    /// Wrong tap
    Buzz,
}

impl Cue {
    pub const ALL: [Cue; 12] = [
        Cue::Pop,
        Cue::Whoosh,
        Cue::Crunch,
        Cue::Squish,
        Cue::Splash,
        Cue::Laugh,
        Cue::Cry,
        Cue::Grunt,
        Cue::Yeah,
        Cue::Kiss,
        Cue::Sparkle,
        Cue::Buzz,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Cue::Pop => "pop",
            Cue::Whoosh => "whoosh",
            Cue::Crunch => "crunch",
            Cue::Squish => "squish",
            Cue::Splash => "splash",
            Cue::Laugh => "laugh",
            Cue::Cry => "cry",
            Cue::Grunt => "grunt",
            Cue::Yeah => "yeah",
            Cue::Kiss => "kiss",
            Cue::Sparkle => "sparkle",
            Cue::Buzz => "buzz",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Cue::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Fire-and-forget sound output
pub trait CuePlayer {
    /// Play `cue` at `volume` (0-1) with `pitch` as a frequency multiplier
    fn play(&mut self, cue: &str, volume: f32, pitch: f32) -> Result<(), PlatformError>;
    fn mute(&mut self);
    fn unmute(&mut self);
    fn is_muted(&self) -> bool;
    /// Wake the output after a user gesture (browsers start audio suspended)
    fn resume(&mut self) -> Result<(), PlatformError>;
    /// Apply master and effects volume (0-1 each)
    fn set_volume(&mut self, _master: f32, _sfx: f32) {}
}

/// Cue player that only logs (native builds, headless runs)
#[derive(Debug, Default)]
pub struct LogPlayer {
    muted: bool,
    /// Cues played so far
    pub played: u64,
}

impl CuePlayer for LogPlayer {
    fn play(&mut self, cue: &str, volume: f32, pitch: f32) -> Result<(), PlatformError> {
        if self.muted {
            return Ok(());
        }
        let cue = Cue::from_key(cue)
            .ok_or_else(|| PlatformError::Rejected(format!("unknown cue '{}'", cue)))?;
        self.played += 1;
        log::debug!("[audio] {} vol={:.2} pitch={:.2}", cue.key(), volume, pitch);
        Ok(())
    }

    fn mute(&mut self) {
        self.muted = true;
    }

    fn unmute(&mut self) {
        self.muted = false;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn resume(&mut self) -> Result<(), PlatformError> {
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{Cue, CuePlayer};
    use crate::platform::PlatformError;

    /// Web Audio synthesizer
    pub struct WebAudioPlayer {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for WebAudioPlayer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioPlayer {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

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

        /// One enveloped tone sweeping `from` → `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            vol: f32,
            start: f64,
            len: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time() + start;
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            if (to - from).abs() > f32::EPSILON {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to, t + len)
                    .ok();
            }
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }

        /// Notes played one after another
        fn arpeggio(&self, ctx: &AudioContext, notes: &[f32], p: f32, vol: f32, step: f64) {
            for (i, freq) in notes.iter().enumerate() {
                self.sweep(
                    ctx,
                    OscillatorType::Triangle,
                    freq * p,
                    freq * p,
                    vol,
                    i as f64 * step,
                    step * 1.5,
                );
            }
        }

        fn synth(&self, ctx: &AudioContext, cue: Cue, vol: f32, p: f32) {
            use OscillatorType::*;
            match cue {
                Cue::Pop => self.sweep(ctx, Sine, 600.0 * p, 200.0 * p, vol, 0.0, 0.08),
                Cue::Whoosh => self.sweep(ctx, Triangle, 200.0 * p, 900.0 * p, vol * 0.8, 0.0, 0.25),
                Cue::Crunch => {
                    self.sweep(ctx, Sawtooth, 300.0 * p, 80.0 * p, vol * 0.7, 0.0, 0.1);
                    self.sweep(ctx, Square, 1800.0 * p, 900.0 * p, vol * 0.2, 0.0, 0.05);
                }
                Cue::Squish => self.sweep(ctx, Sine, 250.0 * p, 120.0 * p, vol, 0.0, 0.18),
                Cue::Splash => {
                    self.sweep(ctx, Triangle, 900.0 * p, 300.0 * p, vol * 0.6, 0.0, 0.2);
                    self.sweep(ctx, Sine, 150.0 * p, 60.0 * p, vol * 0.5, 0.0, 0.15);
                }
                Cue::Laugh => self.arpeggio(ctx, &[500.0, 650.0, 500.0, 650.0], p, vol * 0.6, 0.07),
                Cue::Cry => self.sweep(ctx, Sine, 500.0 * p, 250.0 * p, vol * 0.7, 0.0, 0.4),
                Cue::Grunt => self.sweep(ctx, Sawtooth, 110.0 * p, 70.0 * p, vol * 0.8, 0.0, 0.2),
                Cue::Yeah => self.arpeggio(ctx, &[400.0, 600.0], p, vol * 0.7, 0.1),
                Cue::Kiss => self.sweep(ctx, Sine, 1200.0 * p, 2000.0 * p, vol * 0.5, 0.0, 0.06),
                Cue::Sparkle => {
                    self.arpeggio(ctx, &[1200.0, 1500.0, 1800.0, 2400.0], p, vol * 0.4, 0.05)
                }
                Cue::Buzz => {
                    self.sweep(ctx, Square, 120.0, 100.0, vol * 0.6, 0.0, 0.25);
                    self.sweep(ctx, Sawtooth, 90.0, 80.0, vol * 0.4, 0.0, 0.25);
                }
            }
        }
    }

    impl CuePlayer for WebAudioPlayer {
        fn play(&mut self, cue: &str, volume: f32, pitch: f32) -> Result<(), PlatformError> {
            let vol = volume * self.master_volume * self.sfx_volume;
            if self.muted || vol <= 0.0 {
                return Ok(());
            }
            let cue = Cue::from_key(cue)
                .ok_or_else(|| PlatformError::Rejected(format!("unknown cue '{}'", cue)))?;
            let ctx = self.ctx.as_ref().ok_or(PlatformError::Unavailable)?;

            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.synth(ctx, cue, vol, pitch.max(0.1));
            Ok(())
        }

        fn mute(&mut self) {
            self.muted = true;
        }

        fn unmute(&mut self) {
            self.muted = false;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn resume(&mut self) -> Result<(), PlatformError> {
            let ctx = self.ctx.as_ref().ok_or(PlatformError::Unavailable)?;
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Ok(())
        }

        fn set_volume(&mut self, master: f32, sfx: f32) {
            self.master_volume = master.clamp(0.0, 1.0);
            self.sfx_volume = sfx.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ALL_OBJECT_TYPES;

    #[test]
    fn test_every_catalog_cue_is_playable() {
        for ty in ALL_OBJECT_TYPES {
            assert!(Cue::from_key(ty.sound_cue()).is_some(), "{:?}", ty);
        }
        assert_eq!(Cue::from_key("buzz"), Some(Cue::Buzz));
        assert_eq!(Cue::from_key("kaboom"), None);
    }

    #[test]
    fn test_log_player_mute() {
        let mut player = LogPlayer::default();
        player.play("pop", 0.4, 1.0).unwrap();
        player.mute();
        player.play("pop", 0.4, 1.0).unwrap();
        assert_eq!(player.played, 1);
        player.unmute();
        assert!(!player.is_muted());
        assert!(player.play("kaboom", 0.4, 1.0).is_err());
    }
}
