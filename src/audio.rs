//! Sound cues and the audio sinks that play them
//!
//! Cues are short synthesised beeps; no audio files are shipped. The browser
//! sink drives the Web Audio API, native builds use a silent or recording sink.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// Feedback sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundCue {
    /// Right answer, building placed
    Correct,
    /// Wrong answer, rejected purchase
    Incorrect,
    /// UI tap
    Click,
    /// Coins received or spent
    Coin,
    /// Player level went up
    LevelUp,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Correct => "correct",
            SoundCue::Incorrect => "incorrect",
            SoundCue::Click => "click",
            SoundCue::Coin => "coin",
            SoundCue::LevelUp => "levelUp",
        }
    }

    /// Tone frequency in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            SoundCue::Correct => 523.25,   // C5
            SoundCue::Incorrect => 261.63, // C4
            SoundCue::Click => 440.0,      // A4
            SoundCue::Coin => 659.25,      // E5
            SoundCue::LevelUp => 783.99,   // G5
        }
    }

    /// Tone length in seconds
    pub fn duration(&self) -> f32 {
        match self {
            SoundCue::Correct => 0.2,
            SoundCue::Incorrect => 0.3,
            SoundCue::Click => 0.1,
            SoundCue::Coin => 0.15,
            SoundCue::LevelUp => 0.5,
        }
    }
}

/// Something that can play a cue
pub trait AudioSink {
    fn play(&self, cue: SoundCue);
}

impl<T: AudioSink + ?Sized> AudioSink for &T {
    fn play(&self, cue: SoundCue) {
        (**self).play(cue)
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _cue: SoundCue) {}
}

/// Remembers every cue it was asked to play
#[derive(Debug, Default)]
pub struct RecordingAudio {
    played: RefCell<Vec<SoundCue>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundCue> {
        self.played.borrow().clone()
    }

    /// Return and forget everything played so far
    pub fn take(&self) -> Vec<SoundCue> {
        std::mem::take(&mut *self.played.borrow_mut())
    }
}

impl AudioSink for RecordingAudio {
    fn play(&self, cue: SoundCue) {
        log::debug!("cue {}", cue.name());
        self.played.borrow_mut().push(cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue};

    /// Beeps through the Web Audio API
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.3 }
        }

        /// Set volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl AudioSink for WebAudio {
        fn play(&self, cue: SoundCue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, cue.frequency()) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + cue.duration() as f64;

            gain.gain().set_value_at_time(self.volume, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_tones() {
        assert_eq!(SoundCue::Incorrect.frequency(), 261.63);
        assert_eq!(SoundCue::LevelUp.duration(), 0.5);
        assert!(SoundCue::Click.duration() < SoundCue::Correct.duration());
    }

    #[test]
    fn test_recording_sink() {
        let audio = RecordingAudio::new();
        let sink: &dyn AudioSink = &audio;
        sink.play(SoundCue::Coin);
        (&audio).play(SoundCue::Click);
        assert_eq!(audio.played(), vec![SoundCue::Coin, SoundCue::Click]);
        assert_eq!(audio.take().len(), 2);
        assert!(audio.played().is_empty());
    }
}
