//! Audio cues using the Web Audio API
//!
//! Every cue is a short procedural tone sequence, no sample files. The tone
//! table is plain data so it can be tested off the browser; playback lives in
//! [`AudioManager`] (wasm only), which also plays decoded speech PCM.

use crate::sim::AudioCue;

/// Oscillator shape for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

/// One oscillator voice with an exponential pitch sweep and decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    /// Hz at the start of the tone
    pub freq_start: f32,
    /// Hz reached at the end of the tone
    pub freq_end: f32,
    /// Seconds after the cue fires
    pub delay: f64,
    /// Seconds
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl Tone {
    const fn new(wave: Waveform, freq_start: f32, freq_end: f32, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            freq_start,
            freq_end,
            delay: 0.0,
            duration,
            gain,
        }
    }
}

/// Lowest catch ping (combo 0)
pub const CATCH_BASE_PITCH: f32 = 440.0;
/// Pitch added per combo step
pub const CATCH_PITCH_STEP: f32 = 40.0;
pub const CATCH_MAX_PITCH: f32 = 1600.0;

/// Catch ping pitch for the combo reached by the catch
pub fn catch_pitch(combo: u32) -> f32 {
    (CATCH_BASE_PITCH + CATCH_PITCH_STEP * combo as f32).min(CATCH_MAX_PITCH)
}

/// Voices for a cue
pub fn tones_for(cue: AudioCue) -> Vec<Tone> {
    match cue {
        // Short rising blip
        AudioCue::Switch => vec![Tone::new(Waveform::Sine, 300.0, 600.0, 0.1, 0.3)],
        AudioCue::Catch { combo } => {
            let pitch = catch_pitch(combo);
            vec![Tone::new(Waveform::Triangle, pitch, pitch * 1.5, 0.15, 0.4)]
        }
        // Descending buzz over a sub thump
        AudioCue::Crash => vec![
            Tone::new(Waveform::Sawtooth, 400.0, 50.0, 0.5, 0.5),
            Tone::new(Waveform::Sine, 80.0, 30.0, 0.4, 0.6),
        ],
        // The switch voice, falling
        AudioCue::Reset => vec![Tone::new(Waveform::Sine, 600.0, 300.0, 0.12, 0.25)],
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Tone, Waveform, tones_for};
    use crate::settings::Settings;
    use crate::sim::AudioCue;

    impl From<Waveform> for OscillatorType {
        fn from(wave: Waveform) -> Self {
            match wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        voice: bool,
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
            let settings = Settings::default();
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
                voice: settings.voice_commentary,
            }
        }

        /// Resume the context (browsers require a user gesture first)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
            self.voice = settings.voice_commentary && !settings.muted;
        }

        /// Play a cue. Silently does nothing without a context or when muted.
        pub fn play(&self, cue: AudioCue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_context() else {
                return;
            };
            for tone in tones_for(cue) {
                if play_tone(ctx, &tone, self.volume).is_none() {
                    log::debug!("Dropped {:?} voice", cue);
                }
            }
        }

        /// Play mono PCM samples in [-1, 1] at `sample_rate`
        pub fn play_pcm(&self, samples: &[f32], sample_rate: f32) {
            if !self.voice || samples.is_empty() {
                return;
            }
            let Some(ctx) = self.live_context() else {
                return;
            };
            if play_buffer(ctx, samples, sample_rate).is_none() {
                log::warn!("Speech playback failed");
            }
        }

        fn live_context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(ctx: &AudioContext, wave: Waveform) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(wave.into());
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
        let (osc, gain) = create_osc(ctx, tone.wave)?;
        let t = ctx.current_time() + tone.delay;
        let end = t + tone.duration;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok()?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;
        osc.frequency().set_value_at_time(tone.freq_start, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.freq_end, end)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end + 0.05).ok()
    }

    fn play_buffer(ctx: &AudioContext, samples: &[f32], sample_rate: f32) -> Option<()> {
        let buffer = ctx
            .create_buffer(1, samples.len() as u32, sample_rate)
            .ok()?;
        let mut channel = samples.to_vec();
        buffer.copy_to_channel(&mut channel[..], 0).ok()?;

        let source = ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(&buffer));
        source.connect_with_audio_node(&ctx.destination()).ok()?;
        source.start().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_pitch_rises_then_caps() {
        assert_eq!(catch_pitch(0), 440.0);
        assert_eq!(catch_pitch(1), 480.0);
        assert_eq!(catch_pitch(10), 840.0);
        assert_eq!(catch_pitch(29), 1600.0);
        assert_eq!(catch_pitch(500), 1600.0);
    }

    #[test]
    fn test_catch_voice_follows_combo() {
        let low = tones_for(AudioCue::Catch { combo: 1 });
        let high = tones_for(AudioCue::Catch { combo: 5 });
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].wave, Waveform::Triangle);
        assert!(high[0].freq_start > low[0].freq_start);
    }

    #[test]
    fn test_crash_has_sub_thump() {
        let tones = tones_for(AudioCue::Crash);
        assert_eq!(tones.len(), 2);
        assert!(tones.iter().all(|t| t.freq_end < t.freq_start));
        assert_eq!(tones[0].wave, Waveform::Sawtooth);
    }

    #[test]
    fn test_reset_mirrors_switch() {
        let switch = tones_for(AudioCue::Switch)[0];
        let reset = tones_for(AudioCue::Reset)[0];
        assert_eq!(switch.wave, reset.wave);
        assert!(switch.freq_end > switch.freq_start);
        assert!(reset.freq_end < reset.freq_start);
    }

    #[test]
    fn test_tones_are_audible() {
        let cues = [
            AudioCue::Switch,
            AudioCue::Catch { combo: 3 },
            AudioCue::Crash,
            AudioCue::Reset,
        ];
        for cue in cues {
            for tone in tones_for(cue) {
                // Exponential ramps need strictly positive targets
                assert!(tone.freq_start > 0.0 && tone.freq_end > 0.0);
                assert!(tone.duration > 0.0);
                assert!(tone.gain > 0.0 && tone.gain <= 1.0);
            }
        }
    }
}
