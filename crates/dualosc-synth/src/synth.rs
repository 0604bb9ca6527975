//! Complete polyphonic dual-oscillator synthesizer.
//!
//! [`DualOscSynth`] ties a [`VoiceManager`] of [`Voice`]s to the downstream
//! [`Bitcrusher`]. Each block it takes one parameter snapshot, renders all
//! voices summed at unity gain, then crushes the mix. The crusher's wet mix is
//! the base mix plus the largest crush modulation any voice reported for the
//! block, clamped to 0..1.

use dualosc_core::{Bitcrusher, Effect};

use crate::manager::{VoiceAllocationMode, VoiceManager};
use crate::params::{SharedParams, SynthParams};
use crate::voice::{SoundKind, SynthVoice, Voice};

/// Output channels the crusher processes. Further channels pass through dry.
pub const MAX_CHANNELS: usize = 8;

/// Polyphonic dual-oscillator synth with `N` voices.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::{DualOscSynth, ParamKey, SharedParams};
///
/// let shared = SharedParams::new();
/// shared.set(ParamKey::FilterCutoff, 4000.0);
///
/// let mut synth: DualOscSynth<8> = DualOscSynth::new(48000.0);
/// synth.note_on(60, 1.0);
///
/// let mut left = [0.0f32; 256];
/// let mut right = [0.0f32; 256];
/// synth.process_block(&shared, &mut [&mut left, &mut right]);
/// assert!(left.iter().any(|&s| s != 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct DualOscSynth<const N: usize> {
    voices: VoiceManager<Voice, N>,
    crushers: [Bitcrusher; MAX_CHANNELS],
    sample_rate: f32,
    /// Crush mix applied in the last block
    crush_mix: f32,
}

impl<const N: usize> Default for DualOscSynth<N> {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl<const N: usize> DualOscSynth<N> {
    /// Create a synth prepared for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: VoiceManager::new(sample_rate),
            crushers: core::array::from_fn(|_| Bitcrusher::new(sample_rate)),
            sample_rate,
            crush_mix: 0.0,
        }
    }

    /// Configure the sample rate and silence everything.
    ///
    /// Not real-time safe; call before processing starts or when the host
    /// changes rate.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.voices.set_sample_rate(sample_rate);
        self.voices.reset();
        for crusher in &mut self.crushers {
            crusher.set_sample_rate(sample_rate);
        }
        self.crush_mix = 0.0;
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, voices = N, "synth prepared");
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Set the voice stealing strategy.
    pub fn set_allocation_mode(&mut self, mode: VoiceAllocationMode) {
        self.voices.set_allocation_mode(mode);
    }

    /// Start a note.
    pub fn note_on(&mut self, note: u8, velocity: f32) {
        self.voices.note_on(note, velocity, SoundKind::DualOsc);
    }

    /// Release a note with its envelope tail.
    pub fn note_off(&mut self, note: u8) {
        self.voices.note_off(note, true);
    }

    /// Release every held note with its envelope tail.
    pub fn all_notes_off(&mut self) {
        self.voices.all_notes_off(true);
    }

    /// Number of voices still sounding.
    pub fn active_voice_count(&self) -> usize {
        self.voices.active_voice_count()
    }

    /// The voice pool.
    pub fn voices(&self) -> &VoiceManager<Voice, N> {
        &self.voices
    }

    /// Crush mix used for the last block.
    pub fn crush_mix(&self) -> f32 {
        self.crush_mix
    }

    /// Render one block using the current contents of `shared`.
    ///
    /// The store is read exactly once, before any sample is produced.
    pub fn process_block(&mut self, shared: &SharedParams, outputs: &mut [&mut [f32]]) {
        let params = shared.snapshot();
        self.render(&params, outputs);
    }

    /// Render one block with an explicit parameter set.
    ///
    /// The block length is the shortest output channel.
    pub fn render(&mut self, params: &SynthParams, outputs: &mut [&mut [f32]]) {
        let params = params.sanitized();
        let num = outputs.iter().map(|ch| ch.len()).min().unwrap_or(0);

        self.voices.set_params(&params.voice);
        self.voices.render_block(outputs, 0, num);

        let crush_mod = self
            .voices
            .voices()
            .iter()
            .map(Voice::crush_modulation)
            .fold(0.0f32, f32::max);
        self.crush_mix = (params.crusher.mix + crush_mod).clamp(0.0, 1.0);

        if self.crush_mix <= 0.0 {
            return;
        }
        for (ch, crusher) in outputs.iter_mut().zip(self.crushers.iter_mut()) {
            crusher.set_params(params.crusher.bits, params.crusher.downsample, self.crush_mix);
            crusher.process_block_inplace(&mut ch[..num]);
        }
    }
}
