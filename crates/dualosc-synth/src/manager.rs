//! Polyphonic voice allocation over any [`SynthVoice`].
//!
//! The manager owns a fixed array of voices, hands each note-on to a free
//! voice that can play the requested [`SoundKind`], and steals one when all
//! are busy. Stealing retriggers the chosen voice, whose envelopes restart
//! from their current level, so a steal does not click.

use crate::voice::{SoundKind, SynthVoice};

/// Voice stealing strategy when every playable voice is busy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoiceAllocationMode {
    /// Steal the voice whose note started longest ago (default).
    #[default]
    OldestNote,
    /// Cycle through voices in order.
    RoundRobin,
}

/// Fixed-size polyphonic voice pool.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::{SoundKind, Voice, VoiceManager};
///
/// let mut manager: VoiceManager<Voice, 4> = VoiceManager::new(48000.0);
/// manager.note_on(60, 1.0, SoundKind::DualOsc);
/// manager.note_on(64, 1.0, SoundKind::DualOsc);
/// assert_eq!(manager.active_voice_count(), 2);
///
/// let mut block = [0.0f32; 256];
/// manager.render_block(&mut [&mut block], 0, 256);
/// ```
#[derive(Debug, Clone)]
pub struct VoiceManager<V: SynthVoice, const N: usize> {
    voices: [V; N],
    /// Note-start stamp per voice, for oldest-note stealing
    ages: [u64; N],
    allocation_mode: VoiceAllocationMode,
    /// Global voice age counter
    age_counter: u64,
    /// Round-robin index
    round_robin_idx: usize,
}

impl<V: SynthVoice + Default, const N: usize> VoiceManager<V, N> {
    /// Create `N` default voices at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        Self::from_voices(core::array::from_fn(|_| {
            let mut voice = V::default();
            voice.set_sample_rate(sample_rate);
            voice
        }))
    }
}

impl<V: SynthVoice, const N: usize> VoiceManager<V, N> {
    /// Wrap an existing voice array.
    pub fn from_voices(voices: [V; N]) -> Self {
        Self {
            voices,
            ages: [0; N],
            allocation_mode: VoiceAllocationMode::default(),
            age_counter: 0,
            round_robin_idx: 0,
        }
    }

    /// Set sample rate for all voices.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// Set voice allocation mode.
    pub fn set_allocation_mode(&mut self, mode: VoiceAllocationMode) {
        self.allocation_mode = mode;
    }

    /// Get current allocation mode.
    pub fn allocation_mode(&self) -> VoiceAllocationMode {
        self.allocation_mode
    }

    /// Get number of voices.
    pub fn voice_count(&self) -> usize {
        N
    }

    /// Get number of active voices.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Get read access to all voices.
    pub fn voices(&self) -> &[V; N] {
        &self.voices
    }

    /// Get mutable access to all voices.
    pub fn voices_mut(&mut self) -> &mut [V; N] {
        &mut self.voices
    }

    /// Push one block's parameters into every voice.
    pub fn set_params(&mut self, params: &V::Params) {
        for voice in &mut self.voices {
            voice.set_params(params);
        }
    }

    /// Start `note` on a voice that can play `sound`.
    ///
    /// Returns the index of the voice used, or `None` if no voice accepts
    /// the sound.
    pub fn note_on(&mut self, note: u8, velocity: f32, sound: SoundKind) -> Option<usize> {
        let idx = self.allocate_voice(sound)?;
        self.age_counter += 1;
        self.ages[idx] = self.age_counter;
        self.voices[idx].start_note(note, velocity);
        Some(idx)
    }

    /// Release the held voice playing `note`, if any.
    pub fn note_off(&mut self, note: u8, allow_tail_off: bool) {
        if let Some(voice) = self
            .voices
            .iter_mut()
            .find(|v| v.is_active() && !v.is_releasing() && v.current_note() == Some(note))
        {
            voice.stop_note(allow_tail_off);
        }
    }

    /// Release every voice.
    pub fn all_notes_off(&mut self, allow_tail_off: bool) {
        for voice in &mut self.voices {
            if voice.is_active() {
                voice.stop_note(allow_tail_off);
            }
        }
    }

    /// Reset all voices.
    pub fn reset(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
        self.ages = [0; N];
        self.age_counter = 0;
        self.round_robin_idx = 0;
    }

    /// Clear `num` samples from `start` in every channel, then add every
    /// voice into them.
    pub fn render_block(&mut self, outputs: &mut [&mut [f32]], start: usize, num: usize) {
        for ch in outputs.iter_mut() {
            let end = (start + num).min(ch.len());
            if start < end {
                ch[start..end].fill(0.0);
            }
        }
        for voice in &mut self.voices {
            voice.render_block(outputs, start, num);
        }
    }

    fn allocate_voice(&mut self, sound: SoundKind) -> Option<usize> {
        // First, try to find a free voice
        if let Some(idx) = self
            .voices
            .iter()
            .position(|v| v.can_play(sound) && !v.is_active())
        {
            return Some(idx);
        }

        // All playable voices are busy, need to steal one
        match self.allocation_mode {
            VoiceAllocationMode::RoundRobin => {
                for offset in 0..N {
                    let idx = (self.round_robin_idx + offset) % N;
                    if self.voices[idx].can_play(sound) {
                        self.round_robin_idx = (idx + 1) % N;
                        return Some(idx);
                    }
                }
                None
            }
            VoiceAllocationMode::OldestNote => self
                .voices
                .iter()
                .enumerate()
                .filter(|(_, v)| v.can_play(sound))
                .min_by_key(|&(i, _)| self.ages[i])
                .map(|(i, _)| i),
        }
    }
}
