//! The per-note voice renderer.
//!
//! A [`Voice`] owns two unison oscillator slots, one LFO, an amplitude and a
//! filter envelope, and a resonant low-pass. Once per block the manager
//! pushes a [`VoiceParams`] snapshot; [`render_block`](SynthVoice::render_block)
//! then runs the sample loop:
//!
//! 1. advance the LFO
//! 2. route it through the one-hot [`ModRouting`]
//! 3. derive both oscillator frequencies from the base pitch, each slot's
//!    semitone offset and the shared pitch modulation
//! 4. advance both unison stacks and average them
//! 5. fold with `drive = base + lfo·fold`, clamped to 0..1
//! 6. advance the filter envelope, set the modulated cutoff, filter
//! 7. advance the amplitude envelope, apply tremolo if routed
//! 8. add `filtered × amp` into every output channel
//!
//! A note-on only arms the envelopes. They start at the top of the next
//! `render_block`, after that block's parameters are in place, so the first
//! note of a session gets the patch's attack rather than the defaults.
//!
//! An idle voice returns before touching any state.

use dualosc_core::{
    Effect, Lfo, MAX_CUTOFF_HZ, MIN_CUTOFF_HZ, ModulationSource, StateVariableFilter, fold,
    midi_to_freq, semitones_to_ratio,
};

use crate::envelope::AdsrEnvelope;
use crate::params::VoiceParams;
use crate::router::{CUTOFF_MOD_HZ, ModRouting, PITCH_MOD_SEMITONES, TREMOLO_DEPTH};
use crate::unison::UnisonStack;

/// Kind of sound a note-on asks for.
///
/// A manager may hold voices of several kinds; it only hands a note to a
/// voice whose [`SynthVoice::can_play`] accepts the kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SoundKind {
    /// A dual-oscillator patch.
    #[default]
    DualOsc,
    /// Any other sound, identified by an application-defined tag.
    Other(u16),
}

/// Uniform interface the voice manager drives.
///
/// `render_block` adds into `outputs`; clearing the block is the caller's
/// job, so several voices can share one buffer.
pub trait SynthVoice {
    /// Per-block parameter snapshot this voice consumes.
    type Params: Copy;

    /// Whether this voice can render `sound`.
    fn can_play(&self, sound: SoundKind) -> bool;

    /// Begin a note. Starting an already sounding voice retriggers it.
    fn start_note(&mut self, note: u8, velocity: f32);

    /// Release the note. With `allow_tail_off` false the voice goes silent
    /// immediately.
    fn stop_note(&mut self, allow_tail_off: bool);

    /// Push the parameter snapshot for the next block.
    fn set_params(&mut self, params: &Self::Params);

    /// Add `num` samples starting at `start` into every channel of `outputs`.
    fn render_block(&mut self, outputs: &mut [&mut [f32]], start: usize, num: usize);

    /// True from note start until the release has finished.
    fn is_active(&self) -> bool;

    /// True once note-off has been received and the tail is playing.
    fn is_releasing(&self) -> bool {
        false
    }

    /// MIDI note this voice is playing, if any.
    fn current_note(&self) -> Option<u8>;

    /// Update the sample rate. Not real-time safe in general.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Silence the voice and clear all DSP state.
    fn reset(&mut self);
}

/// Lifecycle of a voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceState {
    /// Not playing; renders nothing.
    #[default]
    Idle,
    /// Note held.
    Sounding,
    /// Note released, amplitude envelope still running.
    Releasing,
}

/// One note of the dual-oscillator synth.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::{SynthVoice, Voice, VoiceParams};
///
/// let mut voice = Voice::new(48000.0);
/// voice.set_params(&VoiceParams::default());
/// voice.start_note(69, 1.0);
///
/// let mut left = [0.0f32; 64];
/// let mut right = [0.0f32; 64];
/// voice.render_block(&mut [&mut left, &mut right], 0, 64);
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct Voice {
    osc1: UnisonStack,
    osc2: UnisonStack,
    lfo: Lfo,
    amp_env: AdsrEnvelope,
    filter_env: AdsrEnvelope,
    filter: StateVariableFilter,
    params: VoiceParams,
    sample_rate: f32,
    /// Unmodulated pitch in Hz
    base_freq: f32,
    note: Option<u8>,
    state: VoiceState,
    /// Envelopes wait for the next block's parameters
    trigger_pending: bool,
    /// Largest |lfo × crush| seen in the last rendered block
    crush_mod: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl Voice {
    /// Create an idle voice.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            osc1: UnisonStack::new(sample_rate),
            osc2: UnisonStack::new(sample_rate),
            lfo: Lfo::new(sample_rate),
            amp_env: AdsrEnvelope::new(sample_rate),
            filter_env: AdsrEnvelope::new(sample_rate),
            filter: StateVariableFilter::new(sample_rate),
            params: VoiceParams::default(),
            sample_rate,
            base_freq: 440.0,
            note: None,
            state: VoiceState::Idle,
            trigger_pending: false,
            crush_mod: 0.0,
        }
    }

    /// Start at an explicit frequency in Hz, independent of MIDI.
    ///
    /// Oscillators and LFO restart at phase 0. The filter is only cleared
    /// when the voice was idle, so a retrigger keeps its resonance ringing.
    /// The envelopes start at the next [`render_block`](SynthVoice::render_block).
    pub fn start_frequency(&mut self, freq_hz: f32) {
        self.base_freq = if freq_hz.is_finite() { freq_hz.max(0.0) } else { 0.0 };
        if self.state == VoiceState::Idle {
            self.filter.reset();
        }
        self.osc1.reset();
        self.osc2.reset();
        self.lfo.mod_reset();
        self.trigger_pending = true;
        self.state = VoiceState::Sounding;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// Base frequency in Hz.
    pub fn base_frequency(&self) -> f32 {
        self.base_freq
    }

    /// Amplitude envelope.
    pub fn amp_envelope(&self) -> &AdsrEnvelope {
        &self.amp_env
    }

    /// Filter envelope.
    pub fn filter_envelope(&self) -> &AdsrEnvelope {
        &self.filter_env
    }

    /// Current filter cutoff in Hz (the last modulated value).
    pub fn filter_cutoff(&self) -> f32 {
        self.filter.cutoff()
    }

    /// Crush mix contribution from the last block: the largest
    /// `|lfo × crush multiplier|` seen, zero unless the LFO targets crush.
    ///
    /// The crusher lives outside the voice; the owner reads this after
    /// rendering to scale its own mix.
    pub fn crush_modulation(&self) -> f32 {
        self.crush_mod
    }

    /// Start both envelopes if a note-on is waiting.
    fn fire_trigger(&mut self) {
        if self.trigger_pending {
            self.amp_env.set_params(self.params.amp_env);
            self.filter_env.set_params(self.params.filter_env);
            self.amp_env.note_on();
            self.filter_env.note_on();
            self.trigger_pending = false;
        }
    }

    fn clear_note(&mut self) {
        self.state = VoiceState::Idle;
        self.note = None;
    }

    /// Push block-rate parameters into the DSP components.
    fn apply_params(&mut self) {
        let p = &self.params;
        self.osc1.set_mode(p.unison, p.detune_cents);
        self.osc2.set_mode(p.unison, p.detune_cents);
        self.osc1.set_shape(p.osc1_shape);
        self.osc2.set_shape(p.osc2_shape);
        self.lfo.set(p.lfo_rate, p.lfo_depth);
        self.filter.set_resonance(p.resonance);
        self.amp_env.set_params(p.amp_env);
        self.filter_env.set_params(p.filter_env);
    }
}

impl SynthVoice for Voice {
    type Params = VoiceParams;

    fn can_play(&self, sound: SoundKind) -> bool {
        sound == SoundKind::DualOsc
    }

    /// Velocity is accepted for interface compatibility; it does not scale
    /// the output.
    fn start_note(&mut self, note: u8, _velocity: f32) {
        self.note = Some(note);
        self.start_frequency(midi_to_freq(note));
    }

    fn stop_note(&mut self, allow_tail_off: bool) {
        if self.state == VoiceState::Idle {
            return;
        }
        self.fire_trigger();
        self.amp_env.note_off();
        self.filter_env.note_off();
        self.state = VoiceState::Releasing;
        if !allow_tail_off || !self.amp_env.is_active() {
            self.amp_env.reset();
            self.filter_env.reset();
            self.clear_note();
        }
    }

    /// Out-of-range values are clamped and NaN takes the default.
    fn set_params(&mut self, params: &VoiceParams) {
        self.params = params.sanitized();
    }

    fn render_block(&mut self, outputs: &mut [&mut [f32]], start: usize, num: usize) {
        if self.state == VoiceState::Idle {
            self.crush_mod = 0.0;
            return;
        }

        self.apply_params();
        self.fire_trigger();

        let p = self.params;
        let routing = ModRouting::new(p.lfo_destination);
        let frames = outputs
            .iter()
            .map(|ch| ch.len().saturating_sub(start))
            .min()
            .unwrap_or(num)
            .min(num);

        let mut crush_peak = 0.0f32;

        for n in start..start + frames {
            let lfo = self.lfo.mod_advance();

            let semi_mod = lfo * PITCH_MOD_SEMITONES * routing.pitch;
            self.osc1
                .set_frequency(self.base_freq * semitones_to_ratio(p.osc1_semitones + semi_mod));
            self.osc2
                .set_frequency(self.base_freq * semitones_to_ratio(p.osc2_semitones + semi_mod));

            let mixed = 0.5 * (self.osc1.advance() + self.osc2.advance());

            let drive = (p.fold_drive + lfo * routing.fold).clamp(0.0, 1.0);
            let folded = fold(mixed, drive);

            let filter_level = self.filter_env.mod_advance();
            let cutoff = p.cutoff_hz
                + p.filter_env_amount * filter_level
                + lfo * CUTOFF_MOD_HZ * routing.cutoff;
            self.filter
                .set_cutoff(cutoff.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ));
            let filtered = self.filter.process(folded);

            let mut amp = self.amp_env.mod_advance();
            if routing.amplitude > 0.0 {
                amp = (amp * (1.0 + TREMOLO_DEPTH * lfo)).clamp(0.0, 1.0);
            }

            crush_peak = crush_peak.max((lfo * routing.crush).abs());

            let out = filtered * amp;
            for ch in outputs.iter_mut() {
                ch[n] += out;
            }

            if !self.amp_env.is_active() {
                self.filter_env.reset();
                self.clear_note();
                break;
            }
        }

        self.crush_mod = crush_peak;
    }

    fn is_active(&self) -> bool {
        self.state != VoiceState::Idle
    }

    fn is_releasing(&self) -> bool {
        self.state == VoiceState::Releasing
    }

    fn current_note(&self) -> Option<u8> {
        self.note
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.osc1.set_sample_rate(sample_rate);
        self.osc2.set_sample_rate(sample_rate);
        self.lfo.set_sample_rate(sample_rate);
        self.amp_env.set_sample_rate(sample_rate);
        self.filter_env.set_sample_rate(sample_rate);
        self.filter.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.osc1.reset();
        self.osc2.reset();
        self.lfo.mod_reset();
        self.amp_env.mod_reset();
        self.filter_env.mod_reset();
        self.filter.reset();
        self.trigger_pending = false;
        self.crush_mod = 0.0;
        self.clear_note();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EnvelopeParams;
    use crate::router::ModDestination;

    const SR: f32 = 48000.0;

    fn flat_params() -> VoiceParams {
        VoiceParams {
            cutoff_hz: 20000.0,
            amp_env: EnvelopeParams::new(0.0, 0.0, 1.0, 0.3),
            filter_env: EnvelopeParams::new(0.0, 0.0, 1.0, 0.3),
            ..VoiceParams::default()
        }
    }

    fn render(voice: &mut Voice, n: usize) -> Vec<f32> {
        let mut buf = vec![0.0f32; n];
        voice.render_block(&mut [&mut buf], 0, n);
        buf
    }

    #[test]
    fn test_idle_voice_writes_nothing() {
        let mut voice = Voice::new(SR);
        let mut buf = [0.25f32; 128];
        voice.render_block(&mut [&mut buf], 0, 128);
        assert!(buf.iter().all(|&s| s == 0.25), "idle voice touched the buffer");
        assert!(!voice.is_active());
    }

    #[test]
    fn test_render_accumulates_into_outputs() {
        let mut voice = Voice::new(SR);
        voice.set_params(&flat_params());
        voice.start_note(69, 1.0);
        let mut a = [1.0f32; 64];
        let mut b = [0.0f32; 64];
        voice.render_block(&mut [&mut a, &mut b], 0, 64);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - 1.0 - y).abs() < 1e-6, "voice must add, not overwrite");
        }
    }

    #[test]
    fn test_render_respects_start_offset() {
        let mut voice = Voice::new(SR);
        voice.set_params(&flat_params());
        voice.start_note(60, 1.0);
        let mut buf = [0.0f32; 64];
        voice.render_block(&mut [&mut buf], 32, 32);
        assert!(buf[..32].iter().all(|&s| s == 0.0));
        assert!(buf[32..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_hard_stop_silences_immediately() {
        let mut voice = Voice::new(SR);
        voice.set_params(&flat_params());
        voice.start_note(64, 1.0);
        render(&mut voice, 256);
        voice.stop_note(false);
        assert!(!voice.is_active());
        assert_eq!(voice.current_note(), None);
        assert!(render(&mut voice, 256).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_tail_off_goes_idle_after_release() {
        let mut voice = Voice::new(SR);
        voice.set_params(&flat_params());
        voice.start_note(64, 1.0);
        render(&mut voice, 512);

        voice.stop_note(true);
        assert_eq!(voice.state(), VoiceState::Releasing);
        assert_eq!(voice.current_note(), Some(64));

        // 0.3 s release plus one block of slack
        render(&mut voice, (0.3 * SR) as usize + 64);
        assert_eq!(voice.state(), VoiceState::Idle);
        assert_eq!(voice.current_note(), None);
    }

    #[test]
    fn test_velocity_does_not_scale_output() {
        let mut loud = Voice::new(SR);
        let mut soft = Voice::new(SR);
        for v in [&mut loud, &mut soft] {
            v.set_params(&flat_params());
        }
        loud.start_note(57, 1.0);
        soft.start_note(57, 0.1);
        assert_eq!(render(&mut loud, 512), render(&mut soft, 512));
    }

    #[test]
    fn test_cutoff_stays_clamped_under_extreme_modulation() {
        let mut voice = Voice::new(SR);
        let mut params = flat_params();
        params.cutoff_hz = 19_000.0;
        params.filter_env_amount = 10_000.0;
        params.lfo_depth = 1.0;
        params.lfo_rate = 20.0;
        params.lfo_destination = ModDestination::Cutoff;
        voice.set_params(&params);
        voice.start_note(60, 1.0);
        for _ in 0..200 {
            render(&mut voice, 16);
            let c = voice.filter_cutoff();
            assert!((MIN_CUTOFF_HZ..=MAX_CUTOFF_HZ).contains(&c), "cutoff {c}");
        }

        params.cutoff_hz = 20.0;
        params.filter_env_amount = -10_000.0;
        voice.set_params(&params);
        for _ in 0..200 {
            render(&mut voice, 16);
            let c = voice.filter_cutoff();
            assert!(c >= MIN_CUTOFF_HZ, "cutoff {c}");
        }
    }

    #[test]
    fn test_crush_modulation_only_when_routed() {
        let mut voice = Voice::new(SR);
        let mut params = flat_params();
        params.lfo_depth = 0.8;
        params.lfo_rate = 10.0;
        params.lfo_destination = ModDestination::Fold;
        voice.set_params(&params);
        voice.start_note(60, 1.0);
        render(&mut voice, 4800);
        assert_eq!(voice.crush_modulation(), 0.0);

        params.lfo_destination = ModDestination::Crush;
        voice.set_params(&params);
        render(&mut voice, 4800);
        let crush = voice.crush_modulation();
        assert!(crush > 0.7 && crush <= 0.8, "crush peak {crush}");
    }

    #[test]
    fn test_envelopes_start_with_params_pushed_after_note_on() {
        let mut voice = Voice::new(SR);
        voice.start_note(69, 1.0);
        voice.set_params(&flat_params());
        render(&mut voice, 1);
        assert_eq!(voice.amp_envelope().level(), 1.0, "attack of 0 s, not the default");
    }

    #[test]
    fn test_note_off_before_first_block_is_silent() {
        let mut voice = Voice::new(SR);
        voice.set_params(&flat_params());
        voice.start_note(60, 1.0);
        voice.stop_note(true);
        assert_eq!(voice.state(), VoiceState::Releasing);

        let out = render(&mut voice, (0.3 * SR) as usize + 64);
        assert!(out.iter().all(|&s| s == 0.0), "released before it sounded");
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn test_nan_params_are_sanitized() {
        let mut voice = Voice::new(SR);
        let mut params = flat_params();
        params.cutoff_hz = 5000.0;
        params.lfo_depth = f32::NAN;
        params.lfo_destination = ModDestination::None;
        voice.set_params(&params);
        voice.start_note(60, 1.0);
        let out = render(&mut voice, 256);
        let c = voice.filter_cutoff();
        assert!((c - 5000.0).abs() < 1e-3, "cutoff with NaN depth: {c}");
        assert!(out.iter().all(|s| s.is_finite()));

        params.lfo_rate = f32::NAN;
        params.fold_drive = f32::INFINITY;
        voice.set_params(&params);
        assert!(render(&mut voice, 256).iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_tremolo_bounds_amplitude() {
        let mut voice = Voice::new(SR);
        let mut params = flat_params();
        params.osc1_shape = 1.0;
        params.osc2_shape = 1.0;
        params.lfo_depth = 1.0;
        params.lfo_destination = ModDestination::Amplitude;
        voice.set_params(&params);
        voice.start_note(48, 1.0);
        let out = render(&mut voice, 9600);
        let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak.is_finite() && peak < 2.0, "peak {peak}");
    }
}
