//! Linear ADSR envelope generator.
//!
//! Each voice runs two of these: one for amplitude and one for the filter
//! cutoff offset. Segments are straight-line ramps, which keeps every stage
//! strictly monotonic and makes stage length exactly the configured time.
//!
//! # Timing
//!
//! The slope of a stage is latched when the stage is entered:
//!
//! | Stage   | Ramp                                  |
//! |---------|---------------------------------------|
//! | Attack  | current level → 1.0 over `attack`     |
//! | Decay   | 1.0 → sustain over `decay`            |
//! | Sustain | holds the sustain level from entry    |
//! | Release | level at note-off → 0.0 over `release`|
//!
//! Parameter changes pushed mid-stage take effect at the next transition.
//! A stage time of zero completes on the next sample.

use dualosc_core::ModulationSource;

/// ADSR envelope states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Envelope is inactive; output is zero.
    #[default]
    Idle,
    /// Ramping up toward 1.0.
    Attack,
    /// Falling from 1.0 toward the sustain level.
    Decay,
    /// Holding while the note is held.
    Sustain,
    /// Falling to zero after note-off.
    Release,
}

/// ADSR times in seconds and sustain as a 0–1 level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    /// Attack time in seconds.
    pub attack: f32,
    /// Decay time in seconds.
    pub decay: f32,
    /// Sustain level (0.0 to 1.0).
    pub sustain: f32,
    /// Release time in seconds.
    pub release: f32,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.1,
            sustain: 0.8,
            release: 0.3,
        }
    }
}

impl EnvelopeParams {
    /// Longest accepted stage time in seconds.
    pub const MAX_TIME: f32 = 10.0;

    /// Create a parameter set.
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Clamp times to `0..=MAX_TIME` and sustain to `0..=1`; NaN takes the default.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let time = |t: f32, fallback: f32| {
            if t.is_nan() { fallback } else { t.clamp(0.0, Self::MAX_TIME) }
        };
        Self {
            attack: time(self.attack, d.attack),
            decay: time(self.decay, d.decay),
            sustain: if self.sustain.is_nan() {
                d.sustain
            } else {
                self.sustain.clamp(0.0, 1.0)
            },
            release: time(self.release, d.release),
        }
    }
}

/// Linear ADSR envelope generator.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::{AdsrEnvelope, EnvelopeParams, EnvelopeState};
///
/// let mut env = AdsrEnvelope::new(48000.0);
/// env.set_params(EnvelopeParams::new(0.01, 0.1, 0.7, 0.2));
///
/// env.note_on();
/// for _ in 0..480 {
///     env.next_sample();
/// }
/// assert_eq!(env.state(), EnvelopeState::Decay);
///
/// env.note_off();
/// assert_eq!(env.state(), EnvelopeState::Release);
/// ```
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    state: EnvelopeState,
    /// Current output level
    level: f32,
    sample_rate: f32,
    params: EnvelopeParams,
    /// Per-sample increment for the current stage, latched at entry
    step: f32,
    /// Level the current stage ends at, latched at entry
    target: f32,
    /// Samples left in the current ramp
    remaining: u32,
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl AdsrEnvelope {
    /// Create an idle envelope with [`EnvelopeParams::default`].
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: EnvelopeState::Idle,
            level: 0.0,
            sample_rate,
            params: EnvelopeParams::default(),
            step: 0.0,
            target: 0.0,
            remaining: 0,
        }
    }

    /// Set all four parameters. Applied at the next stage transition.
    pub fn set_params(&mut self, params: EnvelopeParams) {
        self.params = params.sanitized();
    }

    /// Current parameter set.
    pub fn params(&self) -> EnvelopeParams {
        self.params
    }

    /// Set sample rate. Applied at the next stage transition.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Start (or restart) the attack from the current level.
    ///
    /// No reset to zero happens here, so retriggering a sounding voice does
    /// not click.
    pub fn note_on(&mut self) {
        self.enter(EnvelopeState::Attack);
    }

    /// Start the release from the current level.
    pub fn note_off(&mut self) {
        if self.state != EnvelopeState::Idle {
            self.enter(EnvelopeState::Release);
        }
    }

    /// Force envelope to idle state.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0.0;
        self.step = 0.0;
        self.target = 0.0;
        self.remaining = 0;
    }

    /// Get current state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Get current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// False only in `Idle`.
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Advance one sample and return the level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }
            EnvelopeState::Attack => {
                self.level += self.step;
                if self.stage_done() {
                    self.enter(EnvelopeState::Decay);
                }
            }
            EnvelopeState::Decay => {
                self.level -= self.step;
                if self.stage_done() {
                    self.enter(EnvelopeState::Sustain);
                }
            }
            EnvelopeState::Sustain => {}
            EnvelopeState::Release => {
                self.level -= self.step;
                if self.stage_done() {
                    self.state = EnvelopeState::Idle;
                }
            }
        }

        self.level
    }

    /// Count down the current ramp. On its last sample the level snaps to the
    /// target, so float rounding never leaves a stage short of its end point.
    #[inline]
    fn stage_done(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        let reached = if self.state == EnvelopeState::Attack {
            self.level >= self.target
        } else {
            self.level <= self.target
        };
        if self.remaining == 0 || reached {
            self.level = self.target;
            true
        } else {
            false
        }
    }

    /// Latch the ramp length for a stage of `seconds` (at least one sample).
    fn latch_samples(&mut self, seconds: f32) -> f32 {
        let samples = libm::roundf(seconds * self.sample_rate).max(1.0);
        self.remaining = samples as u32;
        samples
    }

    fn enter(&mut self, state: EnvelopeState) {
        self.state = state;
        match state {
            EnvelopeState::Idle | EnvelopeState::Sustain => {
                self.step = 0.0;
                self.target = self.level;
                self.remaining = 0;
            }
            EnvelopeState::Attack => {
                self.target = 1.0;
                let n = self.latch_samples(self.params.attack);
                self.step = (1.0 - self.level).max(0.0) / n;
            }
            EnvelopeState::Decay => {
                self.target = self.params.sustain;
                let n = self.latch_samples(self.params.decay);
                self.step = (self.level - self.target).max(0.0) / n;
            }
            EnvelopeState::Release => {
                self.target = 0.0;
                let n = self.latch_samples(self.params.release);
                self.step = self.level / n;
            }
        }
    }
}

impl ModulationSource for AdsrEnvelope {
    fn mod_advance(&mut self) -> f32 {
        self.next_sample()
    }

    fn is_bipolar(&self) -> bool {
        false
    }

    fn mod_reset(&mut self) {
        self.reset();
    }

    fn mod_value(&self) -> f32 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    fn env_with(params: EnvelopeParams) -> AdsrEnvelope {
        let mut env = AdsrEnvelope::new(SR);
        env.set_params(params);
        env
    }

    #[test]
    fn test_envelope_idle_state() {
        let mut env = AdsrEnvelope::new(SR);
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert!(!env.is_active());
        for _ in 0..100 {
            assert_eq!(env.next_sample(), 0.0);
        }
    }

    #[test]
    fn test_attack_reaches_peak_in_time() {
        let mut env = env_with(EnvelopeParams::new(0.01, 0.1, 0.5, 0.1));
        env.note_on();
        let attack_samples = (0.01 * SR) as usize;
        let mut prev = 0.0;
        for i in 0..attack_samples {
            let level = env.next_sample();
            assert!(level >= prev, "attack not monotonic at {i}: {prev} -> {level}");
            prev = level;
        }
        assert!((env.level() - 1.0).abs() < 1e-4, "peak {}", env.level());
        assert_eq!(env.state(), EnvelopeState::Decay);
    }

    #[test]
    fn test_decay_settles_on_sustain() {
        let mut env = env_with(EnvelopeParams::new(0.0, 0.05, 0.6, 0.1));
        env.note_on();
        let mut prev = env.next_sample();
        assert_eq!(prev, 1.0);
        for _ in 0..(0.05 * SR) as usize {
            let level = env.next_sample();
            assert!(level <= prev, "decay not monotonic: {prev} -> {level}");
            prev = level;
        }
        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert_eq!(env.level(), 0.6);

        for _ in 0..1000 {
            assert_eq!(env.next_sample(), 0.6, "sustain must hold");
        }
    }

    #[test]
    fn test_zero_times_complete_next_sample() {
        let mut env = env_with(EnvelopeParams::new(0.0, 0.0, 1.0, 0.0));
        env.note_on();
        assert_eq!(env.next_sample(), 1.0);
        assert_eq!(env.next_sample(), 1.0);
        assert_eq!(env.state(), EnvelopeState::Sustain);

        env.note_off();
        assert_eq!(env.next_sample(), 0.0);
        assert!(!env.is_active());
    }

    #[test]
    fn test_release_from_sustain_reaches_zero() {
        let mut env = env_with(EnvelopeParams::new(0.0, 0.0, 0.8, 0.3));
        env.note_on();
        for _ in 0..100 {
            env.next_sample();
        }
        env.note_off();
        assert_eq!(env.state(), EnvelopeState::Release);

        let release_samples = (0.3 * SR) as usize;
        let mut prev = env.level();
        for _ in 0..release_samples {
            let level = env.next_sample();
            assert!(level <= prev);
            prev = level;
        }
        assert_eq!(env.level(), 0.0);
        assert!(!env.is_active());
    }

    #[test]
    fn test_retrigger_starts_from_current_level() {
        let mut env = env_with(EnvelopeParams::new(0.1, 0.1, 0.5, 0.5));
        env.note_on();
        for _ in 0..2000 {
            env.next_sample();
        }
        env.note_off();
        for _ in 0..1000 {
            env.next_sample();
        }
        let before = env.level();
        assert!(before > 0.0);

        env.note_on();
        let after = env.next_sample();
        assert!(after >= before, "retrigger dropped level: {before} -> {after}");
    }

    #[test]
    fn test_params_latched_until_transition() {
        let mut env = env_with(EnvelopeParams::new(0.1, 0.1, 0.5, 0.1));
        env.note_on();
        env.next_sample();
        let step = env.level();

        // A shorter attack mid-stage does not change the current slope.
        env.set_params(EnvelopeParams::new(0.001, 0.1, 0.5, 0.1));
        let next = env.next_sample();
        assert!((next - 2.0 * step).abs() < 1e-6, "slope changed: {step} then {next}");
    }

    #[test]
    fn test_note_off_when_idle_is_noop() {
        let mut env = AdsrEnvelope::new(SR);
        env.note_off();
        assert_eq!(env.state(), EnvelopeState::Idle);
    }

    #[test]
    fn test_params_sanitized() {
        let p = EnvelopeParams::new(-1.0, f32::NAN, 3.0, 100.0).sanitized();
        assert_eq!(p.attack, 0.0);
        assert_eq!(p.decay, 0.1);
        assert_eq!(p.sustain, 1.0);
        assert_eq!(p.release, EnvelopeParams::MAX_TIME);
    }

    #[test]
    fn test_unipolar_mod_source() {
        let mut env = env_with(EnvelopeParams::new(0.0, 0.0, 1.0, 0.1));
        assert!(!env.is_bipolar());
        env.note_on();
        assert_eq!(env.mod_advance(), 1.0);
        assert_eq!(env.mod_value(), 1.0);
    }
}
