//! Morphable audio-rate oscillator.
//!
//! A single phase accumulator drives three naive waveforms that are blended
//! by one continuous `shape` control:
//!
//! ```text
//! shape 0.0 ──── 0.5 ──── 1.0
//!       sine     saw      square
//! ```
//!
//! The morph is two linear stages. On `[0, 0.5]` sine fades into saw; on
//! `[0.5, 1]` that result (now pure saw) fades into square. Saw is shared by
//! both stages, so the output is continuous in `shape`.

use core::f32::consts::TAU;
use libm::sinf;

use dualosc_core::lerp;

/// Evaluate the morphed waveform at `phase` (0.0–1.0) for `shape` (0.0–1.0).
///
/// # Example
///
/// ```rust
/// use dualosc_synth::morph_sample;
///
/// // shape 0.5 is a pure saw: 2·phase − 1
/// assert!((morph_sample(0.25, 0.5) - (-0.5)).abs() < 1e-6);
/// // shape 1.0 is a pure square
/// assert_eq!(morph_sample(0.25, 1.0), 1.0);
/// ```
#[inline]
pub fn morph_sample(phase: f32, shape: f32) -> f32 {
    let sine = sinf(TAU * phase);
    let saw = 2.0 * phase - 1.0;
    let square = if phase < 0.5 { 1.0 } else { -1.0 };

    let t1 = (shape * 2.0).clamp(0.0, 1.0);
    let t2 = ((shape - 0.5) * 2.0).clamp(0.0, 1.0);
    let first = lerp(sine, saw, t1);
    lerp(first, square, t2)
}

/// Phase-accumulator oscillator morphing sine → saw → square.
///
/// The accumulator advances before the waveform is evaluated, so the first
/// sample after [`reset`](Self::reset) is taken at `freq / sample_rate`.
/// Wrapping subtracts 1.0 rather than using a modulo, and the frequency is
/// capped at Nyquist so a single subtraction always keeps the phase in
/// `[0, 1)`.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::MorphOscillator;
///
/// let mut osc = MorphOscillator::new(48000.0);
/// osc.set_frequency(440.0);
/// osc.set_shape(0.25); // halfway between sine and saw
///
/// let sample = osc.advance();
/// assert!((-1.0..=1.0).contains(&sample));
/// ```
#[derive(Debug, Clone)]
pub struct MorphOscillator {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    sample_rate: f32,
    frequency: f32,
    shape: f32,
}

impl Default for MorphOscillator {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl MorphOscillator {
    /// Create a sine oscillator at 440 Hz.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 440.0 / sample_rate,
            sample_rate,
            frequency: 440.0,
            shape: 0.0,
        }
    }

    /// Set frequency in Hz (clamped to 0..Nyquist; NaN is treated as 0).
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        let nyquist = self.sample_rate * 0.5;
        self.frequency = if freq_hz.is_nan() {
            0.0
        } else {
            freq_hz.clamp(0.0, nyquist)
        };
        self.phase_inc = self.frequency / self.sample_rate;
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the morph position (clamped to 0.0–1.0).
    #[inline]
    pub fn set_shape(&mut self, shape: f32) {
        self.shape = if shape.is_nan() { 0.0 } else { shape.clamp(0.0, 1.0) };
    }

    /// Get the morph position.
    pub fn shape(&self) -> f32 {
        self.shape
    }

    /// Set sample rate and recalculate the phase increment.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_frequency(self.frequency);
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Get current phase.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one sample and return the morphed output in `[-1, 1]`.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        morph_sample(self.phase, self.shape)
    }
}
