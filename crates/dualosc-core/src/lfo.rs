//! Low Frequency Oscillator for voice modulation.
//!
//! A single free-running sine source per voice. It carries no routing logic:
//! the modulation router decides which destination its output reaches.

use core::f32::consts::TAU;
use libm::sinf;

use crate::math::clamp_finite;
use crate::modulation::ModulationSource;

/// Free-running sine LFO with depth scaling.
///
/// Output is `sin(2π·phase) × depth`, so it spans `[-depth, depth]`.
/// The sample is taken at the current phase before the accumulator
/// advances, which makes the first sample after [`reset`](Lfo::reset) zero.
///
/// ## Parameters
/// - `rate`: Frequency in Hz (0.0 and up, default 5.0)
/// - `depth`: Output scale (0.0 to 1.0, default 0.0)
///
/// # Example
///
/// ```rust
/// use dualosc_core::Lfo;
///
/// let mut lfo = Lfo::new(44100.0);
/// lfo.set_rate(2.0);
/// lfo.set_depth(0.5);
///
/// let value = lfo.advance();
/// assert!((-0.5..=0.5).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    sample_rate: f32,
    rate: f32,
    depth: f32,
    /// Last output, for [`ModulationSource::mod_value`]
    last: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl Lfo {
    /// Create an LFO at 5 Hz with zero depth.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 5.0 / sample_rate,
            sample_rate,
            rate: 5.0,
            depth: 0.0,
            last: 0.0,
        }
    }

    /// Set rate and depth together, as pushed once per block.
    pub fn set(&mut self, rate_hz: f32, depth: f32) {
        self.set_rate(rate_hz);
        self.set_depth(depth);
    }

    /// Set rate in Hz, limited to 0..Nyquist. Negative and non-finite rates
    /// are treated as zero.
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = clamp_finite(rate_hz, 0.0, self.sample_rate * 0.5, 0.0);
        self.phase_inc = self.rate / self.sample_rate;
    }

    /// Get rate in Hz.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set depth (clamped to 0.0–1.0). NaN silences the LFO.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = clamp_finite(depth, 0.0, 1.0, 0.0);
    }

    /// Get depth.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Set sample rate, keeping the rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase_inc = self.rate / sample_rate;
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.last = 0.0;
    }

    /// Get current phase (0.0 - 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Produce the next value in `[-depth, depth]`.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let output = sinf(TAU * self.phase) * self.depth;

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        self.last = output;
        output
    }
}

impl ModulationSource for Lfo {
    fn mod_advance(&mut self) -> f32 {
        self.advance()
    }

    fn is_bipolar(&self) -> bool {
        true
    }

    fn mod_reset(&mut self) {
        self.reset();
    }

    fn mod_value(&self) -> f32 {
        self.last
    }
}
