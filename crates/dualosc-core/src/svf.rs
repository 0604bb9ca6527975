//! Resonant state-variable low-pass filter.
//!
//! # Topology
//!
//! Implements the Topology-Preserving Transform (TPT) SVF after Zavalishin,
//! "The Art of VA Filter Design" (2012). The trapezoidal integrators keep the
//! analog prototype's response and stay stable while the cutoff is swept
//! every sample, which is exactly what the voice does with its filter
//! envelope and LFO.
//!
//! # Cutoff Range
//!
//! Cutoff is clamped to [`MIN_CUTOFF_HZ`, `MAX_CUTOFF_HZ`] and additionally
//! to `0.49 × sample_rate` so the coefficient never crosses Nyquist at low
//! sample rates.
//!
//! # Performance
//!
//! Coefficient updates use [`fast_tan`] below 10 kHz and [`libm::tanf`]
//! above, where the Padé approximation loses accuracy.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::PI;
use libm::tanf;

use crate::Effect;
use crate::math::{fast_tan, flush_denormal};

/// Lowest cutoff the filter accepts, in Hz.
pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Highest cutoff the filter accepts, in Hz.
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;

/// Resonant low-pass State Variable Filter (2-pole, 12 dB/oct).
///
/// ## Parameters
///
/// - `cutoff`: Cutoff frequency in Hz (20.0 to 20000.0, default 1000.0)
/// - `resonance`: Q factor (0.5 to 20.0, default 0.707)
///
/// # Example
///
/// ```rust
/// use dualosc_core::{Effect, StateVariableFilter};
///
/// let mut svf = StateVariableFilter::new(48000.0);
/// svf.set_cutoff(1000.0);
/// svf.set_resonance(2.0);
///
/// let output = svf.process(0.5);
/// assert!(output.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    // Integrator state
    ic1eq: f32,
    ic2eq: f32,

    // Coefficients
    g: f32,
    k: f32,

    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl StateVariableFilter {
    /// Create a new filter at cutoff 1000 Hz, Q 0.707 (Butterworth).
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            sample_rate,
            cutoff: 1000.0,
            resonance: 0.707,
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff frequency in Hz.
    ///
    /// Range: 20.0 to `min(20000, sample_rate × 0.49)`. Values are clamped;
    /// NaN falls back to the lower bound.
    pub fn set_cutoff(&mut self, freq: f32) {
        let max = MAX_CUTOFF_HZ.min(self.sample_rate * 0.49);
        self.cutoff = if freq.is_nan() {
            MIN_CUTOFF_HZ
        } else {
            freq.clamp(MIN_CUTOFF_HZ, max)
        };
        self.update_coefficients();
    }

    /// Get current cutoff frequency in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Set resonance (Q factor).
    ///
    /// Range: 0.5 to 20.0. Q = 0.707 gives a maximally flat response; higher
    /// values produce a resonant peak at the cutoff.
    pub fn set_resonance(&mut self, q: f32) {
        self.resonance = if q.is_nan() { 0.707 } else { q.clamp(0.5, 20.0) };
        self.update_coefficients();
    }

    /// Get current resonance (Q factor).
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    fn update_coefficients(&mut self) {
        let arg = PI * self.cutoff / self.sample_rate;
        self.g = if self.cutoff < 10_000.0 {
            fast_tan(arg)
        } else {
            tanf(arg)
        };
        self.k = 1.0 / self.resonance;
    }
}

impl Effect for StateVariableFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        v2
    }

    fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        // Re-clamp against the new Nyquist limit.
        self.set_cutoff(self.cutoff);
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, cutoff = self.cutoff, "svf: sample rate changed");
    }
}
