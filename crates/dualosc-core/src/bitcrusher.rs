//! Bit crusher: bit depth quantization with zero-order-hold downsampling.
//!
//! This is the downstream "crush" stage that consumes the crush-mix
//! modulation a voice reports. It operates on the mixed output, not inside
//! a voice.
//!
//! # Quantization
//!
//! The bipolar input is mapped to 0..1, rounded to `2^bits − 1` steps and
//! mapped back:
//!
//! ```text
//! steps = 2^bits − 1
//! q     = round((x·0.5 + 0.5) · steps) / steps
//! held  = 2q − 1
//! ```
//!
//! # Sample Rate Reduction
//!
//! A new quantized value is latched every `downsample` samples and held in
//! between, producing the characteristic staircase and aliasing.
//!
//! The result is mixed with the dry input by `mix` and clamped to ±1.

use libm::{powf, roundf};

use crate::Effect;

/// Bit crusher with wet/dry mix.
///
/// ## Parameters
/// - `bit_depth`: Quantization depth in bits (1.0 to 24.0, default 16.0)
/// - `downsample`: Hold length in samples (1 and up, default 1)
/// - `mix`: Wet/dry mix (0.0 to 1.0, default 0.0)
///
/// # Example
///
/// ```rust
/// use dualosc_core::{Bitcrusher, Effect};
///
/// let mut crusher = Bitcrusher::new(44100.0);
/// crusher.set_params(4.0, 2, 1.0);
///
/// let output = crusher.process(0.3);
/// assert!((-1.0..=1.0).contains(&output));
/// ```
#[derive(Debug, Clone)]
pub struct Bitcrusher {
    sample_rate: f32,
    bit_depth: f32,
    downsample: u32,
    mix: f32,
    /// Quantization steps, `2^bits − 1`
    steps: f32,
    /// Samples since the last latch
    counter: u32,
    held: f32,
}

impl Default for Bitcrusher {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl Bitcrusher {
    /// Create a crusher at 16 bits, no downsampling, fully dry.
    pub fn new(sample_rate: f32) -> Self {
        let mut crusher = Self {
            sample_rate,
            bit_depth: 16.0,
            downsample: 1,
            mix: 0.0,
            steps: 0.0,
            counter: 0,
            held: 0.0,
        };
        crusher.set_bit_depth(16.0);
        crusher
    }

    /// Set all three parameters at once, as pushed once per block.
    pub fn set_params(&mut self, bit_depth: f32, downsample: u32, mix: f32) {
        self.set_bit_depth(bit_depth);
        self.set_downsample(downsample);
        self.set_mix(mix);
    }

    /// Set bit depth (clamped to 1.0–24.0).
    pub fn set_bit_depth(&mut self, bits: f32) {
        self.bit_depth = if bits.is_nan() { 16.0 } else { bits.clamp(1.0, 24.0) };
        self.steps = powf(2.0, self.bit_depth) - 1.0;
    }

    /// Get bit depth.
    pub fn bit_depth(&self) -> f32 {
        self.bit_depth
    }

    /// Set downsample factor (minimum 1).
    pub fn set_downsample(&mut self, factor: u32) {
        self.downsample = factor.max(1);
    }

    /// Get downsample factor.
    pub fn downsample(&self) -> u32 {
        self.downsample
    }

    /// Set wet/dry mix (clamped to 0.0–1.0).
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = if mix.is_nan() { 0.0 } else { mix.clamp(0.0, 1.0) };
    }

    /// Get wet/dry mix.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    #[inline]
    fn quantize(&self, x: f32) -> f32 {
        let q = roundf((x * 0.5 + 0.5) * self.steps) / self.steps;
        q * 2.0 - 1.0
    }
}

impl Effect for Bitcrusher {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        if self.counter == 0 {
            self.held = self.quantize(input);
        }
        self.counter += 1;
        if self.counter >= self.downsample {
            self.counter = 0;
        }

        (input * (1.0 - self.mix) + self.held * self.mix).clamp(-1.0, 1.0)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "bitcrusher: sample rate changed");
    }

    fn reset(&mut self) {
        self.counter = 0;
        self.held = 0.0;
    }
}
