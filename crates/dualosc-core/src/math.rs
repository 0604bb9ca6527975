//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and `no_std` compatible.
//!
//! # Pitch Conversions
//!
//! - [`midi_to_freq`] - MIDI note number to Hz (A4 = 69 = 440 Hz)
//! - [`cents_to_ratio`] / [`semitones_to_ratio`] - Interval to frequency ratio
//!
//! # Utilities
//!
//! - [`lerp`] - Linear interpolation
//! - [`clamp_finite`] - Clamp with a fallback for NaN and infinities
//! - [`flush_denormal`] - Zero out subnormal feedback state
//! - [`fast_tan`] - Padé approximant of `tan` for filter coefficients

use libm::powf;

/// Convert MIDI note number to frequency in Hz.
///
/// Uses standard tuning: A4 (note 69) = 440 Hz.
///
/// # Example
/// ```rust
/// use dualosc_core::midi_to_freq;
///
/// assert!((midi_to_freq(69) - 440.0).abs() < 1e-3);
/// assert!((midi_to_freq(57) - 220.0).abs() < 1e-3);
/// ```
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * powf(2.0, (f32::from(note) - 69.0) / 12.0)
}

/// Convert cents to frequency ratio.
///
/// 100 cents = 1 semitone, 1200 cents = 1 octave. Zero cents is exactly 1.0.
#[inline]
pub fn cents_to_ratio(cents: f32) -> f32 {
    powf(2.0, cents / 1200.0)
}

/// Convert semitones to frequency ratio.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    powf(2.0, semitones / 12.0)
}

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `x` to `[min, max]`, substituting `fallback` for non-finite input.
///
/// `f32::clamp` passes NaN straight through; parameter values coming from a
/// host must never poison the audio path, so NaN and ±inf map to `fallback`.
///
/// # Example
/// ```rust
/// use dualosc_core::clamp_finite;
///
/// assert_eq!(clamp_finite(2.0, 0.0, 1.0, 0.5), 1.0);
/// assert_eq!(clamp_finite(f32::NAN, 0.0, 1.0, 0.5), 0.5);
/// ```
#[inline]
pub fn clamp_finite(x: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if x.is_finite() {
        x.clamp(min, max)
    } else {
        fallback
    }
}

/// Flush subnormal values to zero.
///
/// Filter integrators decay toward zero indefinitely once the input goes
/// silent; subnormal arithmetic is dramatically slower on most CPUs.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Fast tangent approximation (Padé [3/2]).
///
/// `tan(x) ≈ x·(15 − x²) / (15 − 6x²)`. Accurate to better than 0.1% for
/// `x < π/4.8`, i.e. cutoff below 10 kHz at 48 kHz.
#[inline]
pub fn fast_tan(x: f32) -> f32 {
    let x2 = x * x;
    x * (15.0 - x2) / (15.0 - 6.0 * x2)
}
