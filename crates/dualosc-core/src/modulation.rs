//! Modulation source abstraction.
//!
//! Unifies the autonomous signal generators of a voice: the bipolar LFO and
//! the unipolar ADSR envelopes (implemented in `dualosc-synth`). The voice
//! renderer drives all three through this trait.

/// Trait for anything that can generate modulation signals.
///
/// A bipolar LFO (−1 to 1) produces symmetric modulation such as vibrato,
/// while a unipolar envelope (0 to 1) sweeps in one direction.
///
/// # Example
///
/// ```rust
/// use dualosc_core::{Lfo, ModulationSource};
///
/// let mut lfo = Lfo::new(48000.0);
/// lfo.set(2.0, 1.0);
///
/// let value = lfo.mod_advance();
/// assert!(value >= -1.0 && value <= 1.0);
/// assert!(lfo.is_bipolar());
/// ```
pub trait ModulationSource {
    /// Advance one sample and return the new value.
    fn mod_advance(&mut self) -> f32;

    /// Whether this source is bipolar (−1 to 1) or unipolar (0 to 1).
    fn is_bipolar(&self) -> bool;

    /// Reset the source to its initial state.
    fn mod_reset(&mut self);

    /// The most recent value, without advancing.
    fn mod_value(&self) -> f32;
}
