//! Unison stack: a primary oscillator plus two detuned copies.
//!
//! In [`UnisonMode::Triple`] the copies run at `freq × ratio` and
//! `freq / ratio` with `ratio = 2^(cents / 1200)`, share the primary's shape
//! and are averaged with it. Each copy owns a persistent phase accumulator,
//! so the detuned voices are phase-continuous across samples and blocks and
//! drift against the primary at the beat rate. All three are reset together
//! at note start, which gives a coherent attack before they spread.
//!
//! The copies are only advanced while the stack is in `Triple` mode.

use dualosc_core::cents_to_ratio;

use crate::oscillator::MorphOscillator;

/// Number of oscillators sounding per slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnisonMode {
    /// Primary oscillator only.
    #[default]
    Single,
    /// Primary plus one sharp and one flat copy.
    Triple,
}

impl UnisonMode {
    /// Map a voice count to a mode. Anything above one voice selects `Triple`.
    ///
    /// ```rust
    /// use dualosc_synth::UnisonMode;
    ///
    /// assert_eq!(UnisonMode::from_count(1), UnisonMode::Single);
    /// assert_eq!(UnisonMode::from_count(3), UnisonMode::Triple);
    /// ```
    pub fn from_count(count: u32) -> Self {
        if count >= 2 { Self::Triple } else { Self::Single }
    }

    /// Map a stored parameter value (voice count as `f32`) to a mode.
    ///
    /// The store only ever holds 1 or 3; anything from 2 up reads as `Triple`.
    pub fn from_param(value: f32) -> Self {
        if value.is_finite() && value >= 2.0 {
            Self::Triple
        } else {
            Self::Single
        }
    }

    /// Number of sounding oscillators.
    pub fn count(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Triple => 3,
        }
    }
}

/// Three persistent oscillators averaged into one unison signal.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::{UnisonMode, UnisonStack};
///
/// let mut stack = UnisonStack::new(48000.0);
/// stack.set_mode(UnisonMode::Triple, 12.0);
/// stack.set_shape(0.5);
/// stack.set_frequency(220.0);
///
/// let sample = stack.advance();
/// assert!((-1.0..=1.0).contains(&sample));
/// ```
#[derive(Debug, Clone)]
pub struct UnisonStack {
    primary: MorphOscillator,
    sharp: MorphOscillator,
    flat: MorphOscillator,
    mode: UnisonMode,
    detune_cents: f32,
    /// `2^(detune_cents / 1200)`, cached when the detune changes
    ratio: f32,
}

impl Default for UnisonStack {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl UnisonStack {
    /// Create a single-oscillator stack with no detune.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            primary: MorphOscillator::new(sample_rate),
            sharp: MorphOscillator::new(sample_rate),
            flat: MorphOscillator::new(sample_rate),
            mode: UnisonMode::Single,
            detune_cents: 0.0,
            ratio: 1.0,
        }
    }

    /// Set unison mode and detune in cents. Negative or NaN detune is 0.
    pub fn set_mode(&mut self, mode: UnisonMode, detune_cents: f32) {
        self.mode = mode;
        let cents = if detune_cents.is_nan() { 0.0 } else { detune_cents.max(0.0) };
        if cents != self.detune_cents {
            self.detune_cents = cents;
            self.ratio = cents_to_ratio(cents);
        }
    }

    /// Current unison mode.
    pub fn mode(&self) -> UnisonMode {
        self.mode
    }

    /// Current detune in cents.
    pub fn detune_cents(&self) -> f32 {
        self.detune_cents
    }

    /// Set the shared morph shape.
    #[inline]
    pub fn set_shape(&mut self, shape: f32) {
        self.primary.set_shape(shape);
        self.sharp.set_shape(shape);
        self.flat.set_shape(shape);
    }

    /// Set the primary frequency; the copies follow at `× ratio` and `/ ratio`.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.primary.set_frequency(freq_hz);
        if self.mode == UnisonMode::Triple {
            self.sharp.set_frequency(freq_hz * self.ratio);
            self.flat.set_frequency(freq_hz / self.ratio);
        }
    }

    /// Set sample rate on all three oscillators.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.primary.set_sample_rate(sample_rate);
        self.sharp.set_sample_rate(sample_rate);
        self.flat.set_sample_rate(sample_rate);
    }

    /// Reset all three phases to 0.
    pub fn reset(&mut self) {
        self.primary.reset();
        self.sharp.reset();
        self.flat.reset();
    }

    /// Access the primary oscillator.
    pub fn primary(&self) -> &MorphOscillator {
        &self.primary
    }

    /// Advance one sample.
    ///
    /// `Single` returns the primary's sample unchanged; `Triple` returns the
    /// unweighted average of all three.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let main = self.primary.advance();
        match self.mode {
            UnisonMode::Single => main,
            UnisonMode::Triple => (main + self.sharp.advance() + self.flat.advance()) / 3.0,
        }
    }
}
