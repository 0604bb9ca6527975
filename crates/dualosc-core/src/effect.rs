//! Core per-sample processor trait.
//!
//! [`Effect`] is implemented by every stateful mono processor in the engine
//! (the resonant filter and the bit crusher). Voices drive it one sample at a
//! time; downstream stages may use the block helper.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: a voice renders one signal and duplicates it to
//!   every output channel, so processors only ever see `f32 -> f32`.
//! - **Object-safe**: `dyn Effect` works, but the voice holds concrete types.
//! - **No allocations**: every method is callable from the audio thread.

/// Stateful mono sample processor.
///
/// # Example
///
/// ```rust
/// use dualosc_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a buffer in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate and recompute rate-dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state without touching parameters.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler;

    impl Effect for Doubler {
        fn process(&mut self, input: f32) -> f32 {
            input * 2.0
        }

        fn set_sample_rate(&mut self, _sample_rate: f32) {}

        fn reset(&mut self) {}
    }

    #[test]
    fn test_block_inplace_uses_process() {
        let mut buffer = [0.25, -0.5, 1.0];
        Doubler.process_block_inplace(&mut buffer);
        assert_eq!(buffer, [0.5, -1.0, 2.0]);
    }
}
