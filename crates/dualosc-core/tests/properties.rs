//! Property-based tests for dualosc-core DSP primitives.
//!
//! Tests filter stability, wavefolder bounds and crusher output range using
//! proptest for randomized input generation.

use dualosc_core::{
    Bitcrusher, Effect, Lfo, MAX_CUTOFF_HZ, MIN_CUTOFF_HZ, StateVariableFilter, fold,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any requested cutoff and Q, the stored cutoff lies within the
    /// audible range and below 0.49 × sample rate, and the filter stays finite.
    #[test]
    fn svf_stability(
        freq in -1000.0f32..100_000.0f32,
        q in 0.0f32..40.0f32,
        sr in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut svf = StateVariableFilter::new(sr);
        svf.set_cutoff(freq);
        svf.set_resonance(q);

        prop_assert!(svf.cutoff() >= MIN_CUTOFF_HZ);
        prop_assert!(svf.cutoff() <= MAX_CUTOFF_HZ.min(sr * 0.49));

        for _ in 0..32 {
            for &sample in &input {
                let out = svf.process(sample);
                prop_assert!(
                    out.is_finite(),
                    "SVF (freq={}, q={}, sr={}) produced non-finite output",
                    freq, q, sr
                );
            }
        }
    }

    /// Folded output of any finite input stays within ±1 whenever drive > 0.
    #[test]
    fn fold_bounded(
        sample in -50.0f32..50.0f32,
        drive in 0.001f32..=1.0f32,
    ) {
        let y = fold(sample, drive);
        prop_assert!((-1.0..=1.0).contains(&y), "fold({}, {}) = {}", sample, drive, y);
    }

    /// Odd symmetry: fold(-x) = -fold(x).
    #[test]
    fn fold_odd_symmetry(
        sample in -1.0f32..=1.0f32,
        drive in 0.0f32..=1.0f32,
    ) {
        let a = fold(sample, drive);
        let b = fold(-sample, drive);
        prop_assert!((a + b).abs() < 1e-5, "fold({}) = {}, fold(-x) = {}", sample, a, b);
    }

    /// LFO output never exceeds its depth.
    #[test]
    fn lfo_within_depth(
        rate in 0.0f32..20.0f32,
        depth in 0.0f32..=1.0f32,
    ) {
        let mut lfo = Lfo::new(48000.0);
        lfo.set(rate, depth);
        for _ in 0..2048 {
            let v = lfo.advance();
            prop_assert!(v.abs() <= depth + 1e-6);
        }
    }

    /// Crusher output stays within ±1 for any settings.
    #[test]
    fn bitcrusher_bounded(
        bits in 1.0f32..24.0f32,
        downsample in 1u32..64,
        mix in 0.0f32..=1.0f32,
        input in prop::array::uniform32(-2.0f32..=2.0f32),
    ) {
        let mut crusher = Bitcrusher::new(48000.0);
        crusher.set_params(bits, downsample, mix);
        for &sample in &input {
            let out = crusher.process(sample);
            prop_assert!((-1.0..=1.0).contains(&out));
        }
    }
}
