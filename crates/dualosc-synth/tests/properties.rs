//! Property-based tests for dualosc-synth.
//!
//! Oscillator range and phase wrap, routing exclusivity, unison bounds and
//! envelope ramps under randomized parameters.

use dualosc_synth::{
    AdsrEnvelope, EnvelopeParams, ModDestination, ModRouting, MorphOscillator, SynthVoice,
    UnisonMode, UnisonStack, Voice, VoiceParams, morph_sample,
};
use proptest::prelude::*;

const SR: f32 = 48000.0;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The morph waveform stays in [-1, 1] for every phase and shape.
    #[test]
    fn morph_sample_bounded(phase in 0.0f32..1.0f32, shape in 0.0f32..=1.0f32) {
        let s = morph_sample(phase, shape);
        prop_assert!((-1.0..=1.0).contains(&s), "phase={} shape={} -> {}", phase, shape, s);
    }

    /// Phase never leaves [0, 1) regardless of requested frequency.
    #[test]
    fn oscillator_phase_wraps(freq in -1000.0f32..200_000.0f32, shape in -1.0f32..2.0f32) {
        let mut osc = MorphOscillator::new(SR);
        osc.set_frequency(freq);
        osc.set_shape(shape);
        for _ in 0..2048 {
            let s = osc.advance();
            prop_assert!(s.is_finite() && s.abs() <= 1.0);
            prop_assert!((0.0..1.0).contains(&osc.phase()), "phase {}", osc.phase());
        }
    }

    /// Exactly one routing multiplier is 1 for a real destination, none for `None`.
    #[test]
    fn routing_is_one_hot(code in -10i32..16) {
        let dest = ModDestination::from_code(code);
        let routing = ModRouting::new(dest);
        let weights = routing.as_array();
        let ones = weights.iter().filter(|&&w| w == 1.0).count();
        let zeros = weights.iter().filter(|&&w| w == 0.0).count();
        prop_assert_eq!(ones + zeros, weights.len());
        if dest == ModDestination::None {
            prop_assert_eq!(ones, 0);
        } else {
            prop_assert_eq!(ones, 1);
        }
    }

    /// The averaged unison stack stays within the single-oscillator range.
    #[test]
    fn unison_bounded(
        freq in 20.0f32..8000.0f32,
        shape in 0.0f32..=1.0f32,
        cents in 0.0f32..100.0f32,
    ) {
        let mut stack = UnisonStack::new(SR);
        stack.set_mode(UnisonMode::Triple, cents);
        stack.set_shape(shape);
        stack.set_frequency(freq);
        for _ in 0..1024 {
            let s = stack.advance();
            prop_assert!(s.is_finite() && s.abs() <= 1.0 + 1e-6);
        }
    }

    /// Attack rises monotonically, decay falls monotonically to sustain.
    #[test]
    fn envelope_monotonic_ramps(
        attack in 0.0f32..0.05f32,
        decay in 0.0f32..0.05f32,
        sustain in 0.0f32..=1.0f32,
    ) {
        let mut env = AdsrEnvelope::new(SR);
        env.set_params(EnvelopeParams::new(attack, decay, sustain, 0.1));
        env.note_on();

        let attack_len = (attack * SR).round().max(1.0) as usize;
        let mut prev = 0.0f32;
        for _ in 0..attack_len {
            let level = env.next_sample();
            prop_assert!(level >= prev - 1e-6, "attack fell {} -> {}", prev, level);
            prev = level;
        }
        prop_assert!((prev - 1.0).abs() < 1e-5, "attack peak {}", prev);

        let decay_len = (decay * SR).round().max(1.0) as usize;
        for _ in 0..decay_len + 1 {
            let level = env.next_sample();
            prop_assert!(level <= prev + 1e-6, "decay rose {} -> {}", prev, level);
            prev = level;
        }
        prop_assert!((prev - sustain).abs() < 1e-5, "sustain {} vs {}", prev, sustain);
    }

    /// A fully modulated voice never produces NaN or runaway output.
    #[test]
    fn voice_output_finite(
        note in 0u8..128,
        shape1 in 0.0f32..=1.0f32,
        shape2 in 0.0f32..=1.0f32,
        drive in 0.0f32..=1.0f32,
        cutoff in 20.0f32..20000.0f32,
        q in 0.5f32..20.0f32,
        depth in 0.0f32..=1.0f32,
        code in 0i32..6,
    ) {
        let params = VoiceParams {
            osc1_shape: shape1,
            osc2_shape: shape2,
            unison: UnisonMode::Triple,
            fold_drive: drive,
            cutoff_hz: cutoff,
            resonance: q,
            lfo_depth: depth,
            lfo_rate: 12.0,
            lfo_destination: ModDestination::from_code(code),
            ..VoiceParams::default()
        };
        let mut voice = Voice::new(SR);
        voice.set_params(&params);
        voice.start_note(note, 1.0);
        let mut buf = vec![0.0f32; 2048];
        voice.render_block(&mut [&mut buf], 0, 2048);
        for &s in &buf {
            prop_assert!(s.is_finite() && s.abs() < 50.0, "sample {}", s);
        }
    }
}
