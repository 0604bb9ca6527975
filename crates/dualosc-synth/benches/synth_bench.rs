//! Criterion benchmarks for dualosc-synth components
//!
//! Run with: cargo bench -p dualosc-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dualosc_synth::{
    AdsrEnvelope, DualOscSynth, EnvelopeParams, ModDestination, MorphOscillator, SynthParams,
    SynthVoice, UnisonMode, UnisonStack, Voice, VoiceParams,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

// ============================================================================
// Oscillator benchmarks
// ============================================================================

fn bench_morph_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("MorphOscillator");

    let shapes = [("Sine", 0.0), ("SineSaw", 0.25), ("Saw", 0.5), ("Square", 1.0)];

    for (name, shape) in &shapes {
        for &block_size in BLOCK_SIZES {
            let mut osc = MorphOscillator::new(SAMPLE_RATE);
            osc.set_frequency(440.0);
            osc.set_shape(*shape);

            group.bench_with_input(
                BenchmarkId::new(*name, block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        let mut sum = 0.0f32;
                        for _ in 0..size {
                            sum += osc.advance();
                        }
                        black_box(sum)
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_unison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Unison");

    for (name, mode) in [("Single", UnisonMode::Single), ("Triple", UnisonMode::Triple)] {
        for &block_size in BLOCK_SIZES {
            let mut stack = UnisonStack::new(SAMPLE_RATE);
            stack.set_mode(mode, 12.0);
            stack.set_shape(0.5);
            stack.set_frequency(220.0);

            group.bench_with_input(
                BenchmarkId::new(name, block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        let mut sum = 0.0f32;
                        for _ in 0..size {
                            sum += stack.advance();
                        }
                        black_box(sum)
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Envelope benchmarks
// ============================================================================

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("Envelope");

    for &block_size in BLOCK_SIZES {
        let mut env = AdsrEnvelope::new(SAMPLE_RATE);
        env.set_params(EnvelopeParams::new(0.01, 0.1, 0.7, 0.2));

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    env.note_on();
                    let mut sum = 0.0f32;
                    for _ in 0..size {
                        sum += env.next_sample();
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Voice benchmarks
// ============================================================================

fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voice");

    let configs = [
        ("Plain", UnisonMode::Single, ModDestination::None),
        ("Unison", UnisonMode::Triple, ModDestination::None),
        ("UnisonVibrato", UnisonMode::Triple, ModDestination::Pitch),
        ("UnisonFoldLfo", UnisonMode::Triple, ModDestination::Fold),
    ];

    for (name, unison, dest) in configs {
        for &block_size in BLOCK_SIZES {
            let params = VoiceParams {
                osc1_shape: 0.5,
                osc2_shape: 0.8,
                osc2_semitones: 7.0,
                unison,
                fold_drive: 0.3,
                cutoff_hz: 3000.0,
                resonance: 2.0,
                filter_env_amount: 2000.0,
                lfo_depth: 0.5,
                lfo_destination: dest,
                ..VoiceParams::default()
            };
            let mut voice = Voice::new(SAMPLE_RATE);
            voice.set_params(&params);
            voice.start_note(57, 1.0);
            let mut buf = vec![0.0f32; block_size];

            group.bench_with_input(
                BenchmarkId::new(name, block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        buf.fill(0.0);
                        voice.render_block(&mut [&mut buf], 0, size);
                        black_box(buf[size - 1])
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Full synth benchmarks
// ============================================================================

fn bench_dual_osc_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("DualOscSynth");

    for num_notes in [1usize, 4, 8] {
        for &block_size in BLOCK_SIZES {
            let mut params = SynthParams::default();
            params.voice.unison = UnisonMode::Triple;
            params.voice.osc1_shape = 0.5;
            params.voice.lfo_depth = 0.3;
            params.voice.lfo_destination = ModDestination::Crush;
            params.crusher.bits = 8.0;
            params.crusher.mix = 0.2;

            let mut synth: DualOscSynth<8> = DualOscSynth::new(SAMPLE_RATE);
            for i in 0..num_notes {
                synth.note_on(48 + (i as u8) * 4, 1.0);
            }
            let mut left = vec![0.0f32; block_size];
            let mut right = vec![0.0f32; block_size];

            group.bench_with_input(
                BenchmarkId::new(format!("{num_notes}notes"), block_size),
                &block_size,
                |b, _| {
                    b.iter(|| {
                        synth.render(&params, &mut [&mut left, &mut right]);
                        black_box(left[0] + right[0])
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_morph_oscillator,
    bench_unison,
    bench_envelope,
    bench_voice,
    bench_dual_osc_synth,
);

criterion_main!(benches);
