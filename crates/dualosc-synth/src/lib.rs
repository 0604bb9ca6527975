//! Dualosc Synth - the per-voice engine of the dualosc synthesizer
//!
//! Every note is rendered by one [`Voice`]: two morphing oscillators (each
//! optionally a three-oscillator unison stack), one LFO routed to a single
//! destination, separate amplitude and filter envelopes, a wavefolder and a
//! resonant low-pass.
//!
//! # Core Components
//!
//! ## Oscillators
//!
//! - [`MorphOscillator`] - Phase accumulator morphing sine → saw → square
//! - [`UnisonStack`] / [`UnisonMode`] - Primary plus two detuned copies
//!
//! ```rust
//! use dualosc_synth::MorphOscillator;
//!
//! let mut osc = MorphOscillator::new(48000.0);
//! osc.set_frequency(440.0);
//! osc.set_shape(0.5); // saw
//!
//! let sample = osc.advance();
//! ```
//!
//! ## Envelopes
//!
//! - [`AdsrEnvelope`] - Linear ADSR with stage times in seconds
//! - [`EnvelopeParams`] / [`EnvelopeState`]
//!
//! ## Modulation
//!
//! - [`ModDestination`] - Where the LFO goes (none, pitch, cutoff, amplitude, fold, crush)
//! - [`ModRouting`] - One-hot destination multipliers
//!
//! ## Parameters
//!
//! - [`VoiceParams`] / [`SynthParams`] - Per-block `Copy` snapshots
//! - [`ParamKey`] - Every parameter with its descriptor
//! - [`SharedParams`] - Lock-free store between control and audio threads
//!
//! ## Voice Management
//!
//! - [`SynthVoice`] - Interface the manager drives
//! - [`Voice`] - The dual-oscillator voice renderer
//! - [`VoiceManager`] - Polyphonic allocation and stealing
//! - [`DualOscSynth`] - Voices plus the downstream bit crusher
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! dualosc-synth = { version = "0.1", default-features = false }
//! ```
//!
//! # Example: Rendering a Chord
//!
//! ```rust
//! use dualosc_synth::{DualOscSynth, ModDestination, ParamKey, SharedParams};
//!
//! let shared = SharedParams::new();
//! shared.set(ParamKey::Osc1Shape, 0.5);
//! shared.set(ParamKey::UnisonVoices, 3.0);
//! shared.set(ParamKey::LfoDepth, 0.2);
//! shared.set(ParamKey::LfoDestination, ModDestination::Pitch.code() as f32);
//!
//! let mut synth: DualOscSynth<8> = DualOscSynth::new(48000.0);
//! synth.note_on(60, 1.0); // C4
//! synth.note_on(64, 1.0); // E4
//! synth.note_on(67, 1.0); // G4
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! synth.process_block(&shared, &mut [&mut left, &mut right]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod envelope;
pub mod manager;
pub mod oscillator;
pub mod params;
pub mod router;
pub mod synth;
pub mod unison;
pub mod voice;

// Re-export main types at crate root
pub use envelope::{AdsrEnvelope, EnvelopeParams, EnvelopeState};
pub use manager::{VoiceAllocationMode, VoiceManager};
pub use oscillator::{MorphOscillator, morph_sample};
pub use params::{CrusherParams, ParamKey, SharedParams, SynthParams, VoiceParams};
pub use router::{CUTOFF_MOD_HZ, ModDestination, ModRouting, PITCH_MOD_SEMITONES, TREMOLO_DEPTH};
pub use synth::{DualOscSynth, MAX_CHANNELS};
pub use unison::{UnisonMode, UnisonStack};
pub use voice::{SoundKind, SynthVoice, Voice, VoiceState};

// Re-export commonly used items from dualosc-core
pub use dualosc_core::{
    Bitcrusher, Lfo, ModulationSource, StateVariableFilter, cents_to_ratio, midi_to_freq,
    semitones_to_ratio,
};
