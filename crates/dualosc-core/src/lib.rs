//! Dualosc Core - DSP primitives for the dualosc voice
//!
//! This crate provides the sample-level building blocks a dualosc voice is
//! assembled from, designed for real-time processing with zero allocation in
//! the audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for per-sample processors
//! - [`ModulationSource`] - Common interface for LFOs and envelopes
//! - [`ParamDescriptor`] - Parameter metadata (range, unit, default)
//!
//! ## Processors
//!
//! - [`StateVariableFilter`] - Resonant TPT low-pass, stable under per-sample sweeps
//! - [`Lfo`] - Free-running sine LFO with depth
//! - [`fold`] - Triangle wavefolder
//! - [`Bitcrusher`] - Bit depth and sample-hold reduction on the mixed output
//!
//! ## Utilities
//!
//! - Pitch conversions: [`midi_to_freq`], [`cents_to_ratio`], [`semitones_to_ratio`]
//! - [`clamp_finite`], [`flush_denormal`], [`fast_tan`], [`lerp`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! dualosc-core = { version = "0.1", default-features = false }
//! ```
//!
//! The optional `tracing` feature logs configuration changes (sample rate
//! updates) at debug level. Nothing is logged from `process`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bitcrusher;
pub mod effect;
pub mod fold;
pub mod lfo;
pub mod math;
pub mod modulation;
pub mod param_info;
pub mod svf;

pub use bitcrusher::Bitcrusher;
pub use effect::Effect;
pub use fold::{FOLD_GAIN_RANGE, fold};
pub use lfo::Lfo;
pub use math::{
    cents_to_ratio, clamp_finite, fast_tan, flush_denormal, lerp, midi_to_freq, semitones_to_ratio,
};
pub use modulation::ModulationSource;
pub use param_info::{ParamDescriptor, ParamScale, ParamUnit};
pub use svf::{MAX_CUTOFF_HZ, MIN_CUTOFF_HZ, StateVariableFilter};
