//! Presets and parameter validation for the dualosc synthesizer.
//!
//! # Features
//!
//! - **Preset System**: Load and save complete synth patches as TOML
//! - **Validation**: Check values against each parameter's descriptor range
//! - **Factory Presets**: Built-in patches covering every LFO destination
//!
//! # Example
//!
//! ```rust,no_run
//! use dualosc_config::{Preset, get_factory_preset};
//! use dualosc_synth::{DualOscSynth, SharedParams};
//!
//! // Start from a factory patch and tweak it
//! let mut preset = get_factory_preset("warm_pad").unwrap();
//! preset.filter.cutoff_hz = 1400.0;
//! preset.save("my_pad.toml").unwrap();
//!
//! // Apply it to a synth
//! let shared = SharedParams::from_params(&preset.to_params().unwrap());
//! let mut synth: DualOscSynth<8> = DualOscSynth::new(48000.0);
//! synth.note_on(48, 1.0);
//! let mut block = [0.0f32; 256];
//! synth.process_block(&shared, &mut [&mut block[..]]);
//! ```

mod error;
mod preset;

/// Parameter range checks.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::{
    CrusherSection, EnvelopeSection, FilterSection, FoldSection, LfoSection, OscillatorSection,
    Preset, UnisonSection,
};
pub use validation::{
    ValidationError, ValidationResult, parse_assignment, parse_value, validate_param,
    validate_params, validate_preset,
};
