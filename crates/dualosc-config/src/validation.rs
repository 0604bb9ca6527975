//! Parameter range checks and `id=value` parsing.
//!
//! Ranges come from each [`ParamKey`]'s descriptor, so the store, the presets
//! and the command line all agree on what is valid.
//!
//! # Example
//!
//! ```rust
//! use dualosc_config::validation::{parse_assignment, validate_param};
//! use dualosc_synth::ParamKey;
//!
//! assert!(validate_param(ParamKey::FilterCutoff, 800.0).is_ok());
//! assert!(validate_param(ParamKey::FilterCutoff, 5.0).is_err());
//!
//! let (key, value) = parse_assignment("lfo_destination=fold").unwrap();
//! assert_eq!(key, ParamKey::LfoDestination);
//! assert_eq!(value, 4.0);
//! ```

use dualosc_synth::{ModDestination, ParamKey};
use thiserror::Error;

use crate::error::ConfigError;
use crate::preset::Preset;

/// A parameter value outside its descriptor range.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
pub struct ValidationError {
    /// Parameter ID.
    pub param: String,
    /// The offending value.
    pub value: f32,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one value against its descriptor. Non-finite values always fail, as
/// does anything between the choices of a choice parameter.
pub fn validate_param(key: ParamKey, value: f32) -> ValidationResult<()> {
    let desc = key.descriptor();
    if desc.contains(value) {
        Ok(())
    } else {
        Err(ValidationError {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Check every value, reporting the first out-of-range one.
pub fn validate_params(values: impl IntoIterator<Item = (ParamKey, f32)>) -> ValidationResult<()> {
    values
        .into_iter()
        .try_for_each(|(key, value)| validate_param(key, value))
}

/// Check a whole preset: the destination name and every numeric field.
pub fn validate_preset(preset: &Preset) -> Result<(), ConfigError> {
    validate_params(preset.param_values()?)?;
    Ok(())
}

/// Parse `id=value` into a key and value.
///
/// `lfo_destination` also accepts a destination name. The value is not
/// range-checked; pair with [`validate_param`] or let the store clamp it.
pub fn parse_assignment(text: &str) -> Result<(ParamKey, f32), ConfigError> {
    let (id, raw) = text
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidValue {
            param: text.trim().to_string(),
            value: String::new(),
        })?;
    let id = id.trim();
    let raw = raw.trim();
    let key = ParamKey::from_id(id).ok_or_else(|| ConfigError::UnknownParameter(id.to_string()))?;
    let value = parse_value(key, raw)?;
    Ok((key, value))
}

/// Parse a value for `key`.
pub fn parse_value(key: ParamKey, raw: &str) -> Result<f32, ConfigError> {
    if key == ParamKey::LfoDestination
        && let Some(dest) = ModDestination::from_name(raw)
    {
        return Ok(dest.code() as f32);
    }
    raw.parse::<f32>().map_err(|_| ConfigError::InvalidValue {
        param: key.id().to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for key in ParamKey::ALL {
            let default = key.descriptor().default;
            assert!(
                validate_param(key, default).is_ok(),
                "default {default} of {} rejected",
                key.id()
            );
        }
    }

    #[test]
    fn test_out_of_range_reports_bounds() {
        let err = validate_param(ParamKey::LfoRate, 50.0).unwrap_err();
        assert_eq!(err.param, "lfo_rate");
        assert_eq!(err.value, 50.0);
        assert_eq!(err.min, 0.1);
        assert_eq!(err.max, 20.0);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(validate_param(ParamKey::FoldDrive, f32::NAN).is_err());
        assert!(validate_param(ParamKey::FilterCutoff, f32::INFINITY).is_err());
    }

    #[test]
    fn test_unison_accepts_only_one_or_three() {
        assert!(validate_param(ParamKey::UnisonVoices, 1.0).is_ok());
        assert!(validate_param(ParamKey::UnisonVoices, 3.0).is_ok());
        let err = validate_param(ParamKey::UnisonVoices, 2.0).unwrap_err();
        assert_eq!(err.param, "unison_voices");

        let preset = Preset::from_toml("name = \"Two\"\n[unison]\nvoices = 2\n").unwrap();
        assert!(validate_preset(&preset).is_err());
        assert!(preset.to_params().is_err());
    }

    #[test]
    fn test_first_error_wins() {
        let err = validate_params([
            (ParamKey::Osc1Shape, 0.5),
            (ParamKey::CrushBits, 0.0),
            (ParamKey::FilterResonance, 100.0),
        ])
        .unwrap_err();
        assert_eq!(err.param, "crush_bits");
    }

    #[test]
    fn test_parse_assignment_numeric() {
        let (key, value) = parse_assignment(" filter_cutoff = 2500 ").unwrap();
        assert_eq!(key, ParamKey::FilterCutoff);
        assert_eq!(value, 2500.0);
    }

    #[test]
    fn test_parse_assignment_destination() {
        assert_eq!(
            parse_assignment("lfo_destination=Cutoff").unwrap(),
            (ParamKey::LfoDestination, 2.0)
        );
        assert_eq!(
            parse_assignment("lfo_destination=3").unwrap(),
            (ParamKey::LfoDestination, 3.0)
        );
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(matches!(
            parse_assignment("volume=1"),
            Err(ConfigError::UnknownParameter(ref id)) if id == "volume"
        ));
        assert!(matches!(
            parse_assignment("fold_drive=lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_assignment("fold_drive"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
