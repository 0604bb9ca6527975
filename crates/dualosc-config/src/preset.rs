//! Preset file format and operations.

use dualosc_synth::{
    CrusherParams, EnvelopeParams, ModDestination, ParamKey, SynthParams, UnisonMode, VoiceParams,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::validate_params;

/// A complete synth patch.
///
/// Every section and every field is optional; anything missing takes the
/// synth default. Values are validated against the parameter ranges when the
/// preset is applied, not when it is parsed.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Pad"
/// description = "Slow detuned saws"
///
/// [oscillators]
/// osc1_shape = 0.5
/// osc2_shape = 0.5
/// osc2_semitones = 12
///
/// [unison]
/// voices = 3
/// detune_cents = 14
///
/// [filter]
/// cutoff_hz = 900
/// resonance = 1.2
/// env_amount = 1500
///
/// [lfo]
/// rate_hz = 0.4
/// depth = 0.3
/// destination = "cutoff"
///
/// [amp_envelope]
/// attack = 1.2
/// release = 2.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Oscillator shapes and transposition.
    #[serde(default)]
    pub oscillators: OscillatorSection,

    /// Unison count and spread.
    #[serde(default)]
    pub unison: UnisonSection,

    /// Wavefolder.
    #[serde(default)]
    pub fold: FoldSection,

    /// Low-pass filter.
    #[serde(default)]
    pub filter: FilterSection,

    /// LFO and its destination.
    #[serde(default)]
    pub lfo: LfoSection,

    /// Amplitude envelope.
    #[serde(default)]
    pub amp_envelope: EnvelopeSection,

    /// Filter envelope.
    #[serde(default)]
    pub filter_envelope: EnvelopeSection,

    /// Downstream bit crusher.
    #[serde(default)]
    pub crusher: CrusherSection,
}

/// `[oscillators]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OscillatorSection {
    /// Oscillator 1 morph, 0 sine to 1 square.
    pub osc1_shape: f64,
    /// Oscillator 2 morph.
    pub osc2_shape: f64,
    /// Oscillator 1 transpose in semitones.
    pub osc1_semitones: f64,
    /// Oscillator 2 transpose in semitones.
    pub osc2_semitones: f64,
}

/// `[unison]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UnisonSection {
    /// Oscillators per slot: 1 or 3.
    pub voices: u32,
    /// Spread of the outer copies in cents.
    pub detune_cents: f64,
}

/// `[fold]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FoldSection {
    /// Base drive, 0 to 1.
    pub drive: f64,
}

/// `[filter]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSection {
    /// Base cutoff in Hz.
    pub cutoff_hz: f64,
    /// Q.
    pub resonance: f64,
    /// Cutoff offset in Hz at full filter envelope.
    pub env_amount: f64,
}

/// `[lfo]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LfoSection {
    /// Rate in Hz.
    pub rate_hz: f64,
    /// Depth, 0 to 1.
    pub depth: f64,
    /// One of `none`, `pitch`, `cutoff`, `amplitude`, `fold`, `crush`.
    pub destination: String,
}

/// `[amp_envelope]` and `[filter_envelope]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvelopeSection {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level, 0 to 1.
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
}

/// `[crusher]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrusherSection {
    /// Bit depth, 1 to 24.
    pub bits: u32,
    /// Hold length in samples.
    pub downsample: u32,
    /// Base wet mix, 0 to 1.
    pub mix: f64,
}

/// Widen to `f64` keeping the shortest decimal form, so `0.1f32` is written
/// as `0.1` rather than `0.10000000149011612`.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

impl Default for OscillatorSection {
    fn default() -> Self {
        let v = VoiceParams::default();
        Self {
            osc1_shape: widen(v.osc1_shape),
            osc2_shape: widen(v.osc2_shape),
            osc1_semitones: widen(v.osc1_semitones),
            osc2_semitones: widen(v.osc2_semitones),
        }
    }
}

impl Default for UnisonSection {
    fn default() -> Self {
        let v = VoiceParams::default();
        Self {
            voices: v.unison.count(),
            detune_cents: widen(v.detune_cents),
        }
    }
}

impl Default for FoldSection {
    fn default() -> Self {
        Self {
            drive: widen(VoiceParams::default().fold_drive),
        }
    }
}

impl Default for FilterSection {
    fn default() -> Self {
        let v = VoiceParams::default();
        Self {
            cutoff_hz: widen(v.cutoff_hz),
            resonance: widen(v.resonance),
            env_amount: widen(v.filter_env_amount),
        }
    }
}

impl Default for LfoSection {
    fn default() -> Self {
        let v = VoiceParams::default();
        Self {
            rate_hz: widen(v.lfo_rate),
            depth: widen(v.lfo_depth),
            destination: v.lfo_destination.name().to_string(),
        }
    }
}

impl Default for EnvelopeSection {
    fn default() -> Self {
        Self::from(EnvelopeParams::default())
    }
}

impl From<EnvelopeParams> for EnvelopeSection {
    fn from(env: EnvelopeParams) -> Self {
        Self {
            attack: widen(env.attack),
            decay: widen(env.decay),
            sustain: widen(env.sustain),
            release: widen(env.release),
        }
    }
}

impl Default for CrusherSection {
    fn default() -> Self {
        let c = CrusherParams::default();
        Self {
            bits: c.bits as u32,
            downsample: c.downsample,
            mix: widen(c.mix),
        }
    }
}

impl Preset {
    /// Create a preset with every parameter at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            oscillators: OscillatorSection::default(),
            unison: UnisonSection::default(),
            fold: FoldSection::default(),
            filter: FilterSection::default(),
            lfo: LfoSection::default(),
            amp_envelope: EnvelopeSection::default(),
            filter_envelope: EnvelopeSection::default(),
            crusher: CrusherSection::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The LFO destination named in `[lfo]`.
    pub fn destination(&self) -> Result<ModDestination, ConfigError> {
        ModDestination::from_name(&self.lfo.destination)
            .ok_or_else(|| ConfigError::UnknownDestination(self.lfo.destination.clone()))
    }

    /// Every parameter as written in the file, in [`ParamKey::ALL`] order.
    ///
    /// Values are not clamped.
    pub fn param_values(&self) -> Result<Vec<(ParamKey, f32)>, ConfigError> {
        let destination = self.destination()?;
        let value = |key: ParamKey| -> f32 {
            match key {
                ParamKey::Osc1Shape => self.oscillators.osc1_shape as f32,
                ParamKey::Osc2Shape => self.oscillators.osc2_shape as f32,
                ParamKey::Osc1Semitones => self.oscillators.osc1_semitones as f32,
                ParamKey::Osc2Semitones => self.oscillators.osc2_semitones as f32,
                ParamKey::UnisonVoices => self.unison.voices as f32,
                ParamKey::UnisonDetune => self.unison.detune_cents as f32,
                ParamKey::FoldDrive => self.fold.drive as f32,
                ParamKey::FilterCutoff => self.filter.cutoff_hz as f32,
                ParamKey::FilterResonance => self.filter.resonance as f32,
                ParamKey::FilterEnvAmount => self.filter.env_amount as f32,
                ParamKey::LfoRate => self.lfo.rate_hz as f32,
                ParamKey::LfoDepth => self.lfo.depth as f32,
                ParamKey::LfoDestination => destination.code() as f32,
                ParamKey::AmpAttack => self.amp_envelope.attack as f32,
                ParamKey::AmpDecay => self.amp_envelope.decay as f32,
                ParamKey::AmpSustain => self.amp_envelope.sustain as f32,
                ParamKey::AmpRelease => self.amp_envelope.release as f32,
                ParamKey::FilterAttack => self.filter_envelope.attack as f32,
                ParamKey::FilterDecay => self.filter_envelope.decay as f32,
                ParamKey::FilterSustain => self.filter_envelope.sustain as f32,
                ParamKey::FilterRelease => self.filter_envelope.release as f32,
                ParamKey::CrushBits => self.crusher.bits as f32,
                ParamKey::CrushDownsample => self.crusher.downsample as f32,
                ParamKey::CrushMix => self.crusher.mix as f32,
            }
        };
        Ok(ParamKey::ALL.into_iter().map(|k| (k, value(k))).collect())
    }

    /// Validate and convert to a complete parameter set.
    pub fn to_params(&self) -> Result<SynthParams, ConfigError> {
        let values = self.param_values()?;
        validate_params(values.iter().copied())?;
        let mut params = SynthParams::default();
        for (key, value) in values {
            params.set(key, value);
        }
        Ok(params)
    }

    /// Validate and convert to the voice parameters alone.
    pub fn to_voice_params(&self) -> Result<VoiceParams, ConfigError> {
        Ok(self.to_params()?.voice)
    }

    /// Capture a complete parameter set as a preset.
    pub fn from_params(name: impl Into<String>, params: &SynthParams) -> Self {
        let v = &params.voice;
        let c = &params.crusher;
        Self {
            name: name.into(),
            description: None,
            oscillators: OscillatorSection {
                osc1_shape: widen(v.osc1_shape),
                osc2_shape: widen(v.osc2_shape),
                osc1_semitones: widen(v.osc1_semitones),
                osc2_semitones: widen(v.osc2_semitones),
            },
            unison: UnisonSection {
                voices: v.unison.count(),
                detune_cents: widen(v.detune_cents),
            },
            fold: FoldSection {
                drive: widen(v.fold_drive),
            },
            filter: FilterSection {
                cutoff_hz: widen(v.cutoff_hz),
                resonance: widen(v.resonance),
                env_amount: widen(v.filter_env_amount),
            },
            lfo: LfoSection {
                rate_hz: widen(v.lfo_rate),
                depth: widen(v.lfo_depth),
                destination: v.lfo_destination.name().to_string(),
            },
            amp_envelope: v.amp_env.into(),
            filter_envelope: v.filter_env.into(),
            crusher: CrusherSection {
                bits: c.bits.round().max(1.0) as u32,
                downsample: c.downsample,
                mix: widen(c.mix),
            },
        }
    }

    /// Capture voice parameters as a preset; the crusher stays at its
    /// defaults.
    pub fn from_voice_params(name: impl Into<String>, voice: &VoiceParams) -> Self {
        Self::from_params(
            name,
            &SynthParams {
                voice: *voice,
                crusher: CrusherParams::default(),
            },
        )
    }

    /// Unison mode selected by `[unison] voices`.
    pub fn unison_mode(&self) -> UnisonMode {
        UnisonMode::from_count(self.unison.voices)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preset_matches_synth_defaults() {
        let preset = Preset::new("Blank");
        assert_eq!(preset.name, "Blank");
        assert!(preset.description.is_none());
        assert_eq!(preset.to_params().unwrap(), SynthParams::default());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let preset = Preset::from_toml(r#"name = "Bare""#).unwrap();
        assert_eq!(preset, Preset::new("Bare"));
    }

    #[test]
    fn test_partial_section() {
        let preset = Preset::from_toml(
            r#"
name = "Partial"

[filter]
cutoff_hz = 400

[lfo]
destination = "Pitch"
depth = 0.25
"#,
        )
        .unwrap();
        let params = preset.to_voice_params().unwrap();
        assert_eq!(params.cutoff_hz, 400.0);
        assert_eq!(params.resonance, 0.7, "unset field keeps its default");
        assert_eq!(params.lfo_destination, ModDestination::Pitch);
        assert_eq!(params.lfo_depth, 0.25);
    }

    #[test]
    fn test_unknown_destination_rejected() {
        let mut preset = Preset::new("Bad");
        preset.lfo.destination = "wobble".to_string();
        assert!(matches!(
            preset.to_params(),
            Err(ConfigError::UnknownDestination(ref name)) if name == "wobble"
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut preset = Preset::new("Bad");
        preset.filter.resonance = 40.0;
        match preset.to_params() {
            Err(ConfigError::Validation(err)) => {
                assert_eq!(err.param, "filter_resonance");
                assert_eq!(err.value, 40.0);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_params_round_trip() {
        let mut params = SynthParams::default();
        params.voice.osc1_shape = 0.3;
        params.voice.osc2_semitones = -7.0;
        params.voice.unison = UnisonMode::Triple;
        params.voice.detune_cents = 15.0;
        params.voice.lfo_destination = ModDestination::Crush;
        params.voice.amp_env = EnvelopeParams::new(0.01, 0.2, 0.5, 1.5);
        params.crusher.bits = 6.0;
        params.crusher.downsample = 4;
        params.crusher.mix = 0.4;

        let preset = Preset::from_params("Round Trip", &params);
        let text = preset.to_toml().unwrap();
        let back = Preset::from_toml(&text).unwrap();
        assert_eq!(back, preset);
        assert_eq!(back.to_params().unwrap(), params);
    }

    #[test]
    fn test_shortest_decimal_output() {
        let text = Preset::new("Init").to_toml().unwrap();
        assert!(text.contains("attack = 0.1\n"), "got:\n{text}");
        assert!(!text.contains("0.10000000149011612"), "got:\n{text}");
    }

    #[test]
    fn test_from_voice_params_keeps_crusher_default() {
        let voice = VoiceParams {
            fold_drive: 0.6,
            ..VoiceParams::default()
        };
        let preset = Preset::from_voice_params("Folded", &voice);
        assert_eq!(preset.fold.drive, 0.6);
        assert_eq!(preset.crusher, CrusherSection::default());
        assert_eq!(preset.to_voice_params().unwrap(), voice);
    }

    #[test]
    fn test_unison_mode() {
        let mut preset = Preset::new("U");
        assert_eq!(preset.unison_mode(), UnisonMode::Single);
        preset.unison.voices = 3;
        assert_eq!(preset.unison_mode(), UnisonMode::Triple);
    }
}
