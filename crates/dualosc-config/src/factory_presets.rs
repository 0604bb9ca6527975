//! Factory presets bundled with the dualosc library.
//!
//! Built-in patches that are always available without external files. Each
//! one shows off a different corner of the voice: unison, filter envelope,
//! one LFO destination each, the folder and the crusher.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "warm_pad",
    "acid_bass",
    "vibrato_lead",
    "tremolo_keys",
    "folded_pluck",
    "crushed_wobble",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("warm_pad", WARM_PAD_PRESET),
    ("acid_bass", ACID_BASS_PRESET),
    ("vibrato_lead", VIBRATO_LEAD_PRESET),
    ("tremolo_keys", TREMOLO_KEYS_PRESET),
    ("folded_pluck", FOLDED_PLUCK_PRESET),
    ("crushed_wobble", CRUSHED_WOBBLE_PRESET),
];

/// Every parameter at its default.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Single sine through an open-ish filter"
"#;

const WARM_PAD_PRESET: &str = r#"
name = "Warm Pad"
description = "Detuned saw unison an octave apart, slow swells"

[oscillators]
osc1_shape = 0.5
osc2_shape = 0.45
osc2_semitones = 12

[unison]
voices = 3
detune_cents = 14

[filter]
cutoff_hz = 900
resonance = 1.1
env_amount = 1200

[lfo]
rate_hz = 0.3
depth = 0.25
destination = "cutoff"

[amp_envelope]
attack = 1.2
decay = 0.8
sustain = 0.8
release = 2.0

[filter_envelope]
attack = 2.0
decay = 1.5
sustain = 0.4
release = 2.0
"#;

const ACID_BASS_PRESET: &str = r#"
name = "Acid Bass"
description = "Square bass with a snappy resonant filter sweep"

[oscillators]
osc1_shape = 0.9
osc2_shape = 0.5
osc2_semitones = -12

[filter]
cutoff_hz = 250
resonance = 9.0
env_amount = 3500

[amp_envelope]
attack = 0.002
decay = 0.25
sustain = 0.6
release = 0.08

[filter_envelope]
attack = 0.001
decay = 0.18
sustain = 0.0
release = 0.1
"#;

const VIBRATO_LEAD_PRESET: &str = r#"
name = "Vibrato Lead"
description = "Bright saw lead with a gentle pitch vibrato"

[oscillators]
osc1_shape = 0.5
osc2_shape = 0.7
osc2_semitones = 7

[filter]
cutoff_hz = 4500
resonance = 1.5

[lfo]
rate_hz = 5.5
depth = 0.03
destination = "pitch"

[amp_envelope]
attack = 0.02
decay = 0.2
sustain = 0.9
release = 0.25
"#;

const TREMOLO_KEYS_PRESET: &str = r#"
name = "Tremolo Keys"
description = "Soft sine-saw keys with an amplitude tremolo"

[oscillators]
osc1_shape = 0.15
osc2_shape = 0.0
osc2_semitones = 12

[filter]
cutoff_hz = 3000
resonance = 0.7

[lfo]
rate_hz = 6.0
depth = 0.8
destination = "amplitude"

[amp_envelope]
attack = 0.005
decay = 1.2
sustain = 0.5
release = 0.4
"#;

const FOLDED_PLUCK_PRESET: &str = r#"
name = "Folded Pluck"
description = "Short pluck whose harmonics come from the wavefolder"

[oscillators]
osc1_shape = 0.0
osc2_shape = 0.0
osc2_semitones = 19

[fold]
drive = 0.55

[filter]
cutoff_hz = 1800
resonance = 2.0
env_amount = 6000

[lfo]
rate_hz = 0.8
depth = 0.3
destination = "fold"

[amp_envelope]
attack = 0.001
decay = 0.35
sustain = 0.0
release = 0.3

[filter_envelope]
attack = 0.001
decay = 0.2
sustain = 0.0
release = 0.2
"#;

const CRUSHED_WOBBLE_PRESET: &str = r#"
name = "Crushed Wobble"
description = "Unison square bass pumped through a bit crusher by the LFO"

[oscillators]
osc1_shape = 1.0
osc2_shape = 0.5
osc2_semitones = -12

[unison]
voices = 3
detune_cents = 20

[filter]
cutoff_hz = 2200
resonance = 3.0

[lfo]
rate_hz = 3.0
depth = 0.9
destination = "crush"

[amp_envelope]
attack = 0.01
decay = 0.3
sustain = 0.9
release = 0.2

[crusher]
bits = 5
downsample = 6
mix = 0.1
"#;

/// Parse every factory preset.
///
/// Presets that fail to parse are skipped; the test suite guarantees none do.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by ID (`"warm_pad"`) or display name
/// (`"Warm Pad"`), case-insensitively.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let wanted = name.trim();
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, Preset::from_toml(toml).ok()?)))
        .find(|(id, preset)| {
            id.eq_ignore_ascii_case(wanted) || preset.name.eq_ignore_ascii_case(wanted)
        })
        .map(|(_, preset)| preset)
}

/// Factory preset IDs.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_preset;
    use dualosc_synth::{ModDestination, SynthParams, UnisonMode};

    #[test]
    fn test_all_factory_presets_valid() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{name}' should parse: {e}"));
            assert!(!preset.name.is_empty(), "preset '{name}' should have a name");
            assert!(
                preset.description.is_some(),
                "preset '{name}' should have a description"
            );
            if let Err(e) = validate_preset(&preset) {
                panic!("factory preset '{name}' out of range: {e}");
            }
        }
    }

    #[test]
    fn test_names_match_table() {
        assert_eq!(FACTORY_PRESET_NAMES.len(), FACTORY_PRESETS_TOML.len());
        for (name, (id, _)) in FACTORY_PRESET_NAMES.iter().zip(FACTORY_PRESETS_TOML) {
            assert_eq!(name, id);
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_get_factory_preset() {
        let preset = get_factory_preset("acid_bass").expect("acid_bass should exist");
        assert_eq!(preset.name, "Acid Bass");

        // By display name, case insensitive
        let preset = get_factory_preset("WARM PAD").expect("WARM PAD should exist");
        assert_eq!(preset.name, "Warm Pad");

        assert!(get_factory_preset("nonexistent").is_none());
        assert!(is_factory_preset("init"));
        assert!(!is_factory_preset("ambient"));
    }

    #[test]
    fn test_init_is_all_defaults() {
        let init = get_factory_preset("init").expect("init should exist");
        assert_eq!(init.to_params().unwrap(), SynthParams::default());
    }

    #[test]
    fn test_destinations_cover_every_target() {
        let mut seen: Vec<ModDestination> = factory_presets()
            .iter()
            .map(|p| p.to_voice_params().unwrap().lfo_destination)
            .collect();
        seen.sort_by_key(|d| d.code());
        seen.dedup();
        assert_eq!(seen, ModDestination::ALL.to_vec());
    }

    #[test]
    fn test_crushed_wobble_structure() {
        let params = get_factory_preset("crushed_wobble")
            .unwrap()
            .to_params()
            .unwrap();
        assert_eq!(params.voice.unison, UnisonMode::Triple);
        assert_eq!(params.voice.lfo_destination, ModDestination::Crush);
        assert_eq!(params.crusher.bits, 5.0);
        assert_eq!(params.crusher.downsample, 6);
    }
}
