//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::ValueEnum;
use dualosc_config::{Preset, get_factory_preset};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

/// Load a preset by factory name, or from a TOML file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return Preset::load(&path)
            .with_context(|| format!("loading preset '{}'", path.display()));
    }

    anyhow::bail!(
        "Preset '{}' not found. Use 'dualosc presets list' to see available presets.",
        name
    )
}

/// Parse a comma-separated list of MIDI notes, e.g. `"60,64,67"`.
pub fn parse_notes(text: &str) -> anyhow::Result<Vec<u8>> {
    let notes = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u8>() {
            Ok(n) if n <= 127 => Ok(n),
            _ => Err(anyhow::anyhow!("invalid MIDI note '{s}' (expected 0-127)")),
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;

    if notes.is_empty() {
        anyhow::bail!("No MIDI notes provided. Use format: --notes \"60,64,67\"");
    }
    Ok(notes)
}

/// Sample encoding for WAV output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WavFormat {
    /// 16-bit integer PCM
    Pcm16,
    /// 24-bit integer PCM
    Pcm24,
    /// 32-bit IEEE float
    #[default]
    Float32,
}

impl WavFormat {
    fn spec(self, channels: u16, sample_rate: u32) -> WavSpec {
        let (bits_per_sample, sample_format) = match self {
            WavFormat::Pcm16 => (16, SampleFormat::Int),
            WavFormat::Pcm24 => (24, SampleFormat::Int),
            WavFormat::Float32 => (32, SampleFormat::Float),
        };
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Write interleaved samples to a WAV file.
pub fn write_wav(
    path: &Path,
    interleaved: &[f32],
    channels: u16,
    sample_rate: u32,
    format: WavFormat,
) -> anyhow::Result<()> {
    let spec = format.spec(channels, sample_rate);
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("creating '{}'", path.display()))?;

    if spec.sample_format == SampleFormat::Float {
        for &sample in interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer
        .finalize()
        .with_context(|| format!("finalizing '{}'", path.display()))?;
    Ok(())
}
