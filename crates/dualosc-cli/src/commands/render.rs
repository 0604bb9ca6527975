//! Offline note rendering.
//!
//! Holds the requested notes for the gate time, releases them, renders the
//! release tail and writes the result to a WAV file.

use std::path::PathBuf;

use clap::Args;
use dualosc_config::{Preset, parse_assignment};
use dualosc_synth::{DualOscSynth, SharedParams, SynthParams, VoiceAllocationMode, midi_to_freq};

use super::common::{WavFormat, load_preset, parse_notes, write_wav};

/// Voices available to the renderer.
const POLYPHONY: usize = 16;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// MIDI notes (comma-separated, e.g., "60,64,67" for C major)
    #[arg(long, default_value = "60")]
    notes: String,

    /// How long the notes are held, in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Seconds rendered after note-off (default: the amp release time)
    #[arg(long)]
    tail: Option<f32>,

    /// Factory preset name or path to a preset TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Override a parameter, e.g. --set filter_cutoff=800 (repeatable)
    #[arg(long = "set", value_name = "ID=VALUE")]
    overrides: Vec<String>,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Output channels
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u16).range(1..=8))]
    channels: u16,

    /// Output gain applied after the synth (linear)
    #[arg(long, default_value = "0.5")]
    gain: f32,

    /// Block size in samples
    #[arg(long, default_value = "256", value_parser = clap::value_parser!(u32).range(1..=8192))]
    block_size: u32,

    /// Sample encoding
    #[arg(long, value_enum, default_value = "float32")]
    format: WavFormat,

    /// Steal voices round-robin instead of oldest-first
    #[arg(long)]
    round_robin: bool,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be a positive number of seconds");
    }
    if !(8000..=384_000).contains(&args.sample_rate) {
        anyhow::bail!("--sample-rate must be between 8000 and 384000");
    }

    let notes = parse_notes(&args.notes)?;
    let preset = match &args.preset {
        Some(name) => load_preset(name)?,
        None => Preset::new("Init"),
    };
    let params = preset.to_params()?;
    let shared = SharedParams::from_params(&params);

    for text in &args.overrides {
        let (key, requested) = parse_assignment(text)?;
        let stored = shared.set(key, requested);
        if stored != requested {
            tracing::warn!(param = key.id(), requested, stored, "value clamped to range");
        }
    }
    let params: SynthParams = shared.snapshot();

    let sample_rate = args.sample_rate as f32;
    let tail = args
        .tail
        .unwrap_or(params.voice.amp_env.release)
        .max(0.0);
    let gate_samples = (args.duration * sample_rate) as usize;
    let tail_samples = (tail * sample_rate) as usize;

    tracing::info!(preset = %preset.name, "render config");
    tracing::info!(sample_rate = args.sample_rate, channels = args.channels, "render config");
    tracing::info!(gate_seconds = args.duration, tail_seconds = tail, "render config");
    tracing::info!(
        notes = ?notes,
        freqs = ?notes.iter().map(|&n| midi_to_freq(n)).collect::<Vec<_>>(),
        "notes"
    );

    let mut synth: DualOscSynth<POLYPHONY> = DualOscSynth::new(sample_rate);
    synth.prepare(sample_rate);
    if args.round_robin {
        synth.set_allocation_mode(VoiceAllocationMode::RoundRobin);
    }
    if notes.len() > POLYPHONY {
        tracing::warn!(
            requested = notes.len(),
            voices = POLYPHONY,
            "more notes than voices; oldest notes will be stolen"
        );
    }
    for &note in &notes {
        synth.note_on(note, 1.0);
    }

    let channels = args.channels as usize;
    let block_size = args.block_size as usize;
    let mut renderer = BlockRenderer::new(channels, block_size, gate_samples + tail_samples);

    renderer.render(&mut synth, &shared, gate_samples);
    synth.all_notes_off();
    renderer.render(&mut synth, &shared, tail_samples);

    let mut interleaved = renderer.finish();
    for sample in &mut interleaved {
        *sample *= args.gain;
    }

    let peak = interleaved.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak > 1.0 {
        tracing::warn!(peak, "output clips; lower --gain");
    }
    if synth.active_voice_count() > 0 {
        tracing::debug!(
            active = synth.active_voice_count(),
            "voices still sounding at end of tail"
        );
    }

    write_wav(
        &args.output,
        &interleaved,
        args.channels,
        args.sample_rate,
        args.format,
    )?;

    let frames = interleaved.len() / channels;
    tracing::info!(
        path = %args.output.display(),
        frames,
        seconds = frames as f32 / sample_rate,
        peak,
        "wrote WAV"
    );
    println!("Saved to {}", args.output.display());

    Ok(())
}

/// Runs the synth block by block and collects interleaved output.
struct BlockRenderer {
    buffers: Vec<Vec<f32>>,
    interleaved: Vec<f32>,
    block_size: usize,
}

impl BlockRenderer {
    fn new(channels: usize, block_size: usize, total_frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; block_size]; channels],
            interleaved: Vec::with_capacity(total_frames * channels),
            block_size,
        }
    }

    fn render(&mut self, synth: &mut DualOscSynth<POLYPHONY>, shared: &SharedParams, frames: usize) {
        let mut remaining = frames;
        while remaining > 0 {
            let n = remaining.min(self.block_size);
            let mut outputs: Vec<&mut [f32]> =
                self.buffers.iter_mut().map(|b| &mut b[..n]).collect();
            synth.process_block(shared, &mut outputs);

            for i in 0..n {
                for buf in &self.buffers {
                    self.interleaved.push(buf[i]);
                }
            }
            remaining -= n;
        }
    }

    fn finish(self) -> Vec<f32> {
        self.interleaved
    }
}
