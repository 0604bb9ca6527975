//! Preset management commands.
//!
//! Lists factory presets and preset files, prints a preset's settings,
//! exports presets as TOML and checks files against the parameter ranges.

use anyhow::Context;
use clap::{Args, Subcommand};
use dualosc_config::{Preset, factory_presets, validate_preset};
use dualosc_synth::ParamKey;
use std::path::{Path, PathBuf};

use super::common::load_preset;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets, plus any preset files in a directory
    List {
        /// Also list the `.toml` presets in this directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show every parameter of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Write a preset as TOML to a file or stdout
    Export {
        /// Preset name or path
        name: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a preset file for unknown destinations and out-of-range values
    Validate {
        /// Preset file
        path: PathBuf,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { dir } => list_presets(dir.as_deref()),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export { name, output } => export_preset(&name, output.as_deref()),
        PresetsCommand::Validate { path } => validate_file(&path),
    }
}

fn list_presets(dir: Option<&Path>) -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:20} - {}", preset.name, desc);
    }
    println!();

    let Some(dir) = dir else {
        return Ok(());
    };

    println!("Presets in {}:", dir.display());
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory '{}'", dir.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        println!("  (none)");
    }
    for path in paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        match Preset::load(&path) {
            Ok(preset) => {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {:20} - {}", stem, desc);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping preset");
                println!("  {:20} - (error loading)", stem);
            }
        }
    }
    println!();

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let params = preset.to_params()?;

    println!("{}", preset.name);
    if let Some(desc) = &preset.description {
        println!("  {desc}");
    }
    println!();

    for key in ParamKey::ALL {
        let desc = key.descriptor();
        let value = params.get(key);
        let shown = if key == ParamKey::LfoDestination {
            params.voice.lfo_destination.name().to_string()
        } else {
            format!("{value}{}", desc.unit.suffix())
        };
        println!("  {:20} {}", key.id(), shown);
    }

    Ok(())
}

fn export_preset(name: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    match output {
        Some(path) => {
            preset.save(path)?;
            tracing::info!(preset = %preset.name, path = %path.display(), "exported preset");
            println!("Saved to {}", path.display());
        }
        None => print!("{}", preset.to_toml()?),
    }
    Ok(())
}

fn validate_file(path: &Path) -> anyhow::Result<()> {
    let preset = Preset::load(path)?;
    validate_preset(&preset).with_context(|| format!("preset '{}' is invalid", path.display()))?;
    println!("{}: ok", preset.name);
    Ok(())
}
