//! dualosc CLI - render notes through the dual-oscillator synth and manage presets.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dualosc")]
#[command(author, version, about = "Dual-oscillator synthesizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render MIDI notes to a WAV file
    Render(commands::render::RenderArgs),

    /// List, show, export and validate presets
    Presets(commands::presets::PresetsArgs),

    /// List every synth parameter with its range
    Params(commands::params::ParamsArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so exported TOML on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}
