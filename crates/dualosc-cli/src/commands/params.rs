//! Parameter listing command.

use clap::Args;
use dualosc_synth::{ModDestination, ParamKey};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show only parameters whose ID contains this text
    filter: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    println!("Synth Parameters:");
    println!("=================");
    println!(
        "  {:20} {:20} {:>10} {:>10} {:>10}  {}",
        "ID", "NAME", "MIN", "MAX", "DEFAULT", "UNIT"
    );

    let wanted = args.filter.as_deref().map(str::to_ascii_lowercase);
    for key in ParamKey::ALL {
        if let Some(w) = &wanted
            && !key.id().contains(w.as_str())
        {
            continue;
        }
        let d = key.descriptor();
        println!(
            "  {:20} {:20} {:>10} {:>10} {:>10}  {}",
            d.string_id,
            d.name,
            d.min,
            d.max,
            d.default,
            d.unit.suffix().trim()
        );
    }

    println!();
    let names: Vec<String> = ModDestination::ALL
        .iter()
        .map(|d| format!("{}={}", d.code(), d.name()))
        .collect();
    println!("LFO destinations: {}", names.join(", "));
    for key in ParamKey::ALL {
        let choices = key.descriptor().choices;
        if !choices.is_empty() {
            let listed: Vec<String> = choices.iter().map(f32::to_string).collect();
            println!("{}: one of {}", key.id(), listed.join(", "));
        }
    }
    println!("Set values with: dualosc render out.wav --set filter_cutoff=800");

    Ok(())
}
