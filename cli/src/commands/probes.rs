use anyhow::Context;
use colored::*;
use tracing::warn;

use crate::commands::ProbesArgs;
use crate::mprint;
use crate::terminal::{colors, print};
use probekit_common::config::Config;
use probekit_core::{extract, file};

pub fn probes(args: ProbesArgs, cfg: &Config) -> anyhow::Result<()> {
    let lines: Vec<String> = file::read_lines(&args.probes_file)
        .context("cannot load the probe file")?;

    let names: Vec<String> = extract::probe_names(&lines, &args.service);

    if cfg.quiet > 1 {
        for name in &names {
            mprint!(name);
        }
        return Ok(());
    }

    if names.is_empty() {
        warn!("No probe carries a signature for '{}'", args.service);
        return Ok(());
    }

    print::header("probe listing", cfg.quiet);
    mprint!(&format!("Probes associated with service '{}':", args.service));
    for name in &names {
        mprint!(&format!("- {}", name.color(colors::PRIMARY)));
    }

    Ok(())
}
