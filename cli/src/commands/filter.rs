use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::{debug, info, warn};

use crate::commands::FilterArgs;
use crate::mprint;
use crate::terminal::{colors, print};
use probekit_common::config::{Config, FilterConfig};
use probekit_core::{file, filter::FilterOutcome, filter::filter_lines};

type Detail = (String, ColoredString);

pub fn filter(args: FilterArgs, cfg: &Config) -> anyhow::Result<()> {
    let filter_cfg: FilterConfig = args.filter_config();
    debug!(?filter_cfg, "resolved filter options");

    let start_time: Instant = Instant::now();
    let lines: Vec<String> = file::read_lines(&args.probes_file)
        .context("cannot load the probe file")?;

    let outcome: FilterOutcome = filter_lines(&lines, &filter_cfg);

    file::write_lines(&args.output, &outcome.lines)
        .context("cannot save the filtered probe file")?;

    info!(
        "Wrote {} of {} lines to {}",
        outcome.lines.len(),
        lines.len(),
        args.output.display()
    );

    filter_ends(&outcome, &filter_cfg, start_time.elapsed(), cfg);
    Ok(())
}

fn filter_ends(outcome: &FilterOutcome, filter_cfg: &FilterConfig, total_time: Duration, cfg: &Config) {
    if outcome.kept.is_empty() {
        warn!("No probe section passed the filter");
        print::header("zero probes kept", cfg.quiet);
        print::no_results(cfg.quiet);
        return;
    }

    if cfg.quiet > 1 {
        for probe in &outcome.kept {
            mprint!(probe);
        }
        return;
    }

    print_report(outcome, filter_cfg, total_time, cfg);
}

fn print_report(outcome: &FilterOutcome, filter_cfg: &FilterConfig, total_time: Duration, cfg: &Config) {
    print::header("filter report", cfg.quiet);

    let services: String = filter_cfg.services.iter().collect::<Vec<&str>>().join(", ");
    print::aligned_line("Services", services);
    print::aligned_line("SSL", if filter_cfg.no_ssl { "suppressed" } else { "kept" });
    print::aligned_line("Softmatch", if filter_cfg.demote_softmatch { "demoted" } else { "kept" });
    print::aligned_line("Kept", outcome.kept.join(", ").color(colors::KEPT));

    let details: Vec<Detail> = dropped_details(outcome);
    if !details.is_empty() {
        print::aligned_line(
            "Dropped",
            outcome.dropped_total().to_string().color(colors::DROPPED),
        );
        print::as_tree_one_level(details);
    }

    let kept: ColoredString = format!("{} probes kept", outcome.kept.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let summary: String = format!("Filter Complete: {kept} in {total_time}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&summary);
        }
        _ => info!("{}", summary),
    }
}

fn dropped_details(outcome: &FilterOutcome) -> Vec<Detail> {
    outcome
        .dropped
        .iter()
        .map(|(reason, count)| (reason.to_string(), count.to_string().color(colors::ACCENT)))
        .collect()
}
