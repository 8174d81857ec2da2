pub mod filter;
pub mod probes;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use probekit_common::config::{Config, FilterConfig, ServiceFilter};

const DEFAULT_PROBES_FILE: &str = "nmap-service-probes";

#[derive(Parser)]
#[command(name = "probekit")]
#[command(version, about = "Trim and inspect nmap-service-probes files.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output; repeat for raw data only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug logs; repeat for trace logs
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter probe sections by service, probe name and SSL policy
    #[command(alias = "f")]
    Filter(FilterArgs),
    /// List the probes that can identify a service
    #[command(alias = "p")]
    Probes(ProbesArgs),
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Services to include (default: all)
    #[arg(short, long, num_args = 1..)]
    pub services: Vec<String>,

    /// Probes to include (default: all)
    #[arg(short, long, num_args = 1..)]
    pub probes: Vec<String>,

    /// Probes to exclude
    #[arg(short, long, num_args = 1..)]
    pub exclude_probes: Vec<String>,

    /// Don't attempt SSL/TLS connections
    #[arg(short, long)]
    pub no_ssl: bool,

    /// Convert 'softmatch' to 'match'
    #[arg(short = 'm', long = "no-softmatch")]
    pub demote_softmatch: bool,

    /// Input file path
    #[arg(short = 'f', long, default_value = DEFAULT_PROBES_FILE)]
    pub probes_file: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_PROBES_FILE)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ProbesArgs {
    /// The service to look for in match and softmatch lines
    pub service: String,

    /// nmap-service-probes file path
    #[arg(short = 'f', long, default_value = DEFAULT_PROBES_FILE)]
    pub probes_file: PathBuf,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

impl FilterArgs {
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            services: ServiceFilter::from_list(self.services.iter().cloned()),
            allowed_probes: FilterConfig::probe_set(Some(self.probes.iter().cloned())),
            excluded_probes: FilterConfig::probe_set(Some(self.exclude_probes.iter().cloned())),
            no_ssl: self.no_ssl,
            demote_softmatch: self.demote_softmatch,
        }
    }
}
