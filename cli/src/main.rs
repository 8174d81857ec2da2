mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, filter, probes};
use probekit_common::config::Config;
use terminal::{logging, print};
use tracing::error;

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.config();

    if let Err(err) = logging::init_logging(&cfg) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    print::banner(cfg.no_banner, cfg.quiet);

    let result = match commands.command {
        Commands::Filter(args) => {
            print::header("filtering service probes", cfg.quiet);
            filter::filter(args, &cfg)
        }
        Commands::Probes(args) => {
            print::header("searching service probes", cfg.quiet);
            probes::probes(args, &cfg)
        }
    };

    match result {
        Ok(()) => {
            print::end_of_program(cfg.quiet);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
