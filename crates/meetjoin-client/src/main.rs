//! meetjoin CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use meetjoin_client::cli::{Cli, Command, ConfigAction};
use meetjoin_client::commands::{self, Session};
use meetjoin_client::config::ClientConfig;
use meetjoin_client::error::ClientResult;
use meetjoin_core::tracing::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)?
    } else {
        ClientConfig::load()?
    };

    let tracing = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing)?;

    match cli.command.clone().unwrap_or(Command::List) {
        Command::List => {
            let now = cli.reference_now()?;
            let source = commands::open_source(cli.events.as_deref(), &config)?;
            let format = cli.format.unwrap_or(config.output.format);
            let output = commands::list::list(&source, &Session::new(&config, now)?, format)?;
            println!("{}", output.trim_end());
        }
        Command::Join => {
            let now = cli.reference_now()?;
            let source = commands::open_source(cli.events.as_deref(), &config)?;
            let link = commands::join::join(&source, &Session::new(&config, now)?)?;
            println!("{link}");
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => println!("{}", commands::config::dump(&config, &config_path)?),
            ConfigAction::Validate => println!("{}", commands::config::validate(&config)?),
            ConfigAction::Path => println!("{}", commands::config::path(&config_path)),
        },
    }

    Ok(())
}
