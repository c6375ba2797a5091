//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};

use crate::error::{ClientError, ClientResult};
use crate::render::OutputFormat;

/// meetjoin - Find the meeting to join right now
#[derive(Debug, Parser)]
#[command(name = "meetjoin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MEETJOIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Override the current time (ISO 8601, e.g. 2021-07-12T09:28:00-04:00)
    #[arg(long, short)]
    pub now: Option<String>,

    /// Output format
    #[arg(long, short, value_enum)]
    pub format: Option<OutputFormat>,

    /// Saved events payload to read, `-` for stdin
    #[arg(long, short, env = "MEETJOIN_EVENTS")]
    pub events: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The reference instant for this run.
    pub fn reference_now(&self) -> ClientResult<DateTime<Utc>> {
        match self.now {
            Some(ref value) => parse_now(value),
            None => Ok(Utc::now()),
        }
    }
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List upcoming events and the meeting to join (default)
    List,

    /// Print the link of the meeting to join
    Join,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

/// Parses a `--now` value.
///
/// Timestamps without an offset are taken as UTC.
pub fn parse_now(value: &str) -> ClientResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ClientError::InvalidNow {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "meetjoin",
            "-v",
            "--now",
            "2021-07-12T09:28:00-04:00",
            "-f",
            "alfred",
            "-e",
            "-",
            "join",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.format, Some(OutputFormat::Alfred));
        assert_eq!(cli.events, Some(PathBuf::from("-")));
        assert!(matches!(cli.command, Some(Command::Join)));
        assert_eq!(
            cli.reference_now().unwrap(),
            Utc.with_ymd_and_hms(2021, 7, 12, 13, 28, 0).unwrap()
        );
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["meetjoin", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["meetjoin", "-f", "waybar"]).is_err());
    }

    #[test]
    fn now_formats() {
        let expected = Utc.with_ymd_and_hms(2021, 7, 12, 13, 29, 0).unwrap();
        assert_eq!(parse_now("2021-07-12T13:29:00Z").unwrap(), expected);
        assert_eq!(parse_now("2021-07-12T13:29:00").unwrap(), expected);
        assert_eq!(parse_now("2021-07-12 13:29:00").unwrap(), expected);
        assert_eq!(parse_now("2021-07-12T13:29").unwrap(), expected);
    }

    #[test]
    fn invalid_now_is_loud() {
        let err = parse_now("yesterday").unwrap_err();
        assert!(matches!(err, ClientError::InvalidNow { .. }));
        assert!(err.to_string().contains("yesterday"));
    }
}
