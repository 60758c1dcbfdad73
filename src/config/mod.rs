//! Configuration management

use crate::types::MirraError;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command-line interface for mirra
#[derive(Parser, Debug)]
#[command(
    name = "mirra",
    version,
    about = "One-way directory mirroring on a timer - full replicas, no surprises"
)]
pub struct Cli {
    /// Directory to mirror from
    pub source: Option<PathBuf>,

    /// Directory to mirror into (created if absent)
    pub replica: Option<PathBuf>,

    /// Minutes between passes
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Directory holding the append-only sync journal
    #[arg(short, long)]
    pub log_dir: Option<PathBuf>,

    /// Remove replica entries that are absent from the source
    #[arg(short, long)]
    pub delete: bool,

    /// TOML file supplying defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Optional TOML defaults file
///
/// Command-line values always win over file values; `delete = true` in the
/// file cannot be switched back off from the command line because a boolean
/// flag has no "explicitly off" spelling.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub interval: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub delete: Option<bool>,
}

impl FileConfig {
    /// Load defaults from a TOML file
    pub fn load(path: &Path) -> Result<Self, MirraError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            MirraError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            MirraError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }
}

/// Resolved configuration for one mirra run
///
/// Built once at startup and passed into the engine and scheduler
/// constructors; there is no process-wide mutable configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source tree root (must exist at each pass start)
    pub source: PathBuf,

    /// Replica tree root (created if absent)
    pub replica: PathBuf,

    /// Wait between passes
    pub interval: Duration,

    /// Directory holding the sync journal
    pub log_dir: PathBuf,

    /// Remove replica entries absent from the source
    pub delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            replica: PathBuf::new(),
            interval: Duration::from_secs(60),
            log_dir: PathBuf::from("log"),
            delete: false,
        }
    }
}

impl Config {
    /// Validate configuration
    ///
    /// Source existence is deliberately not checked here - it is the
    /// engine's per-pass validation, so a source that disappears and
    /// reappears between passes is retried rather than rejected at startup.
    pub fn validate(&self) -> Result<(), MirraError> {
        if self.source == self.replica {
            return Err(MirraError::Config(
                "Source and replica cannot be the same directory".to_string(),
            ));
        }

        if self.interval.is_zero() {
            return Err(MirraError::Config(
                "Interval must be at least one minute".to_string(),
            ));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = MirraError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let source = cli.source.or(file.source).ok_or_else(|| {
            MirraError::Config("Source directory is required (argument or config file)".to_string())
        })?;
        let replica = cli.replica.or(file.replica).ok_or_else(|| {
            MirraError::Config(
                "Replica directory is required (argument or config file)".to_string(),
            )
        })?;

        let interval_minutes = cli.interval.or(file.interval).unwrap_or(1);
        let log_dir = cli
            .log_dir
            .or(file.log_dir)
            .unwrap_or_else(|| PathBuf::from("log"));
        let delete = cli.delete || file.delete.unwrap_or(false);

        let config = Config {
            source,
            replica,
            interval: Duration::from_secs(interval_minutes * 60),
            log_dir,
            delete,
        };
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mirra").chain(args.iter().copied()))
            .expect("CLI should parse")
    }

    #[test]
    fn test_minimal_cli_uses_defaults() {
        let config = Config::try_from(cli(&["data", "backup"])).expect("config should build");

        assert_eq!(config.source, PathBuf::from("data"));
        assert_eq!(config.replica, PathBuf::from("backup"));
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.log_dir, PathBuf::from("log"));
        assert!(!config.delete);
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let config = Config::try_from(cli(&[
            "data", "backup", "--interval", "5", "--log-dir", "audit", "--delete",
        ]))
        .expect("config should build");

        assert_eq!(config.interval, Duration::from_secs(300));
        assert_eq!(config.log_dir, PathBuf::from("audit"));
        assert!(config.delete);
    }

    #[test]
    fn test_zero_interval_rejected_by_cli() {
        let result =
            Cli::try_parse_from(["mirra", "data", "backup", "--interval", "0"]);
        assert!(result.is_err(), "interval 0 should be rejected");
    }

    #[test]
    fn test_same_source_and_replica_rejected() {
        let result = Config::try_from(cli(&["data", "data"]));

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot be the same"));
    }

    #[test]
    fn test_missing_source_rejected() {
        let result = Config::try_from(cli(&[]));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Source directory"));
    }

    #[test]
    fn test_file_config_supplies_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        writeln!(
            file,
            "source = \"data\"\nreplica = \"backup\"\ninterval = 10\ndelete = true"
        )
        .expect("write temp config");

        let config = Config::try_from(cli(&[
            "--config",
            file.path().to_str().expect("utf-8 temp path"),
        ]))
        .expect("config should build");

        assert_eq!(config.source, PathBuf::from("data"));
        assert_eq!(config.replica, PathBuf::from("backup"));
        assert_eq!(config.interval, Duration::from_secs(600));
        assert!(config.delete);
    }

    #[test]
    fn test_cli_wins_over_file_config() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        writeln!(
            file,
            "source = \"file-src\"\nreplica = \"file-dst\"\ninterval = 10"
        )
        .expect("write temp config");

        let config = Config::try_from(cli(&[
            "cli-src",
            "cli-dst",
            "--interval",
            "2",
            "--config",
            file.path().to_str().expect("utf-8 temp path"),
        ]))
        .expect("config should build");

        assert_eq!(config.source, PathBuf::from("cli-src"));
        assert_eq!(config.replica, PathBuf::from("cli-dst"));
        assert_eq!(config.interval, Duration::from_secs(120));
    }

    #[test]
    fn test_unknown_file_config_key_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        writeln!(file, "source = \"a\"\nreplica = \"b\"\nspeed = 11").expect("write temp config");

        let result = Config::try_from(cli(&[
            "--config",
            file.path().to_str().expect("utf-8 temp path"),
        ]));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_missing_file_config_rejected() {
        let result = Config::try_from(cli(&["--config", "/nonexistent/mirra.toml"]));

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Cannot read config file"));
    }
}
