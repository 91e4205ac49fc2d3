//! Runtime configuration and command-line parsing.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Public IBGE localities API.
pub const DEFAULT_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";
pub const DEFAULT_LOG_FILE: &str = "ufcities.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root the `/estados` endpoints are resolved against
    pub base_url: Url,
    /// File that receives log output while the UI owns the terminal
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Pick a Brazilian state and list its cities with their micro-regions.
#[derive(Debug, Parser)]
#[command(name = "ufcities", version, about)]
pub struct Cli {
    /// Base URL of the localities API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Where to write the log (RUST_LOG controls verbosity)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            base_url: cli.base_url,
            log_file: cli.log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let cli = Cli::try_parse_from(["ufcities"]).unwrap();
        assert_eq!(Config::from(cli), Config::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "ufcities",
            "--base-url",
            "http://localhost:8080/api",
            "--log-file",
            "/tmp/uf.log",
        ])
        .unwrap();
        let config = Config::from(cli);

        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(config.log_file, PathBuf::from("/tmp/uf.log"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(Cli::try_parse_from(["ufcities", "--base-url", "not a url"]).is_err());
    }
}
