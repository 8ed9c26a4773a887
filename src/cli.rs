//! CLI argument parsing for cuenta

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV table of zero-token rates per phase name
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "cuenta")]
#[command(version)]
#[command(
    about = "Aggregate token attribution diagnostics for workflow phases",
    long_about = "Reads a batch of phase records (JSON array or JSON lines) and reports \
                  zero-token patterns by workflow, phase name, and archived status.\n\n\
                  Usage: hegel analyze --debug START..END --json | cuenta"
)]
pub struct Cli {
    /// Read phase records from a file instead of stdin ("-" for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Load thresholds from a TOML file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Zero-token phases longer than this many seconds are suspicious (default: 300)
    #[arg(long = "suspicious-secs", value_name = "SECS")]
    pub suspicious_secs: Option<f64>,

    /// Number of suspicious phases listed (default: 10)
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Only analyze phases overlapping START..END (RFC3339 timestamps)
    #[arg(long = "range", value_name = "START..END")]
    pub range: Option<String>,

    /// Append duration distribution statistics
    #[arg(long = "stats-extended")]
    pub stats_extended: bool,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["cuenta"]);
        assert!(cli.input.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
        assert!(cli.suspicious_secs.is_none());
        assert!(cli.top.is_none());
        assert!(cli.range.is_none());
        assert!(!cli.stats_extended);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_input_file() {
        let cli = Cli::parse_from(["cuenta", "--input", "phases.json"]);
        assert_eq!(cli.input, Some(PathBuf::from("phases.json")));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["cuenta", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_format_csv() {
        let cli = Cli::parse_from(["cuenta", "--format", "csv"]);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_cli_threshold_overrides() {
        let cli = Cli::parse_from(["cuenta", "--suspicious-secs", "120.5", "--top", "3"]);
        assert_eq!(cli.suspicious_secs, Some(120.5));
        assert_eq!(cli.top, Some(3));
    }

    #[test]
    fn test_cli_range_and_flags() {
        let cli = Cli::parse_from([
            "cuenta",
            "--range",
            "2025-01-01T00:00:00Z..2025-01-02T00:00:00Z",
            "--stats-extended",
            "--debug",
        ]);
        assert!(cli.range.is_some());
        assert!(cli.stats_extended);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["cuenta", "--format", "xml"]).is_err());
    }
}
