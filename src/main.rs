use anyhow::{Context, Result};
use clap::Parser;
use cuenta::{
    cli::{Cli, OutputFormat},
    csv_output::CsvRateOutput,
    json_output::JsonOutput,
    report,
    window::TimeWindow,
    AnalysisConfig, PhaseRecord,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve thresholds: defaults, then the config file, then flags
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(secs) = args.suspicious_secs {
        config.suspicious_duration_secs = secs;
    }
    if let Some(top) = args.top {
        config.top_suspicious = top;
    }

    config.validate()?;
    Ok(config)
}

/// Read the full batch from a file or stdin
fn load_batch(input: Option<&Path>) -> Result<Vec<PhaseRecord>> {
    let batch = match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            cuenta::read_batch(file)?
        }
        _ => cuenta::read_batch(io::stdin().lock())?,
    };
    Ok(batch)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let window = args
        .range
        .as_deref()
        .map(TimeWindow::from_range)
        .transpose()?;

    let mut batch = load_batch(args.input.as_deref())?;
    if let Some(window) = window {
        batch = window.filter(batch);
    }

    // Render fully before printing so failures never leave a partial report
    let analysis = cuenta::analyze(&batch, &config)?;
    let output = match args.format {
        OutputFormat::Text => report::render_text(&analysis, args.stats_extended),
        OutputFormat::Json => {
            let mut json = JsonOutput::from_analysis(&analysis, args.stats_extended)
                .to_json_string()
                .context("Failed to serialize analysis")?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => CsvRateOutput::new(&analysis.phase_rates).to_csv(),
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
