use anyhow::{bail, Context, Result};

use ticker_analytics::analysis::{analyze_symbol, AnalysisResponse};
use ticker_analytics::config::Config;
use ticker_analytics::provider::YahooChartClient;

const USAGE: &str = "usage: ticker-analytics <SYMBOL> [--summary]";

struct CliArgs {
    symbol: String,
    summary_only: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut symbol = None;
    let mut summary_only = false;
    for arg in args {
        match arg.as_str() {
            "--summary" => summary_only = true,
            "-h" | "--help" => bail!("{}", USAGE),
            flag if flag.starts_with('-') => bail!("unknown flag '{}'\n{}", flag, USAGE),
            value => {
                if symbol.replace(value.trim().to_ascii_uppercase()).is_some() {
                    bail!("expected exactly one symbol\n{}", USAGE);
                }
            }
        }
    }
    let Some(symbol) = symbol.filter(|s| !s.is_empty()) else {
        bail!("{}", USAGE);
    };
    Ok(CliArgs {
        symbol,
        summary_only,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
    };

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    // Logs go to stderr so stdout stays a clean JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        symbol = %cli.symbol,
        base_url = %config.provider.base_url,
        "Starting ticker-analytics"
    );

    let client = YahooChartClient::new(&config.provider)?;
    let response =
        AnalysisResponse::from_result(analyze_symbol(&client, &cli.symbol, &config.analysis).await);

    let output = match &response {
        AnalysisResponse::Success(report) if cli.summary_only => {
            serde_json::to_string_pretty(&report.summary())
                .context("failed to serialize summary")?
        }
        _ => response.to_json()?,
    };
    println!("{}", output);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
