use std::fs;
use std::io::Write;
use std::process;

use stable_match::config::Settings;
use stable_match::core::{blocking_pairs, Matcher};
use stable_match::models::{MatchReport, ScoreMatrix};
use stable_match::services::load_request;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging on stderr; stdout carries the report
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting stable matching run...");

    // Optional first argument: alternate config file
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(&path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        process::exit(2);
    });

    info!("Configuration loaded successfully");

    if let Err(e) = run(&settings) {
        error!("Matching run failed: {}", e);
        process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let weights = settings.scoring_weights();
    let request = load_request(&settings.input, &weights)?;

    // Malformed input stops here, before any matching work
    let scores = ScoreMatrix::new(request.scores)?;

    let matcher = Matcher::new(settings.matching.seed);
    let result = matcher.run(&scores, &request.gender_identity, &request.gender_preference)?;

    let blocking = blocking_pairs(&result.outcome, &result.preferences, &result.partition);
    if blocking.is_empty() {
        info!("Stability verified: no blocking pairs");
    } else {
        warn!("Found {} blocking pairs: {:?}", blocking.len(), blocking);
    }

    let report = MatchReport::build(&result, &scores, blocking.is_empty());
    let json = if settings.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &settings.output.path {
        Some(path) => {
            fs::write(path, json + "\n")?;
            info!("Report written to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    info!(
        run_id = %report.run_id,
        seed = ?report.seed,
        pairs = report.pairs.len(),
        unmatched = report.unmatched.len(),
        "Run finished"
    );

    Ok(())
}
