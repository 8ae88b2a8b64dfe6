use std::path::PathBuf;
use std::process::ExitCode;

use manifest_planner::planner::{Distribution, PlannerConfig};
use manifest_planner::session::EditSession;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the document distribution strategy.
const DISTRIBUTION_VAR: &str = "MANIFEST_DISTRIBUTION";

/// Environment variable enabling access-key check digit verification.
const CHECK_DIGIT_VAR: &str = "MANIFEST_VERIFY_CHECK_DIGIT";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: manifest-planner <session.json>");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  {DISTRIBUTION_VAR}       reshuffle (default) | sticky");
        eprintln!("  {CHECK_DIGIT_VAR}  set to 1 to reject keys with a bad check digit");
        return ExitCode::from(2);
    };

    let distribution = match std::env::var(DISTRIBUTION_VAR) {
        Ok(value) => match value.parse::<Distribution>() {
            Ok(distribution) => distribution,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(2);
            }
        },
        Err(_) => Distribution::default(),
    };
    let verify_check_digit = std::env::var(CHECK_DIGIT_VAR)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    let config = PlannerConfig::new(distribution, verify_check_digit);

    let session = match EditSession::load(&path) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = session.replay(config);
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialize outcome: {e}");
            ExitCode::FAILURE
        }
    }
}
