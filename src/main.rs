//! Batch evaluator.
//!
//! Reads newline-delimited JSON user snapshots from stdin and writes one
//! JSON `MembershipInfo` per line to stdout. Lines that fail to parse are
//! logged and skipped.

use clap::Parser;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};

use realty_membership::config::{AppConfig, ConfigError};
use realty_membership::domain::foundation::Timestamp;
use realty_membership::domain::membership::{MembershipEngine, UserSnapshot};
use realty_membership::telemetry::{self, TelemetryError};

#[derive(Parser, Debug)]
#[command(
    name = "realty-membership",
    about = "Classify marketplace users into membership and experience tiers",
    version
)]
struct Cli {
    /// Evaluation instant (RFC 3339), defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    as_of: Option<Timestamp>,

    /// YAML criteria catalog, overriding the configured one
    #[arg(long)]
    criteria: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    Timestamp::parse_rfc3339(value).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("realty-membership: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let mut config = AppConfig::load()?;
    config.criteria = config.criteria.with_override(cli.criteria);
    config.validate().map_err(ConfigError::from)?;
    telemetry::init(&config.telemetry)?;

    let catalog = config.criteria.load_catalog()?;
    let engine = MembershipEngine::new(&catalog);
    let as_of = cli.as_of.unwrap_or_else(Timestamp::now);

    info!(as_of = %as_of, "evaluating snapshots from stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    let summary = evaluate_lines(&engine, &as_of, stdin.lock(), out)?;

    info!(
        evaluated = summary.evaluated,
        skipped = summary.skipped,
        "evaluation finished"
    );
    Ok(())
}

/// Counts reported after a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
struct BatchSummary {
    evaluated: usize,
    skipped: usize,
}

/// Classifies every NDJSON snapshot in `input`, writing one result line per
/// snapshot to `out`. Blank lines are ignored and malformed lines skipped.
fn evaluate_lines<R: BufRead, W: Write>(
    engine: &MembershipEngine<'_>,
    as_of: &Timestamp,
    input: R,
    mut out: W,
) -> Result<BatchSummary, RunError> {
    let mut summary = BatchSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let snapshot: UserSnapshot = match serde_json::from_str(&line) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(line = index + 1, error = %err, "skipping malformed snapshot");
                summary.skipped += 1;
                continue;
            }
        };

        let info = engine.membership_info(&snapshot, as_of);
        serde_json::to_writer(&mut out, &info)?;
        out.write_all(b"\n")?;
        summary.evaluated += 1;
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_membership::domain::membership::CriteriaCatalog;

    fn as_of() -> Timestamp {
        Timestamp::parse_rfc3339("2025-09-01T09:00:00Z").unwrap()
    }

    const AGENT: &str = r#"{"userType":"AGENT","verified":true,"emailVerified":true,"phoneVerified":true,"identityDocumentVerified":true,"addressProofVerified":true,"completedTransactions":30,"averageRating":4.8,"reviewCount":45,"createdAt":"2025-02-13T09:00:00Z"}"#;

    #[test]
    fn valid_blank_and_malformed_lines() {
        let engine = MembershipEngine::new(CriteriaCatalog::standard());
        let input = format!("{}\n\n{{not json\n", AGENT);
        let mut out = Vec::new();

        let summary = evaluate_lines(&engine, &as_of(), input.as_bytes(), &mut out).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                evaluated: 1,
                skipped: 1
            }
        );
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);

        let written: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(written["trustScore"], 94);
        assert_eq!(written["membershipLevel"], "VIP");

        let snapshot: UserSnapshot = serde_json::from_str(AGENT).unwrap();
        let expected = serde_json::to_value(engine.membership_info(&snapshot, &as_of())).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn empty_input_writes_nothing() {
        let engine = MembershipEngine::new(CriteriaCatalog::standard());
        let mut out = Vec::new();

        let summary = evaluate_lines(&engine, &as_of(), "".as_bytes(), &mut out).unwrap();

        assert_eq!(summary, BatchSummary::default());
        assert!(out.is_empty());
    }

    #[test]
    fn cli_parses_as_of_and_criteria() {
        let cli = Cli::try_parse_from([
            "realty-membership",
            "--as-of",
            "2025-09-01T09:00:00Z",
            "--criteria",
            "criteria.yaml",
        ])
        .unwrap();
        assert_eq!(cli.as_of, Some(as_of()));
        assert_eq!(cli.criteria, Some(PathBuf::from("criteria.yaml")));
    }

    #[test]
    fn cli_rejects_bad_as_of() {
        assert!(Cli::try_parse_from(["realty-membership", "--as-of", "yesterday"]).is_err());
    }
}
