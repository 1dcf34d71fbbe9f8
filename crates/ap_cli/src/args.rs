// crates/ap_cli/src/args.rs
//
// Offline CLI argument surface.
// - Scenario and output paths must be local (any scheme:// is rejected)
// - --quotient / --seats are signed so that bad values reach the engine's validation
// - --validate-only loads and checks the scenario without running the engine
// - --candidate only makes sense alongside --expected-votes

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable report.
    Text,
    /// Canonical JSON outcome document.
    Json,
}

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "apportion",
    version,
    disable_help_subcommand = true,
    about = "D'Hondt seat apportionment with candidate selection and competitive risk"
)]
pub struct Args {
    /// Scenario JSON file (roster + quotient + seats).
    #[arg(long)]
    pub scenario: PathBuf,

    /// Override the scenario's electoral quotient Q.
    #[arg(long, allow_negative_numbers = true)]
    pub quotient: Option<i64>,

    /// Override the scenario's seat count S.
    #[arg(long, allow_negative_numbers = true)]
    pub seats: Option<i64>,

    /// Focus party for the risk ranking (defaults to the scenario's `focus_party`).
    #[arg(long)]
    pub focus: Option<String>,

    /// Rank this many personal votes against every candidate of every party.
    #[arg(long)]
    pub expected_votes: Option<u64>,

    /// Candidate the expected votes belong to; left out of the ranking.
    #[arg(long, requires = "expected_votes")]
    pub candidate: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Also write the canonical JSON outcome to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Load and validate the scenario only; do not run the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation. Messages are short and stable.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate(&args)?;
    Ok(args)
}

fn validate(args: &Args) -> Result<(), CliError> {
    ensure_local_path(&args.scenario)?;
    if let Some(out) = &args.out {
        ensure_local_path(out)?;
    }
    ensure_local_exists(&args.scenario, "--scenario")
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}
