// crates/ap_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, and the two run paths:
// validate-only (load + checks) and the full run (load → overrides → pipeline
// → optional canonical file → stdout report).

mod args;
mod render;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad flags, schema, configuration, roster or focus party.
    pub const VALIDATION: i32 = 2;
    /// Read/write/path failures.
    pub const IO: i32 = 4;
    /// Engine could not build or identify the outcome.
    pub const ENGINE: i32 = 5;
}

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ap_core::ElectionConfig;
use ap_io::scenario::{load_scenario_file, Scenario};
use ap_io::{canonical_json, IoError};
use ap_pipeline::{outcome_bytes, run_scenario_with, PipelineError, RunOptions};

use args::{parse_and_validate as parse_cli, Args, Format};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Validation(String),
    Io(String),
    Engine(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Engine(m) => write!(f, "engine: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("apportion: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(args.quiet);

    let result = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match result {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("apportion: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "warn,apportion=info,ap_pipeline=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
        MainError::Engine(_) => exitcodes::ENGINE,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(m),
        IoError::Schema { pointer, msg } => MainError::Validation(format!("schema {pointer}: {msg}")),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid(m) => MainError::Validation(m),
        IoError::Core(c) => MainError::Validation(c.to_string()),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Validate(m) => MainError::Validation(m),
        PipelineError::Io(e) => map_io_err(e),
        PipelineError::Build(m) => MainError::Engine(m),
    }
}

/// Load the scenario and apply `--quotient` / `--seats` overrides.
fn load(args: &Args) -> Result<Scenario, MainError> {
    let mut scenario = load_scenario_file(&args.scenario).map_err(map_io_err)?;

    if args.quotient.is_some() || args.seats.is_some() {
        let quotient = args
            .quotient
            .unwrap_or_else(|| i64::try_from(scenario.config.quotient()).unwrap_or(i64::MAX));
        let seats = args.seats.unwrap_or_else(|| i64::from(scenario.config.seats()));
        scenario.config = ElectionConfig::from_signed(quotient, seats)
            .map_err(|e| MainError::Validation(e.to_string()))?;
        info!(quotient, seats, "configuration overridden from flags");
    }
    Ok(scenario)
}

/// Validate-only path (no pipeline, no outputs).
fn validate_only(args: &Args) -> Result<(), MainError> {
    let scenario = load(args)?;
    if let Some(focus) = args.focus.as_deref() {
        if scenario.roster.get(focus.trim()).is_none() {
            return Err(MainError::Validation(format!("unknown focus party: {focus}")));
        }
    }
    if !args.quiet {
        eprintln!(
            "validate-only: scenario OK ({} parties, Q={}, S={})",
            scenario.roster.len(),
            scenario.config.quotient(),
            scenario.config.seats()
        );
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let scenario = load(args)?;
    let opts = RunOptions {
        focus: args.focus.clone(),
        expected_votes: args.expected_votes,
        candidate: args.candidate.clone(),
    };
    let outcome = run_scenario_with(&scenario, &opts).map_err(map_pipeline_err)?;

    if let Some(out) = &args.out {
        canonical_json::write_canonical_file(out, &outcome).map_err(map_io_err)?;
        info!(path = %out.display(), id = %outcome.id, "outcome written");
    }

    let stdout = io::stdout();
    let mut w = stdout.lock();
    match args.format {
        Format::Json => {
            let bytes = outcome_bytes(&outcome).map_err(map_pipeline_err)?;
            w.write_all(&bytes).and_then(|()| writeln!(w))
        }
        Format::Text => render::write_text(&mut w, &outcome),
    }
    .and_then(|()| w.flush())
    .map_err(|e| MainError::Io(format!("stdout: {e}")))
}
