// crates/syscheck-cli/src/main.rs
// ============================================================================
// Module: syscheck CLI Entry Point
// Description: Suite runner for the conformance programs.
// Purpose: List, run, and configure programs from one binary.
// Dependencies: clap, serde, syscheck-cases, syscheck-harness, thiserror.
// ============================================================================

//! ## Overview
//! `syscheck` runs registered programs in-process, in the order given, with
//! the same flags as the standalone binaries. The exit status is the bitwise
//! OR of each program's exit status.
//!
//! Programs share one process: `open08` switches to an unprivileged account
//! during setup and every program after it runs with that identity.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use syscheck_cases::find;
use syscheck_cases::programs;
use syscheck_harness::ExitConvention;
use syscheck_harness::HarnessError;
use syscheck_harness::Tally;
use syscheck_harness::TestProgram;
use syscheck_harness::Verdict;
use syscheck_harness::artifacts::RunArtifacts;
use syscheck_harness::config::HarnessConfig;
use syscheck_harness::config::config_toml_example;
use syscheck_harness::driver::run_program;
use syscheck_harness::options::RunArgs;
use syscheck_harness::options::RunSettings;
use syscheck_harness::report::ReportFormat;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit status when the runner itself fails.
const RUNNER_FAILURE: u8 = ExitConvention::Ltp.code_for(Verdict::Broken);

/// Suite summary written at the artifact root.
const SUITE_JSON: &str = "suite.json";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "syscheck",
    version,
    about = "Run syscall conformance programs",
    disable_help_subcommand = true
)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered programs.
    List(ListCommand),
    /// Run programs in the order given.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Program identifiers to run.
    #[arg(value_name = "TCID", required_unless_present = "all")]
    tcids: Vec<String>,
    /// Run every registered program.
    #[arg(long, conflicts_with = "tcids")]
    all: bool,
    /// Flags shared with the program binaries.
    #[command(flatten)]
    run: RunArgs,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a syscheck configuration file.
    Validate(ConfigValidateCommand),
    /// Print an example configuration file.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path (defaults to `SYSCHECK_CONFIG`, then ./syscheck.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        Self::new(err.to_string())
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    match dispatch(cli.command, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes one subcommand, writing its output to `out`.
fn dispatch(command: Commands, out: &mut dyn Write) -> CliResult<u8> {
    match command {
        Commands::List(command) => command_list(&command, out),
        Commands::Run(command) => command_run(&command, out),
        Commands::Config {
            command,
        } => command_config(command, out),
    }
}

// ============================================================================
// SECTION: List Command
// ============================================================================

/// One row of `list` output.
#[derive(Debug, Serialize)]
struct ProgramListing {
    /// Program identifier.
    tcid: &'static str,
    /// Suite the program comes from.
    origin: &'static str,
    /// One-line description.
    description: &'static str,
}

/// Executes the `list` command.
fn command_list(command: &ListCommand, out: &mut dyn Write) -> CliResult<u8> {
    let listings: Vec<ProgramListing> = programs()
        .iter()
        .map(|program| {
            let info = program.info();
            ProgramListing {
                tcid: info.tcid,
                origin: info.origin,
                description: info.description,
            }
        })
        .collect();
    match command.format {
        ReportFormat::Text => {
            for listing in &listings {
                write_line(
                    out,
                    &format!("{:<20} {:<11} {}", listing.tcid, listing.origin, listing.description),
                )?;
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string(&listings)
                .map_err(|err| CliError::new(format!("failed to serialize listing: {err}")))?;
            write_line(out, &json)?;
        }
    }
    Ok(0)
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Outcome of one program in a suite run.
#[derive(Debug, Serialize)]
struct SuiteEntry {
    /// Program identifier.
    tcid: String,
    /// Program exit status.
    exit_code: u8,
    /// Verdict counters.
    tally: Tally,
}

/// Outcome of a suite run.
#[derive(Debug, Serialize)]
struct SuiteSummary {
    /// Bitwise OR of every program exit status.
    exit_code: u8,
    /// Verdict counters summed over every program.
    tally: Tally,
    /// Per-program outcomes, in run order.
    programs: Vec<SuiteEntry>,
}

/// Executes the `run` command.
fn command_run(command: &RunCommand, out: &mut dyn Write) -> CliResult<u8> {
    let selected = select_programs(command)?;
    let settings = RunSettings::resolve(&command.run)?;
    let mut suite = SuiteSummary {
        exit_code: 0,
        tally: Tally::default(),
        programs: Vec::with_capacity(selected.len()),
    };
    {
        let mut reporter = settings.format.reporter(&mut *out);
        for program in &selected {
            let tcid = program.info().tcid;
            let program_settings = RunSettings {
                artifacts: settings.artifacts.as_ref().map(|dir| dir.join(tcid)),
                ..settings.clone()
            };
            let summary = run_program(*program, &program_settings, reporter.as_mut())?;
            suite.exit_code |= summary.exit_code;
            suite.tally.merge(&summary.tally);
            suite.programs.push(SuiteEntry {
                tcid: summary.tcid,
                exit_code: summary.exit_code,
                tally: summary.tally,
            });
        }
    }
    if let Some(dir) = &settings.artifacts {
        RunArtifacts::create(dir)
            .and_then(|artifacts| artifacts.write_json(SUITE_JSON, &suite))
            .map_err(|err| CliError::new(format!("failed to write suite summary: {err}")))?;
    }
    Ok(suite.exit_code)
}

/// Resolves the requested programs, failing on the first unknown TCID.
fn select_programs(command: &RunCommand) -> CliResult<Vec<&'static dyn TestProgram>> {
    if command.all {
        return Ok(programs().to_vec());
    }
    command
        .tcids
        .iter()
        .map(|tcid| {
            find(tcid).ok_or_else(|| CliError::from(HarnessError::UnknownProgram(tcid.clone())))
        })
        .collect()
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand, out: &mut dyn Write) -> CliResult<u8> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command, out),
        ConfigCommand::Example => {
            out.write_all(config_toml_example().as_bytes()).map_err(|err| output_error(&err))?;
            Ok(0)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand, out: &mut dyn Write) -> CliResult<u8> {
    HarnessConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config invalid: {err}")))?;
    write_line(out, "config ok")?;
    Ok(0)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to `out`.
fn write_line(out: &mut dyn Write, message: &str) -> CliResult<()> {
    writeln!(out, "{message}").map_err(|err| output_error(&err))
}

/// Formats an output failure.
fn output_error(error: &io::Error) -> CliError {
    CliError::new(format!("failed to write output: {error}"))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns the runner failure code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(RUNNER_FAILURE)
}
