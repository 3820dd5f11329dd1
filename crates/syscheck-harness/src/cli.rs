// crates/syscheck-harness/src/cli.rs
// ============================================================================
// Module: Program Entry Point
// Description: Shared `main` for every test program binary.
// Purpose: Parse flags, run the program, and map the summary to an exit code.
// Dependencies: clap
// ============================================================================

//! ## Overview
//! Each program binary is a three-line `main` that calls [`program_main`].
//! The command is named after the program's TCID, so `--help` and errors read
//! like a dedicated tool. Report lines go to stdout; harness errors go to
//! stderr and exit with the program's BROKEN code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::io;
use std::io::Write;
use std::process::ExitCode;

use clap::Args;
use clap::Command;
use clap::FromArgMatches;

use crate::driver::ProgramInfo;
use crate::driver::TestProgram;
use crate::driver::run_program;
use crate::error::HarnessError;
use crate::options::RunArgs;
use crate::options::RunSettings;
use crate::verdict::ExitConvention;
use crate::verdict::Verdict;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs `program` as the whole process and returns its exit status.
#[must_use]
pub fn program_main(program: &dyn TestProgram) -> ExitCode {
    let info = program.info();
    let args = match parse_args(&info, std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(harness_failure_code(info.convention))
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let mut stdout = io::stdout().lock();
    match execute(program, &args, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(err) => emit_error(&format!("{}: {err}", info.tcid), info.convention),
    }
}

/// Parses program flags from `argv` (including the program name).
///
/// # Errors
///
/// Returns the clap error for invalid flags, `--help`, or `--version`.
pub fn parse_args<I, T>(info: &ProgramInfo, argv: I) -> Result<RunArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = RunArgs::augment_args(
        Command::new(info.tcid).about(info.description).version(env!("CARGO_PKG_VERSION")),
    );
    let matches = command.try_get_matches_from(argv)?;
    RunArgs::from_arg_matches(&matches)
}

/// Resolves settings, runs `program`, and writes report lines to `out`.
///
/// Returns the exit code derived from the run's verdicts.
///
/// # Errors
///
/// Returns [`HarnessError`] when settings are invalid or output fails.
pub fn execute(
    program: &dyn TestProgram,
    args: &RunArgs,
    out: &mut dyn Write,
) -> Result<u8, HarnessError> {
    let settings = RunSettings::resolve(args)?;
    let mut reporter = settings.format.reporter(out);
    let summary = run_program(program, &settings, reporter.as_mut())?;
    Ok(summary.exit_code)
}

/// Exit code used when the harness itself fails.
#[must_use]
pub const fn harness_failure_code(convention: ExitConvention) -> u8 {
    convention.code_for(Verdict::Broken)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns the BROKEN exit code.
fn emit_error(message: &str, convention: ExitConvention) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(harness_failure_code(convention))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod cli_tests;
