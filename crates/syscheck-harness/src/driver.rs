// crates/syscheck-harness/src/driver.rs
// ============================================================================
// Module: Test Driver
// Description: Setup, iteration loop, and cleanup for one test program.
// Purpose: Run every program through the same lifecycle and verdict ledger.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A program implements [`TestProgram`]. The driver calls
//! [`TestProgram::setup`] once, then [`TestRun::iterate`] under the loop
//! policy, then [`TestRun::cleanup`], and folds every verdict into a
//! [`RunSummary`].
//!
//! Invariants:
//! - A [`Broken`] from setup or an iteration aborts the run with a BROKEN
//!   verdict; cleanup still runs whenever setup returned a run.
//! - A cleanup failure adds a BROKEN verdict and never removes an earlier one.
//! - Case numbers restart at 1 in every iteration.
//! - Counters are owned by the driver; nothing is global.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use crate::artifacts::RunArtifacts;
use crate::errno::Errno;
use crate::errno_log::ErrnoLog;
use crate::error::Broken;
use crate::error::HarnessError;
use crate::fixture::ScratchDir;
use crate::options::LoopPolicy;
use crate::options::RunSettings;
use crate::report::CaseRecord;
use crate::report::ReportError;
use crate::report::ReportEvent;
use crate::report::Reporter;
use crate::report::RunSummary;
use crate::sys::signal::wait_for_sigusr1;
use crate::table::Evaluation;
use crate::verdict::ExitConvention;
use crate::verdict::Tally;
use crate::verdict::Verdict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Most case records kept for the summary; older ones are dropped first.
pub const MAX_RECORDED: usize = 10_000;

// ============================================================================
// SECTION: Program Contract
// ============================================================================

/// Static description of a test program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInfo {
    /// Test case identifier, also the binary name.
    pub tcid: &'static str,
    /// Suite the program comes from (`ltp`, `open_posix`).
    pub origin: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// Exit status convention.
    pub convention: ExitConvention,
    /// Errnos the program's calls are expected to produce.
    pub expected_errnos: &'static [Errno],
    /// Whether loop options apply; single-shot programs run one iteration.
    pub looping: bool,
}

/// Environment handed to setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupEnv {
    /// Directory under which scratch directories are created.
    pub scratch_root: PathBuf,
    /// Keep scratch directories after the run.
    pub keep_scratch: bool,
    /// Account root-only programs switch to.
    pub unprivileged_user: String,
}

impl SetupEnv {
    /// Builds the setup environment from merged settings.
    #[must_use]
    pub fn from_settings(settings: &RunSettings) -> Self {
        Self {
            scratch_root: settings.scratch_root.clone(),
            keep_scratch: settings.keep_scratch,
            unprivileged_user: settings.unprivileged_user.clone(),
        }
    }

    /// Creates a scratch directory for `tcid` under the configured root.
    ///
    /// # Errors
    ///
    /// Returns [`Broken`] when the directory cannot be created.
    pub fn scratch_dir(&self, tcid: &str) -> Result<ScratchDir, Broken> {
        ScratchDir::create(&self.scratch_root, tcid, self.keep_scratch)
    }
}

/// A conformance test program.
pub trait TestProgram: Sync {
    /// Returns the program description.
    fn info(&self) -> ProgramInfo;

    /// Establishes preconditions and returns the live run.
    ///
    /// # Errors
    ///
    /// Returns [`Broken`] when a precondition cannot be established.
    fn setup(&self, env: &SetupEnv) -> Result<Box<dyn TestRun>, Broken>;
}

/// State of one program run between setup and cleanup.
pub trait TestRun {
    /// Executes one loop iteration.
    ///
    /// # Errors
    ///
    /// Returns [`Broken`] to abort the run.
    fn iterate(&mut self, iteration: &mut Iteration<'_>) -> Result<(), Broken>;

    /// Releases every resource created by setup. Must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`Broken`] when a resource cannot be released.
    fn cleanup(&mut self) -> Result<(), Broken>;
}

// ============================================================================
// SECTION: Recorder
// ============================================================================

/// Verdict ledger owned by the driver for one run.
#[derive(Debug)]
struct Recorder {
    /// Program identifier.
    tcid: &'static str,
    /// Verdict counters.
    tally: Tally,
    /// Bounded verdict history.
    records: VecDeque<CaseRecord>,
    /// Whether history was dropped.
    truncated: bool,
    /// Errno occurrence counts.
    errno_log: ErrnoLog,
    /// First reporter failure, surfaced after the run.
    report_error: Option<ReportError>,
    /// Current iteration index.
    iteration: u64,
    /// Last case number used in the current iteration.
    case: u32,
}

impl Recorder {
    /// Creates an empty ledger.
    fn new(info: &ProgramInfo) -> Self {
        Self {
            tcid: info.tcid,
            tally: Tally::default(),
            records: VecDeque::new(),
            truncated: false,
            errno_log: ErrnoLog::new(info.expected_errnos),
            report_error: None,
            iteration: 0,
            case: 0,
        }
    }

    /// Starts a new iteration and resets the case counter.
    const fn begin_iteration(&mut self, index: u64) {
        self.iteration = index;
        self.case = 0;
    }

    /// Records one verdict and reports it.
    fn record(
        &mut self,
        reporter: &mut dyn Reporter,
        verdict: Verdict,
        message: String,
        errno: Option<Errno>,
    ) {
        self.case = self.case.saturating_add(1);
        self.tally.record(verdict);
        let record = CaseRecord {
            tcid: self.tcid.to_string(),
            iteration: self.iteration,
            case: self.case,
            verdict,
            message,
            errno,
        };
        self.emit(reporter, &ReportEvent::Case(&record));
        if self.records.len() == MAX_RECORDED {
            self.records.pop_front();
            self.truncated = true;
        }
        self.records.push_back(record);
    }

    /// Records a BROKEN verdict, logging its errno.
    fn broken(&mut self, reporter: &mut dyn Reporter, broken: &Broken) {
        if let Some(errno) = broken.errno() {
            self.errno_log.record(errno);
        }
        self.record(reporter, Verdict::Broken, broken.to_string(), broken.errno());
    }

    /// Emits an informational line.
    fn info(&mut self, reporter: &mut dyn Reporter, message: &str) {
        self.emit(
            reporter,
            &ReportEvent::Info {
                tcid: self.tcid,
                message,
            },
        );
    }

    /// Emits an event, keeping only the first failure.
    fn emit(&mut self, reporter: &mut dyn Reporter, event: &ReportEvent<'_>) {
        if let Err(err) = reporter.emit(event)
            && self.report_error.is_none()
        {
            self.report_error = Some(err);
        }
    }
}

// ============================================================================
// SECTION: Iteration Context
// ============================================================================

/// Handle a program uses to report verdicts during one iteration.
pub struct Iteration<'a> {
    /// Ledger for the run.
    recorder: &'a mut Recorder,
    /// Output sink.
    reporter: &'a mut dyn Reporter,
    /// Whether success-only checks emit PASS lines.
    functional: bool,
}

impl Iteration<'_> {
    /// Returns the zero-based iteration index.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.recorder.iteration
    }

    /// Returns whether success-only checks should emit PASS lines.
    #[must_use]
    pub const fn functional(&self) -> bool {
        self.functional
    }

    /// Records a verdict with a message.
    pub fn record(&mut self, verdict: Verdict, message: impl Into<String>) {
        self.recorder.record(self.reporter, verdict, message.into(), None);
    }

    /// Records a PASS.
    pub fn pass(&mut self, message: impl Into<String>) {
        self.record(Verdict::Pass, message);
    }

    /// Records a FAIL.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.record(Verdict::Fail, message);
    }

    /// Records a FAIL caused by `errno`, appending it to the message.
    pub fn fail_errno(&mut self, message: impl Into<String>, errno: Errno) {
        self.log_errno(errno);
        let message = format!("{}: errno={errno}", message.into());
        self.recorder.record(self.reporter, Verdict::Fail, message, Some(errno));
    }

    /// Records an UNRESOLVED.
    pub fn unresolved(&mut self, message: impl Into<String>) {
        self.record(Verdict::Unresolved, message);
    }

    /// Records an UNSUPPORTED.
    pub fn unsupported(&mut self, message: impl Into<String>) {
        self.record(Verdict::Unsupported, message);
    }

    /// Records an UNTESTED.
    pub fn untested(&mut self, message: impl Into<String>) {
        self.record(Verdict::Untested, message);
    }

    /// Records a classified table outcome and logs its errno.
    pub fn apply(&mut self, evaluation: Evaluation) {
        if let Some(errno) = evaluation.errno {
            self.log_errno(errno);
        }
        self.recorder.record(self.reporter, evaluation.verdict, evaluation.message, evaluation.errno);
    }

    /// Counts an errno in the run's errno log.
    pub fn log_errno(&mut self, errno: Errno) {
        self.recorder.errno_log.record(errno);
    }

    /// Emits an informational line without a verdict.
    pub fn info(&mut self, message: &str) {
        self.recorder.info(self.reporter, message);
    }
}

// ============================================================================
// SECTION: Driver
// ============================================================================

/// Runs one program to completion.
///
/// Verdicts stream to `reporter` as they happen; the summary is emitted last
/// and, with `settings.artifacts`, written to disk.
///
/// # Errors
///
/// Returns [`HarnessError::Report`] when a report line or artifact could not
/// be written. Verdicts themselves never produce an error.
pub fn run_program(
    program: &dyn TestProgram,
    settings: &RunSettings,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, HarnessError> {
    let info = program.info();
    let mut recorder = Recorder::new(&info);
    let started = Instant::now();
    let iterations = match program.setup(&SetupEnv::from_settings(settings)) {
        Err(broken) => {
            recorder.broken(reporter, &broken);
            0
        }
        Ok(mut run) => {
            let iterations = drive(run.as_mut(), &info, settings, &mut recorder, reporter);
            if let Err(broken) = run.cleanup() {
                recorder.broken(reporter, &broken);
            }
            iterations
        }
    };
    if settings.errno_log {
        for entry in recorder.errno_log.entries() {
            recorder.emit(
                reporter,
                &ReportEvent::Errno {
                    tcid: info.tcid,
                    entry: &entry,
                },
            );
        }
    }
    let summary = RunSummary {
        tcid: info.tcid.to_string(),
        convention: info.convention,
        tally: recorder.tally,
        exit_code: info.convention.exit_code(&recorder.tally),
        iterations,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        records: recorder.records.iter().cloned().collect(),
        records_truncated: recorder.truncated,
        errnos: recorder.errno_log.entries(),
    };
    recorder.emit(reporter, &ReportEvent::Summary(&summary));
    if let Some(err) = recorder.report_error.take() {
        return Err(err.into());
    }
    if let Some(dir) = &settings.artifacts {
        RunArtifacts::create(dir)?.write_summary(&summary)?;
    }
    Ok(summary)
}

/// Runs the pause and iteration loop; returns the iterations started.
///
/// A duration window starts at the first loop check, after setup and pause.
fn drive(
    run: &mut dyn TestRun,
    info: &ProgramInfo,
    settings: &RunSettings,
    recorder: &mut Recorder,
    reporter: &mut dyn Reporter,
) -> u64 {
    if settings.pause {
        recorder.info(reporter, "waiting for SIGUSR1");
        if let Err(errno) = wait_for_sigusr1() {
            recorder.broken(reporter, &Broken::with_errno("sigwait(SIGUSR1) failed", errno));
            return 0;
        }
    }
    let policy = if info.looping { settings.loop_policy } else { LoopPolicy::Count(1) };
    let mut completed: u64 = 0;
    let loop_started = Instant::now();
    while policy.should_continue(completed, loop_started.elapsed()) {
        if completed > 0 {
            pause_between(settings.delay);
        }
        recorder.begin_iteration(completed);
        completed = completed.saturating_add(1);
        let mut iteration = Iteration {
            recorder: &mut *recorder,
            reporter: &mut *reporter,
            functional: settings.functional,
        };
        if let Err(broken) = run.iterate(&mut iteration) {
            recorder.broken(reporter, &broken);
            break;
        }
    }
    completed
}

/// Sleeps for the configured inter-iteration delay.
fn pause_between(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
