// crates/syscheck-harness/src/options.rs
// ============================================================================
// Module: Run Options
// Description: Command-line flags and the merged settings a run executes with.
// Purpose: Merge CLI, environment, and file layers into one typed value.
// Dependencies: clap
// ============================================================================

//! ## Overview
//! [`RunArgs`] is the flag set every program binary accepts; the suite runner
//! flattens the same struct into its `run` subcommand. [`RunSettings`] is the
//! merged result, with precedence CLI flag > environment > config file >
//! default.
//!
//! Loop policy: `-i N` runs N iterations and `-i 0` loops until the process
//! is killed. `-I SECS` runs for a wall-clock duration and takes precedence
//! over any iteration count.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::config::ConfigError;
use crate::config::EnvOverrides;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::report::ReportFormat;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Iteration count when no layer sets one.
pub const DEFAULT_ITERATIONS: u64 = 1;
/// Account root-only programs switch to when none is configured.
pub const DEFAULT_UNPRIVILEGED_USER: &str = "nobody";

// ============================================================================
// SECTION: CLI Flags
// ============================================================================

/// Flags shared by every program binary and `syscheck run`.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct RunArgs {
    /// Number of iterations (0 loops forever).
    #[arg(short = 'i', long, value_name = "N")]
    pub iterations: Option<u64>,
    /// Run for this many seconds instead of a fixed count.
    #[arg(short = 'I', long, value_name = "SECS", value_parser = parse_seconds)]
    pub duration: Option<Duration>,
    /// Delay between iterations in seconds (fractional allowed).
    #[arg(short = 'P', long, value_name = "SECS", value_parser = parse_seconds)]
    pub delay: Option<Duration>,
    /// Wait for SIGUSR1 before the first iteration.
    #[arg(short = 'p', long)]
    pub pause: bool,
    /// Skip PASS lines for checks that only confirm success.
    #[arg(short = 'f', long)]
    pub no_functional: bool,
    /// Print an errno summary at exit.
    #[arg(short = 'e', long)]
    pub errno_log: bool,
    /// Report line format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,
    /// Write summary.json and summary.md into this directory.
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
    /// Config file path (defaults to ./syscheck.toml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Directory under which scratch directories are created.
    #[arg(long, value_name = "DIR")]
    pub scratch_root: Option<PathBuf>,
    /// Keep scratch directories after the run.
    #[arg(long)]
    pub keep_scratch: bool,
}

// ============================================================================
// SECTION: Loop Policy
// ============================================================================

/// When the driver stops iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPolicy {
    /// Run exactly this many iterations.
    Count(u64),
    /// Run until the process is killed.
    Forever,
    /// Run until this much wall-clock time has elapsed.
    Duration(Duration),
}

impl LoopPolicy {
    /// Builds a count policy, mapping `0` to [`LoopPolicy::Forever`].
    #[must_use]
    pub const fn from_count(count: u64) -> Self {
        if count == 0 { Self::Forever } else { Self::Count(count) }
    }

    /// Returns whether another iteration should start.
    #[must_use]
    pub fn should_continue(self, completed: u64, elapsed: Duration) -> bool {
        match self {
            Self::Count(count) => completed < count,
            Self::Forever => true,
            Self::Duration(limit) => completed == 0 || elapsed < limit,
        }
    }
}

// ============================================================================
// SECTION: Run Settings
// ============================================================================

/// Fully merged settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Stop condition.
    pub loop_policy: LoopPolicy,
    /// Sleep between iterations.
    pub delay: Duration,
    /// Wait for SIGUSR1 before the first iteration.
    pub pause: bool,
    /// Emit PASS lines for success-only checks.
    pub functional: bool,
    /// Emit the errno summary at exit.
    pub errno_log: bool,
    /// Report line format.
    pub format: ReportFormat,
    /// Artifact directory, if requested.
    pub artifacts: Option<PathBuf>,
    /// Scratch directory root.
    pub scratch_root: PathBuf,
    /// Keep scratch directories after the run.
    pub keep_scratch: bool,
    /// Account root-only programs switch to.
    pub unprivileged_user: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            loop_policy: LoopPolicy::Count(DEFAULT_ITERATIONS),
            delay: Duration::ZERO,
            pause: false,
            functional: true,
            errno_log: false,
            format: ReportFormat::Text,
            artifacts: None,
            scratch_root: std::env::temp_dir(),
            keep_scratch: false,
            unprivileged_user: DEFAULT_UNPRIVILEGED_USER.to_string(),
        }
    }
}

impl RunSettings {
    /// Loads the config file and environment, then merges them with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when any layer is invalid.
    pub fn resolve(args: &RunArgs) -> Result<Self, HarnessError> {
        let config = HarnessConfig::load(args.config.as_deref())?;
        let env = EnvOverrides::load().map_err(ConfigError::Invalid)?;
        Self::from_layers(args, &env, &config)
    }

    /// Merges already-loaded layers.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Options`] when the merged values conflict.
    pub fn from_layers(
        args: &RunArgs,
        env: &EnvOverrides,
        config: &HarnessConfig,
    ) -> Result<Self, HarnessError> {
        let duration = args
            .duration
            .or_else(|| config.run.duration_secs.map(Duration::from_secs));
        let loop_policy = match duration {
            Some(limit) if limit.is_zero() => {
                return Err(HarnessError::Options("duration must be greater than zero".to_string()));
            }
            Some(limit) => LoopPolicy::Duration(limit),
            None => LoopPolicy::from_count(
                args.iterations
                    .or(env.iterations)
                    .or(config.run.iterations)
                    .unwrap_or(DEFAULT_ITERATIONS),
            ),
        };
        let delay = args
            .delay
            .or_else(|| config.run.delay_ms.map(Duration::from_millis))
            .unwrap_or(Duration::ZERO);
        let scratch_root = args
            .scratch_root
            .clone()
            .or_else(|| env.scratch_root.clone())
            .or_else(|| config.scratch.root.clone())
            .unwrap_or_else(std::env::temp_dir);
        let keep_scratch = args.keep_scratch
            || env.keep_scratch.or(config.scratch.keep).unwrap_or(false);
        Ok(Self {
            loop_policy,
            delay,
            pause: args.pause,
            functional: !args.no_functional,
            errno_log: args.errno_log || config.report.errno_log.unwrap_or(false),
            format: args.format.or(config.report.format).unwrap_or_default(),
            artifacts: args.artifacts.clone(),
            scratch_root,
            keep_scratch,
            unprivileged_user: config
                .privilege
                .unprivileged_user
                .clone()
                .unwrap_or_else(|| DEFAULT_UNPRIVILEGED_USER.to_string()),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a non-negative, possibly fractional number of seconds.
fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let value: f64 =
        raw.trim().parse().map_err(|_| format!("invalid number of seconds: {raw}"))?;
    Duration::try_from_secs_f64(value).map_err(|_| format!("seconds out of range: {raw}"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
