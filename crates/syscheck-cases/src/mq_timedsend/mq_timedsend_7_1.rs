// crates/syscheck-cases/src/mq_timedsend/mq_timedsend_7_1.rs
// ============================================================================
// Module: mq_timedsend 7-1
// Description: Sending to a full O_NONBLOCK queue fails with EAGAIN.
// Purpose: Verify mq_timedsend neither blocks nor enqueues on a full queue.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! A queue with room for [`MAX_MESSAGES`] messages is opened non-blocking and
//! filled until a send fails. The failure must be `EAGAIN`, and the message
//! received afterwards must not be the one that was rejected.
//!
//! Verdict order: never filling the queue is UNRESOLVED, then any failed
//! assertion is FAIL, then any failed housekeeping call is UNRESOLVED.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use syscheck_harness::Broken;
use syscheck_harness::Errno;
use syscheck_harness::ExitConvention;
use syscheck_harness::Iteration;
use syscheck_harness::ProgramInfo;
use syscheck_harness::SetupEnv;
use syscheck_harness::TestProgram;
use syscheck_harness::TestRun;
use syscheck_harness::sys::fs::OpenFlags;
use syscheck_harness::sys::mqueue::MessageQueue;
use syscheck_harness::sys::mqueue::QueueAttr;
use syscheck_harness::sys::mqueue::QueueName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Queue capacity in messages.
pub const MAX_MESSAGES: u32 = 5;

/// Largest message the queue accepts, in bytes.
pub const MESSAGE_SIZE: usize = 40;

/// Permissions of the created queue.
const QUEUE_MODE: u32 = 0o600;

/// Program description.
const INFO: ProgramInfo = ProgramInfo {
    tcid: "mq_timedsend_7_1",
    origin: "open_posix",
    description: "mq_timedsend on a full O_NONBLOCK queue fails with EAGAIN",
    convention: ExitConvention::OpenPosix,
    expected_errnos: &[Errno::EAGAIN],
    looping: false,
};

// ============================================================================
// SECTION: Program
// ============================================================================

/// `mq_timedsend_7_1`: full non-blocking queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct MqTimedsend7_1;

impl TestProgram for MqTimedsend7_1 {
    fn info(&self) -> ProgramInfo {
        INFO
    }

    fn setup(&self, _env: &SetupEnv) -> Result<Box<dyn TestRun>, Broken> {
        Ok(Box::new(FullQueueRun {
            name: queue_name(process::id()),
        }))
    }
}

/// Returns the queue name used by process `pid`.
#[must_use]
pub fn queue_name(pid: u32) -> String {
    format!("/mq_timedsend_7-1_{pid}")
}

// ============================================================================
// SECTION: Run State
// ============================================================================

/// Live state between setup and cleanup.
struct FullQueueRun {
    /// Queue name; the queue itself only exists inside an iteration.
    name: String,
}

/// What filling the queue observed.
#[derive(Debug, Default)]
struct Findings {
    /// A send was rejected.
    max_reached: bool,
    /// An assertion did not hold.
    failure: bool,
    /// A housekeeping call failed.
    unresolved: bool,
}

impl TestRun for FullQueueRun {
    fn iterate(&mut self, iteration: &mut Iteration<'_>) -> Result<(), Broken> {
        let mut name = QueueName::new(&self.name)
            .map_err(|errno| Broken::with_errno(format!("invalid queue name {}", self.name), errno))?;
        let flags = OpenFlags::CREAT | OpenFlags::RDWR | OpenFlags::NONBLOCK;
        let attr = QueueAttr {
            max_messages: i64::from(MAX_MESSAGES),
            message_size: i64::try_from(MESSAGE_SIZE).unwrap_or(i64::MAX),
        };
        let queue = match MessageQueue::open(name.as_c_str(), flags, QUEUE_MODE, Some(attr)) {
            Ok(queue) => queue,
            Err(errno) => {
                iteration.log_errno(errno);
                if errno == Errno::ENOSYS {
                    iteration.unsupported("mq_open not supported");
                } else {
                    iteration.unresolved(format!("mq_open() did not return success: errno={errno}"));
                }
                return Ok(());
            }
        };

        let mut findings = Findings::default();
        let rejected = fill(&queue, iteration, &mut findings)?;
        check_receive(&queue, rejected.as_deref(), iteration, &mut findings);
        if let Err(errno) = queue.close() {
            iteration.log_errno(errno);
            iteration.info(&format!("mq_close() failed: errno={errno}"));
            findings.unresolved = true;
        }
        if let Err(errno) = name.unlink() {
            iteration.log_errno(errno);
            iteration.info(&format!("mq_unlink() failed: errno={errno}"));
            findings.unresolved = true;
        }

        if !findings.max_reached {
            iteration.unresolved("Couldn't fill message queue");
        } else if findings.failure {
            iteration.fail("Test FAILED");
        } else if findings.unresolved {
            iteration.unresolved("Test UNRESOLVED");
        } else {
            iteration.pass("Test PASSED");
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Broken> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Steps
// ============================================================================

/// Sends until the queue rejects a message; returns the rejected message.
fn fill(
    queue: &MessageQueue,
    iteration: &mut Iteration<'_>,
    findings: &mut Findings,
) -> Result<Option<String>, Broken> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| Broken::new(format!("system clock before epoch: {err}")))?;
    for index in 0..=MAX_MESSAGES {
        let message = format!("message {index}");
        let deadline = now.saturating_add(Duration::from_secs(u64::from(index) + 1));
        let outcome = queue.timed_send(message.as_bytes(), index + 1, deadline);
        if let Some(errno) = outcome.errno {
            iteration.log_errno(errno);
            findings.max_reached = true;
            if errno != Errno::EAGAIN {
                iteration.info(&format!("mq_timedsend() failed with errno={errno}, expected EAGAIN"));
                findings.failure = true;
            }
            return Ok(Some(message));
        }
    }
    Ok(None)
}

/// Receives one message and checks it is not the rejected one.
fn check_receive(
    queue: &MessageQueue,
    rejected: Option<&str>,
    iteration: &mut Iteration<'_>,
    findings: &mut Findings,
) {
    let mut buffer = [0_u8; MESSAGE_SIZE];
    match queue.receive(&mut buffer) {
        Err(errno) => {
            iteration.log_errno(errno);
            iteration.info(&format!("mq_receive() failed: errno={errno}"));
            findings.unresolved = true;
        }
        Ok(received) => {
            let body = buffer.get(..received.len).unwrap_or_default();
            if findings.max_reached && rejected.is_some_and(|message| message.as_bytes() == body) {
                iteration.info("received the message that mq_timedsend() rejected");
                findings.failure = true;
            }
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
