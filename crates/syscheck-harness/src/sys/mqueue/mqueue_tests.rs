// crates/syscheck-harness/src/sys/mqueue/mqueue_tests.rs
// ============================================================================
// Module: Message Queue Unit Tests
// Description: Unit coverage for owned queue descriptors and name guards.
// Purpose: Ensure queues are closed and unlinked on every path.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit coverage for owned queue descriptors and name guards. Hosts without
//! POSIX message queues (`ENOSYS`) skip the checks.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::use_debug,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use super::MessageQueue;
use super::QueueAttr;
use super::QueueName;
use crate::errno::Errno;
use crate::sys::fs::OpenFlags;

fn unique_name(label: &str) -> String {
    format!("/syscheck-unit-{label}-{}", std::process::id())
}

fn deadline() -> Duration {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("clock") + Duration::from_secs(5)
}

fn create(name: &QueueName, max_messages: i64) -> Option<MessageQueue> {
    let attr = QueueAttr {
        max_messages,
        message_size: 32,
    };
    match MessageQueue::open(
        name.as_c_str(),
        OpenFlags::CREAT | OpenFlags::RDWR | OpenFlags::NONBLOCK,
        0o600,
        Some(attr),
    ) {
        Ok(queue) => Some(queue),
        Err(errno) if errno == Errno::ENOSYS => None,
        Err(errno) => panic!("mq_open failed: {errno}"),
    }
}

#[test]
fn queue_name_requires_leading_slash() {
    assert_eq!(QueueName::new("no-slash").err(), Some(Errno::EINVAL));
    assert!(QueueName::new("/ok").is_ok());
}

#[test]
fn full_nonblocking_queue_reports_eagain() {
    let name = QueueName::new(&unique_name("full")).expect("name");
    let Some(queue) = create(&name, 2) else {
        return;
    };

    assert!(queue.timed_send(b"one", 1, deadline()).succeeded());
    assert!(queue.timed_send(b"two", 2, deadline()).succeeded());
    let third = queue.timed_send(b"three", 3, deadline());
    assert_eq!(third.errno, Some(Errno::EAGAIN));

    let mut buffer = [0_u8; 32];
    let received = queue.receive(&mut buffer).expect("receive");
    assert_eq!(&buffer[.. received.len], b"two");
    assert_eq!(received.priority, 2);

    queue.close().expect("close");
}

#[test]
fn name_guard_unlinks_on_drop() {
    let raw = unique_name("guard");
    {
        let name = QueueName::new(&raw).expect("name");
        let Some(queue) = create(&name, 1) else {
            return;
        };
        drop(queue);
    }
    let name = QueueName::new(&raw).expect("name");
    let reopened = MessageQueue::open(name.as_c_str(), OpenFlags::RDWR, 0, None);
    assert_eq!(reopened.err(), Some(Errno::ENOENT));
}

#[test]
fn explicit_unlink_disarms_guard() {
    let mut name = QueueName::new(&unique_name("explicit")).expect("name");
    let Some(queue) = create(&name, 1) else {
        return;
    };
    queue.close().expect("close");
    name.unlink().expect("unlink");
    assert_eq!(MessageQueue::unlink(name.as_c_str()), Err(Errno::ENOENT));
}
