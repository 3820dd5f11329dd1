// crates/syscheck-cases/src/mq_timedsend/mod.rs
// ============================================================================
// Module: mq_timedsend Programs
// Description: Open POSIX checks for mq_timedsend(3).
// Purpose: Group the message queue send programs under one module.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! - [`MqTimedsend7_1`]: a full non-blocking queue rejects sends with
//!   `EAGAIN` and keeps the rejected message out of the queue.

mod mq_timedsend_7_1;

pub use mq_timedsend_7_1::MqTimedsend7_1;
