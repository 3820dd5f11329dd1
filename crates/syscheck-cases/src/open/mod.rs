// crates/syscheck-cases/src/open/mod.rs
// ============================================================================
// Module: open(2) Programs
// Description: LTP-derived checks for open(2).
// Purpose: Group the open(2) programs under one module.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! - [`Open03`]: `open(O_RDWR|O_CREAT)` succeeds and the file can be removed.
//! - [`Open08`]: `open` reports the documented errno for each error path.

mod open03;
mod open08;

pub use open03::Open03;
pub use open08::Open08;
