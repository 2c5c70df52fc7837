//! Rearrangement Tests
//!
//! End-to-end tests for the recat crate:
//! - plans loaded from YAML files
//! - forums loaded from and saved to JSON dumps
//! - full init → iterate → finalize runs

mod common;

mod dump_round_trip;
mod full_runs;
mod plan_rejection;
