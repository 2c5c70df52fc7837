//! # recat executor
//!
//! Runs a category rearrangement plan against a forum repository.
//!
//! This is the crate that does the work:
//! - [`Plan`] / [`Operation`] - the typed, pre-validated list of mutations
//! - [`Executor`] - stateless dispatch of one operation to its handler
//! - [`Rearrangement`] - the init → iterate → finalize interpreter
//! - [`RedirectLedger`] - which categories' references changed meaning
//! - [`SlugTagRemapper`] - rewrites historical post content at finalize
//!
//! ## Quick Start
//!
//! ```text
//! use recat_executor::{Plan, Rearrangement};
//!
//! let plan = Plan::load("rearrange.yaml")?;
//! let report = Rearrangement::run(repo, plan)?;
//! println!("{} posts rewritten", report.changed);
//! ```

#![warn(missing_docs)]

mod error;
mod executor;
mod ledger;
mod output;
mod rearrangement;

pub mod handlers;
pub mod operation;
pub mod plan;
pub mod remap;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use error::Error;
pub use executor::{Executor, RunContext};
pub use handlers::topic::MovePolicy;
pub use ledger::RedirectLedger;
pub use operation::Operation;
pub use output::Output;
pub use plan::{OperationRecord, Plan};
pub use rearrangement::{Phase, Rearrangement};
pub use remap::{apply_mappings, RemapReport, SlugMapping, SlugTagRemapper, StartTags};

// Re-export the repository seam so callers don't need recat-core directly
pub use recat_core::Repository;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
