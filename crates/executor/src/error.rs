//! Error types for plan loading and execution.
//!
//! All errors from a rearrangement run are represented by the [`Error`] enum:
//!
//! | Category | Variants | Description |
//! |----------|----------|-------------|
//! | Configuration | `Config`, `MalformedRecord`, `UnknownOperation`, `InvalidArguments` | Bad plan; fatal before any mutation |
//! | State | `NotRunning`, `AlreadyInitialized` | Interpreter used out of order |
//! | Repository | `Repository` | Store-level failure; fatal |
//! | System | `Io` | Reading the plan file |

use crate::operation::OPERATION_NAMES;
use crate::rearrangement::Phase;

/// Rearrangement errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ==================== Configuration ====================
    /// The plan document itself is unusable
    #[error("configuration error: {reason}")]
    Config {
        /// What is wrong with it
        reason: String,
    },

    /// A plan record is not a single-key mapping
    #[error("record {index}: {reason}")]
    MalformedRecord {
        /// 1-based record position
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A plan record names no known operation
    #[error(
        "record {index}: unknown operation '{name}' (known: {})",
        OPERATION_NAMES.join(", ")
    )]
    UnknownOperation {
        /// 1-based record position
        index: usize,
        /// Name as written in the plan
        name: String,
    },

    /// A plan record's arguments do not fit its operation
    #[error("record {index}: invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        /// 1-based record position
        index: usize,
        /// Operation name
        operation: String,
        /// Deserializer message
        reason: String,
    },

    // ==================== State ====================
    /// Operation requires a running rearrangement
    #[error("rearrangement is not running (phase: {phase})")]
    NotRunning {
        /// Phase at the time of the call
        phase: Phase,
    },

    /// `init` called twice
    #[error("rearrangement already initialized (phase: {phase})")]
    AlreadyInitialized {
        /// Phase at the time of the call
        phase: Phase,
    },

    // ==================== Repository ====================
    /// Store-level failure
    #[error(transparent)]
    Repository(#[from] recat_core::Error),

    // ==================== System ====================
    /// I/O error reading a plan
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by the plan rather than the store
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MalformedRecord { .. }
                | Error::UnknownOperation { .. }
                | Error::InvalidArguments { .. }
        )
    }
}
