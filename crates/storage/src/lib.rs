//! Storage layer for recat
//!
//! This crate implements the forum repository used by the command-line
//! tool and the test-suite:
//! - MemoryForum: `Repository` over `BTreeMap`s behind a `RwLock`
//! - ForumDump: the JSON on-disk form of a forum
//! - ForumBuilder: fixture builder

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dump;
pub mod fixture;
pub mod memory;

pub use dump::ForumDump;
pub use fixture::{ForumBuilder, DEFAULT_COLOR, DEFINITION_TOPIC_BASE};
pub use memory::MemoryForum;
