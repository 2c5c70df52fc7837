//! recat - bulk category rearrangement for discussion forums
//!
//! recat runs a declarative plan of category operations (rename, move,
//! hide, expose, tag, reparent) against a forum, then rewrites historical
//! post content so references to old category slugs point where they now
//! belong.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use recat::{MemoryForum, Plan, Rearrangement};
//!
//! let forum = Arc::new(MemoryForum::open("forum.json")?);
//! let plan = Plan::load("rearrange.yaml")?;
//! let report = Rearrangement::run(forum.clone(), plan)?;
//! forum.save("forum.json")?;
//! ```
//!
//! # Architecture
//!
//! All mutations go through the [`Executor`], driven by a [`Rearrangement`].
//! The forum itself sits behind the [`Repository`] trait; [`MemoryForum`]
//! is the bundled implementation over a JSON dump.

// Re-export the public API from recat-executor
pub use recat_executor::*;

pub use recat_storage::{ForumBuilder, ForumDump, MemoryForum};

/// Entity and permission types
pub mod types {
    pub use recat_core::{
        AccessLevel, Category, CategoryId, Group, Permalink, Permissions, Post, PostId, SlugPath,
        SlugTag, Tag, TagId, Topic, TopicId, Viewer,
    };
}
