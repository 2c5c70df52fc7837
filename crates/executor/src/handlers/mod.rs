//! Operation handlers organized by the entity they mutate.
//!
//! | Module | Operations |
//! |--------|------------|
//! | `category` | describe, setHiddenCategory, hideCategory, exposeCategory, publicCategoriesReadonly, reparentCategory |
//! | `topic` | redirect, movePosts, tagCategory, removeTagInCategory |
//!
//! Handlers receive the repository and the run context explicitly; they
//! keep no state of their own.

pub mod category;
pub mod topic;
