//! Output enum describing what an operation did.
//!
//! Every successful [`Operation`](crate::Operation) returns an [`Output`].
//! Outputs are informational: the interpreter logs them, tests assert on
//! them, nothing downstream branches on them.

use recat_core::CategoryId;

/// Result of executing one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Operation completed with nothing to report
    Unit,

    /// A category's fields were updated
    CategoryUpdated {
        /// Updated category
        category: CategoryId,
    },

    /// Topics were moved out of a category
    TopicsMoved {
        /// Topics moved
        count: usize,
        /// Source was hidden
        hidden: bool,
        /// Source URL now redirects to the target
        redirected: bool,
    },

    /// A tag was newly attached to this many topics
    TopicsTagged {
        /// Topics newly tagged
        count: usize,
    },

    /// A tag was detached from this many topics
    TopicsUntagged {
        /// Topics untagged
        count: usize,
    },

    /// Permissions were rewritten on this many categories
    PermissionsChanged {
        /// Categories rewritten
        count: usize,
    },
}
