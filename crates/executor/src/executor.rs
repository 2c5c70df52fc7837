//! The Executor - single entry point for running operations.
//!
//! The Executor is a stateless dispatcher that routes each [`Operation`]
//! to its handler. Run-scoped state lives in a [`RunContext`] owned by the
//! caller and passed in explicitly.

use std::sync::Arc;

use recat_core::{CategoryId, Repository};

use crate::handlers::{category, topic};
use crate::ledger::RedirectLedger;
use crate::{Operation, Output, Result};

/// State shared between operations of one run.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Categories whose reference meaning changed, and their targets
    pub ledger: RedirectLedger,
    /// Parent that `hideCategory` moves hidden categories under
    pub hidden_category: Option<CategoryId>,
}

impl RunContext {
    /// A fresh context with an empty ledger
    pub fn new() -> Self {
        Self::default()
    }
}

/// The operation executor.
///
/// The Executor is **stateless**: it holds a reference to the repository
/// but no run state of its own.
///
/// # Example
///
/// ```ignore
/// use recat_executor::{Executor, Operation, RunContext};
/// use recat_executor::operation::CategoryRef;
///
/// let executor = Executor::new(repo);
/// let mut ctx = RunContext::new();
/// executor.execute(&mut ctx, &Operation::HideCategory(CategoryRef { category: 3.into() }))?;
/// ```
pub struct Executor {
    repo: Arc<dyn Repository>,
}

impl Executor {
    /// Create a new executor over a repository.
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// The repository operations run against.
    pub fn repository(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    /// Execute a single operation.
    pub fn execute(&self, ctx: &mut RunContext, op: &Operation) -> Result<Output> {
        let repo = self.repo.as_ref();
        match op {
            Operation::Describe(args) => category::describe(repo, ctx, args),
            Operation::Redirect(args) => topic::redirect(repo, args),
            Operation::MovePosts(args) => topic::move_posts(repo, ctx, args),
            Operation::SetHiddenCategory(args) => category::set_hidden_category(repo, ctx, args),
            Operation::HideCategory(args) => category::hide_category(repo, ctx, args),
            Operation::ExposeCategory(args) => category::expose_category(repo, args),
            Operation::PublicCategoriesReadonly => category::public_categories_readonly(repo),
            Operation::RemoveTagInCategory(args) => topic::remove_tag_in_category(repo, args),
            Operation::TagCategory(args) => topic::tag_category(repo, args),
            Operation::ReparentCategory(args) => category::reparent_category(repo, args),
        }
    }

    /// Execute operations in order, stopping at the first failure.
    ///
    /// Operations before the failure stay applied.
    pub fn execute_all<'a, I>(&self, ctx: &mut RunContext, ops: I) -> Result<Vec<Output>>
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        ops.into_iter().map(|op| self.execute(ctx, op)).collect()
    }
}
