//! Stateful interpreter for one rearrangement run.
//!
//! The [`Rearrangement`] wraps an [`Executor`] and walks a [`Plan`]
//! through three phases:
//!
//! ```text
//! Uninitialized --init--> Running --finalize--> Finalized
//!                            |
//!                            +--(operation fails)--> Aborted
//! ```
//!
//! `init` captures every category's reference string. `iterate` runs the
//! plan strictly in order and stops at the first failure; earlier
//! mutations stay applied and the run cannot be finalized. `finalize`
//! recomputes category statistics and rewrites historical post content.
//!
//! # Usage
//!
//! ```ignore
//! use recat_executor::{Plan, Rearrangement};
//!
//! let mut run = Rearrangement::new(repo);
//! run.init(Plan::load("rearrange.yaml")?)?;
//! run.iterate()?;
//! let report = run.finalize()?;
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use recat_core::Repository;

use crate::executor::RunContext;
use crate::ledger::RedirectLedger;
use crate::plan::{OperationRecord, Plan};
use crate::remap::{RemapReport, SlugTagRemapper, StartTags};
use crate::{Error, Executor, Output, Result};

/// Where a rearrangement is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, no plan loaded
    Uninitialized,
    /// Plan loaded, operations may run
    Running,
    /// Content remapped; nothing more may run
    Finalized,
    /// An operation failed; nothing more may run
    Aborted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Running => "running",
            Phase::Finalized => "finalized",
            Phase::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

struct RunState {
    pending: VecDeque<OperationRecord>,
    start_tags: StartTags,
    ctx: RunContext,
    executed: usize,
}

/// One batch run of a plan against a repository.
pub struct Rearrangement {
    executor: Executor,
    phase: Phase,
    run: Option<RunState>,
}

impl Rearrangement {
    /// Create an uninitialized rearrangement.
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            executor: Executor::new(repo),
            phase: Phase::Uninitialized,
            run: None,
        }
    }

    /// Run a whole plan: init, iterate, finalize.
    pub fn run(repo: Arc<dyn Repository>, plan: Plan) -> Result<RemapReport> {
        let mut rearrangement = Self::new(repo);
        rearrangement.init(plan)?;
        rearrangement.iterate()?;
        rearrangement.finalize()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ledger of the current run, once initialized.
    pub fn ledger(&self) -> Option<&RedirectLedger> {
        self.run.as_ref().map(|r| &r.ctx.ledger)
    }

    /// Reference strings captured at `init`.
    pub fn start_tags(&self) -> Option<&StartTags> {
        self.run.as_ref().map(|r| &r.start_tags)
    }

    /// Number of operations executed so far.
    pub fn executed(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.executed)
    }

    /// Number of operations still to run.
    pub fn pending(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.pending.len())
    }

    /// Load `plan` and capture every category's reference string.
    pub fn init(&mut self, plan: Plan) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(Error::AlreadyInitialized { phase: self.phase });
        }
        let start_tags = StartTags::capture(self.executor.repository())?;
        info!(
            target: "recat::op",
            operations = plan.len(),
            categories = start_tags.len(),
            "Rearrangement initialized"
        );
        self.run = Some(RunState {
            pending: plan.into_iter().collect(),
            start_tags,
            ctx: RunContext::new(),
            executed: 0,
        });
        self.phase = Phase::Running;
        Ok(())
    }

    /// Run every pending operation in order.
    ///
    /// Stops at the first failure and moves to [`Phase::Aborted`].
    /// Returns the number of operations executed by this call.
    pub fn iterate(&mut self) -> Result<usize> {
        let mut count = 0;
        while self.step()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Run the next pending operation, if any.
    pub fn step(&mut self) -> Result<Option<Output>> {
        let phase = self.phase;
        let run = match (&mut self.run, phase) {
            (Some(run), Phase::Running) => run,
            _ => return Err(Error::NotRunning { phase }),
        };
        let Some(record) = run.pending.pop_front() else {
            return Ok(None);
        };

        announce(&record);
        match self.executor.execute(&mut run.ctx, &record.operation) {
            Ok(output) => {
                run.executed += 1;
                info!(target: "recat::op", result = ?output, "{} done", record.operation.name());
                Ok(Some(output))
            }
            Err(e) => {
                error!(
                    target: "recat::op",
                    operation = record.operation.name(),
                    remaining = run.pending.len(),
                    error = %e,
                    "Operation failed, aborting run"
                );
                self.phase = Phase::Aborted;
                Err(e)
            }
        }
    }

    /// Recompute category statistics and remap historical post content.
    pub fn finalize(&mut self) -> Result<RemapReport> {
        if self.phase != Phase::Running {
            return Err(Error::NotRunning { phase: self.phase });
        }
        let repo = self.executor.repository();
        let run = self.run.as_ref().ok_or(Error::NotRunning { phase: self.phase })?;
        if !run.pending.is_empty() {
            warn!(
                target: "recat::op",
                skipped = run.pending.len(),
                "Finalizing with operations still pending"
            );
        }

        repo.update_category_stats()?;
        let report = SlugTagRemapper::new(repo).run(&run.start_tags, &run.ctx.ledger)?;
        info!(
            target: "recat::remap",
            mappings = report.mappings,
            changed = report.changed,
            unchanged = report.unchanged,
            "Remap finished"
        );
        self.phase = Phase::Finalized;
        Ok(report)
    }
}

/// Print the record banner: separator, context if any, name and arguments.
fn announce(record: &OperationRecord) {
    info!(target: "recat::op", "==========");
    if let Some(context) = &record.context {
        info!(target: "recat::op", "{}", context);
    }
    info!(
        target: "recat::op",
        "{}: {}",
        record.operation.name(),
        record.operation.args_json()
    );
}
