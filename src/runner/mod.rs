//! Task list execution.
//!
//! Commands build an explicit, ordered plan of [`Task`]s per invocation and
//! hand it to one of two executors:
//!
//! - [`run_concurrent`] for independent read-only checks (version probes).
//!   Every task runs on its own thread; one task's failure does not abort
//!   its siblings. All outcomes are collected and reported, successes and
//!   failures alike.
//! - [`run_sequential`] for the install→configure chain, where later tasks
//!   depend on earlier ones (configuration needs a successful extraction).
//!   The first failure aborts the remaining chain.
//!
//! The only state shared across tasks is a [`TaskContext`] used to pass the
//! extracted helper path from the install task to the configure task; it is
//! threaded through the sequential executor only, so the hand-off is
//! naturally ordered.

use std::path::PathBuf;
use std::thread;

use crate::error::{LmError, Result};
use crate::ui::UserInterface;

/// Mutable state threaded through a sequential task chain.
#[derive(Debug, Default)]
pub struct TaskContext {
    /// Helper install directory, set by the install task.
    pub helper_path: Option<PathBuf>,
}

type TaskAction<'a> = Box<dyn FnOnce(&mut TaskContext) -> Result<String> + Send + 'a>;
type SkipCheck<'a> = Box<dyn Fn(&TaskContext) -> Option<String> + Send + 'a>;

/// A single unit of work with a user-facing title.
pub struct Task<'a> {
    title: String,
    action: TaskAction<'a>,
    skip: Option<SkipCheck<'a>>,
}

impl<'a> Task<'a> {
    /// Create a task. The action returns a short detail string shown on
    /// success (e.g. the version that was found).
    pub fn new<F>(title: &str, action: F) -> Self
    where
        F: FnOnce(&mut TaskContext) -> Result<String> + Send + 'a,
    {
        Self {
            title: title.to_string(),
            action: Box::new(action),
            skip: None,
        }
    }

    /// Attach a skip predicate. When it returns `Some(reason)` the task is
    /// reported as skipped instead of executed.
    pub fn with_skip<F>(mut self, skip: F) -> Self
    where
        F: Fn(&TaskContext) -> Option<String> + Send + 'a,
    {
        self.skip = Some(Box::new(skip));
        self
    }

    /// Get the task title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// How a task ended.
#[derive(Debug)]
pub enum TaskStatus {
    /// Completed, with a detail string.
    Success(String),
    /// Not executed, with the skip reason.
    Skipped(String),
    /// Failed with an error.
    Failed(LmError),
}

impl TaskStatus {
    /// Whether this outcome counts as a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskStatus::Failed(_))
    }
}

/// Outcome of one task, keeping its title for reporting.
#[derive(Debug)]
pub struct TaskOutcome {
    pub title: String,
    pub status: TaskStatus,
}

/// Run independent tasks concurrently and report every outcome.
///
/// Outcomes are returned in task order regardless of completion order, and a
/// failing task never prevents its siblings from finishing. The caller
/// inspects the returned outcomes; nothing is swallowed.
pub fn run_concurrent(tasks: Vec<Task<'_>>, ui: &mut dyn UserInterface) -> Vec<TaskOutcome> {
    let outcomes: Vec<TaskOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                scope.spawn(move || {
                    let mut ctx = TaskContext::default();
                    let status = match (task.action)(&mut ctx) {
                        Ok(detail) => TaskStatus::Success(detail),
                        Err(err) => TaskStatus::Failed(err),
                    };
                    TaskOutcome {
                        title: task.title,
                        status,
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("task thread panicked"))
            .collect()
    });

    for outcome in &outcomes {
        match &outcome.status {
            TaskStatus::Success(detail) if detail.is_empty() => ui.success(&outcome.title),
            TaskStatus::Success(detail) => ui.success(&format!("{}: {}", outcome.title, detail)),
            TaskStatus::Skipped(reason) => {
                ui.message(&format!("○ {} ({})", outcome.title, reason))
            }
            TaskStatus::Failed(err) => ui.error(&format!("{}: {}", outcome.title, err)),
        }
    }

    outcomes
}

/// Run dependent tasks in order, aborting the chain on the first failure.
///
/// Returns the final [`TaskContext`] so callers can read values set by the
/// chain (e.g. the helper path).
pub fn run_sequential(tasks: Vec<Task<'_>>, ui: &mut dyn UserInterface) -> Result<TaskContext> {
    let mut ctx = TaskContext::default();

    for task in tasks {
        if let Some(skip) = &task.skip {
            if let Some(reason) = skip(&ctx) {
                let mut spinner = ui.start_spinner(&task.title);
                spinner.finish_skipped(&format!("{} ({})", task.title, reason));
                continue;
            }
        }

        let mut spinner = ui.start_spinner(&task.title);
        match (task.action)(&mut ctx) {
            Ok(detail) if detail.is_empty() => spinner.finish_success(&task.title),
            Ok(detail) => spinner.finish_success(&format!("{}: {}", task.title, detail)),
            Err(err) => {
                spinner.finish_error(&task.title);
                return Err(err);
            }
        }
    }

    Ok(ctx)
}
