// src/task/compose.rs

//! Sequential and concurrent task composition.
//!
//! Both combinators produce a composite with the same contract as any other
//! task: it runs to completion and signals success or failure.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::errors::{PipelineError, Result};
use crate::task::{Task, TaskContext};

/// Run members strictly in order; the first failure aborts the rest.
///
/// A member's side effects are fully committed before the next member
/// starts, so later members may read what earlier ones wrote.
pub fn sequence(name: impl Into<String>, tasks: Vec<Arc<dyn Task>>) -> Arc<dyn Task> {
    Arc::new(Sequence {
        name: name.into(),
        tasks,
    })
}

/// Start all members together; the composite succeeds only if every member
/// succeeds. There is no ordering between members, so they must never share
/// an output path.
///
/// When one member fails, completed members' side effects stay on disk: no
/// transactional rollback.
pub fn concurrent(name: impl Into<String>, tasks: Vec<Arc<dyn Task>>) -> Arc<dyn Task> {
    Arc::new(Concurrent {
        name: name.into(),
        tasks,
    })
}

struct Sequence {
    name: String,
    tasks: Vec<Arc<dyn Task>>,
}

impl Task for Sequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(
        &'a self,
        ctx: &'a TaskContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            for task in &self.tasks {
                debug!(group = %self.name, task = %task.name(), "sequence: running member");
                if let Err(err) = task.run(ctx).await {
                    error!(
                        group = %self.name,
                        task = %task.name(),
                        error = %err,
                        "sequence member failed; aborting remaining members"
                    );
                    return Err(PipelineError::Composition {
                        group: self.name.clone(),
                        failed: vec![task.name().to_string()],
                    });
                }
            }
            Ok(())
        })
    }
}

struct Concurrent {
    name: String,
    tasks: Vec<Arc<dyn Task>>,
}

impl Task for Concurrent {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(
        &'a self,
        ctx: &'a TaskContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut set = JoinSet::new();

            for task in &self.tasks {
                let task = Arc::clone(task);
                let ctx = ctx.clone();
                set.spawn(async move {
                    let name = task.name().to_string();
                    let result = task.run(&ctx).await;
                    (name, result)
                });
            }

            // All members run to completion regardless of sibling failures.
            let mut failed = Vec::new();
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok((_, Ok(()))) => {}
                    Ok((name, Err(err))) => {
                        error!(
                            group = %self.name,
                            task = %name,
                            error = %err,
                            "concurrent member failed"
                        );
                        failed.push(name);
                    }
                    Err(join_err) => {
                        error!(group = %self.name, error = %join_err, "concurrent member panicked");
                        failed.push("<panicked>".to_string());
                    }
                }
            }

            if failed.is_empty() {
                Ok(())
            } else {
                failed.sort();
                Err(PipelineError::Composition {
                    group: self.name.clone(),
                    failed,
                })
            }
        })
    }
}
