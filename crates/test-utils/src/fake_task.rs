use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use sitepipe::errors::Result;
use sitepipe::task::{Task, TaskContext};

/// A fake task that records its runs into a shared log and optionally
/// fails or sleeps before completing.
pub struct RecordingTask {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
    delay: Duration,
}

impl RecordingTask {
    pub fn new(name: impl Into<String>, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.into(),
            log,
            fail: false,
            delay: Duration::ZERO,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Task for RecordingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(
        &'a self,
        _ctx: &'a TaskContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            {
                let mut guard = self.log.lock().unwrap();
                guard.push(self.name.clone());
            }

            if self.fail {
                Err(anyhow!("task '{}' failed (simulated)", self.name).into())
            } else {
                Ok(())
            }
        })
    }
}

/// A fake task that writes a fixed file under the output root when run.
pub struct WritingTask {
    name: String,
    rel: String,
    contents: Vec<u8>,
}

impl WritingTask {
    pub fn new(name: impl Into<String>, rel: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            rel: rel.into(),
            contents: contents.into(),
        }
    }
}

impl Task for WritingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(
        &'a self,
        ctx: &'a TaskContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let dest = ctx.out_root.join(&self.rel);
            ctx.fs.write(&dest, &self.contents)?;
            Ok(())
        })
    }
}
