//! Tracked background writes
//!
//! In `WriteMode::Background` a write is spawned onto a shared `JoinSet`
//! and the caller returns before it completes. Failures are logged and the
//! set is drained at shutdown, so no write is silently dropped.

use super::RepoResult;
use crate::config::WriteMode;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Handle to the set of in-flight background writes
#[derive(Clone, Default)]
pub struct BackgroundWrites {
    inner: Arc<Mutex<JoinSet<()>>>,
}

impl BackgroundWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `write` according to `mode`.
    ///
    /// `Sync` awaits it and returns its result. `Background` spawns it and
    /// returns `Ok(())` immediately.
    pub async fn dispatch<F>(&self, mode: WriteMode, operation: &'static str, write: F) -> RepoResult<()>
    where
        F: Future<Output = RepoResult<()>> + Send + 'static,
    {
        match mode {
            WriteMode::Sync => write.await,
            WriteMode::Background => {
                self.spawn(operation, write);
                Ok(())
            }
        }
    }

    /// Spawn a write whose failure is logged under `operation`
    pub fn spawn<F>(&self, operation: &'static str, write: F)
    where
        F: Future<Output = RepoResult<()>> + Send + 'static,
    {
        let mut set = self.lock();
        // Reap finished writes so the set does not grow without bound
        while set.try_join_next().is_some() {}

        set.spawn(async move {
            match write.await {
                Ok(()) => debug!(operation, "Background write completed"),
                Err(e) => error!(operation, error = %e, "Background write failed"),
            }
        });
    }

    /// Number of writes spawned and not yet reaped
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Wait for every outstanding write to finish
    pub async fn drain(&self) {
        let mut set = std::mem::take(&mut *self.lock());
        let outstanding = set.len();

        while let Some(result) = set.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "Background write task did not complete");
            }
        }

        if outstanding > 0 {
            info!(outstanding, "Background writes drained");
        }
    }

    fn lock(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
