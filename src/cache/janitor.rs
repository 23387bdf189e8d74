use super::cache_set::EngineCaches;
use crate::{info, log};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Background task sweeping expired entries out of an engine's caches.
///
/// Started by [`CacheJanitor::spawn`], stopped by [`CacheJanitor::shutdown`] or
/// when the janitor is dropped.
#[derive(Debug)]
pub struct CacheJanitor {
    c_tok: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl CacheJanitor {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn(caches: Arc<EngineCaches>, period: Duration) -> Self {
        let c_tok = CancellationToken::new();
        let task_tok = c_tok.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;
            info!("Cache janitor started, sweeping every {}s", period.as_secs_f64());
            loop {
                tokio::select! {
                    () = task_tok.cancelled() => break,
                    _ = ticker.tick() => {
                        let purged = caches.sweep_all();
                        if purged > 0 {
                            log!("Cache janitor purged {purged} expired entries");
                        }
                    }
                }
            }
            info!("Cache janitor stopped");
        });
        Self { c_tok, handle: Some(handle) }
    }

    pub fn is_running(&self) -> bool { self.handle.as_ref().is_some_and(|h| !h.is_finished()) }

    /// Cancels the sweep loop and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.c_tok.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for CacheJanitor {
    fn drop(&mut self) { self.c_tok.cancel(); }
}
