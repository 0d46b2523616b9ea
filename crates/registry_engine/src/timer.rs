use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct Pending {
    next_generation: u64,
    timers: HashMap<u64, (u64, CancellationToken)>,
}

/// Cancellable one-shot timers keyed by the caller's token.
///
/// Every timer is a child of one root token, so `cancel_all` releases
/// everything still pending.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResetTimers {
    root: CancellationToken,
    pending: Arc<Mutex<Pending>>,
}

impl ResetTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `token` immediately and returns a future that resolves to
    /// `true` once `delay` has passed, or `false` if the timer was cancelled.
    /// Re-arming a token cancels its predecessor.
    pub(crate) fn arm(&self, token: u64, delay: Duration) -> impl Future<Output = bool> + Send {
        let cancel = self.root.child_token();
        let generation = {
            let mut pending = self.lock();
            pending.next_generation += 1;
            let generation = pending.next_generation;
            if let Some((_, previous)) = pending.timers.insert(token, (generation, cancel.clone())) {
                previous.cancel();
            }
            generation
        };

        let timers = self.clone();
        async move {
            let elapsed = cancel
                .run_until_cancelled(tokio::time::sleep(delay))
                .await
                .is_some();
            timers.forget(token, generation);
            elapsed
        }
    }

    /// Cancels a pending timer. Returns whether one was pending.
    pub(crate) fn cancel(&self, token: u64) -> bool {
        match self.lock().timers.remove(&token) {
            Some((_, cancel)) => {
                cancel.cancel();
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_all(&self) {
        self.root.cancel();
        self.lock().timers.clear();
    }

    #[cfg(test)]
    fn pending_count(&self) -> usize {
        self.lock().timers.len()
    }

    fn forget(&self, token: u64, generation: u64) {
        let mut pending = self.lock();
        if matches!(pending.timers.get(&token), Some((current, _)) if *current == generation) {
            pending.timers.remove(&token);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
