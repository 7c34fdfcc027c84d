//! Background task bookkeeping keyed by controller identity.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::state::ControllerId;

/// Spawned tasks grouped by the controller that started them.
///
/// Clones share the same registry.
#[derive(Clone, Debug, Default)]
pub struct TaskRegistry {
    inner: Arc<Mutex<HashMap<ControllerId, Vec<JoinHandle<()>>>>>,
}

impl TaskRegistry {
    /// Track `handle` under `id`, pruning tasks of `id` that already finished.
    pub fn register(&self, id: ControllerId, handle: JoinHandle<()>) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let list = map.entry(id).or_default();
        list.retain(|h| !h.is_finished());
        list.push(handle);
    }

    /// Number of unfinished tasks of `id`.
    #[must_use]
    pub fn pending(&self, id: ControllerId) -> usize {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(&id)
            .map_or(0, |l| l.iter().filter(|h| !h.is_finished()).count())
    }

    /// What: Abort every task of `id`.
    ///
    /// Output:
    /// - Number of tasks that were still running.
    pub fn abort(&self, id: ControllerId) -> usize {
        let handles = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.remove(&id).unwrap_or_default()
        };
        let mut aborted = 0;
        for h in handles {
            if !h.is_finished() {
                h.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            debug!(?id, aborted, "aborted controller tasks");
        }
        aborted
    }

    /// Abort everything.
    pub fn abort_all(&self) {
        let ids: Vec<ControllerId> = {
            let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.keys().copied().collect()
        };
        for id in ids {
            self.abort(id);
        }
    }

    /// Wait for every task of `id` to finish (aborted tasks count as finished).
    pub async fn join(&self, id: ControllerId) {
        let handles = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.remove(&id).unwrap_or_default()
        };
        for h in handles {
            let _ = h.await;
        }
    }
}
