use std::collections::HashMap;
use std::future::Future;

use tokio::task::JoinHandle;
use tracing::trace;

/// Background tasks keyed by purpose. Spawning under a key that is still
/// running aborts the older task.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, key: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.prune();
        if let Some(handle) = self.tasks.insert(key, tokio::spawn(task)) {
            trace!(key, "task_replaced");
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks.get(key).is_some_and(|h| !h.is_finished())
    }

    /// Forget tasks that already completed.
    pub fn prune(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn spawning_same_key_aborts_previous() {
        let mut tasks = TaskManager::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        tasks.spawn("fetch", async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = tx.send(());
        });
        tasks.spawn("fetch", async {});

        // The first task was aborted, so its sender is dropped unsent.
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn abort_all_stops_everything() {
        let mut tasks = TaskManager::new();
        tasks.spawn("a", std::future::pending());
        tasks.spawn("b", std::future::pending());
        assert!(tasks.is_running("a"));

        tasks.abort_all();
        assert!(!tasks.is_running("a"));
        assert!(!tasks.is_running("b"));
    }
}
