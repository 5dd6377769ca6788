//! # Completion Handle
//!
//! Caller-side token for one submitted task. The handle carries no payload: the
//! result travels through the listener and the service's result holder. Waiting
//! returns normally whether the task completed or failed.

use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

/// Waitable token for a single submitted task
#[derive(Debug, Clone, Default)]
pub struct CompletionHandle {
    task_id: Option<Uuid>,
    finished: Option<watch::Receiver<bool>>,
}

/// Signals the paired [`CompletionHandle`] when dropped or marked finished
#[derive(Debug)]
pub(crate) struct CompletionSignal {
    sender: watch::Sender<bool>,
}

impl CompletionSignal {
    pub(crate) fn finish(self) {
        // Receivers may all be gone; nobody is waiting then
        let _ = self.sender.send(true);
    }
}

impl CompletionHandle {
    pub(crate) fn pair(task_id: Uuid) -> (Self, CompletionSignal) {
        let (sender, receiver) = watch::channel(false);
        (
            Self {
                task_id: Some(task_id),
                finished: Some(receiver),
            },
            CompletionSignal { sender },
        )
    }

    /// Handle for a submission that never produced a task; waiting returns at once
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn task_id(&self) -> Option<Uuid> {
        self.task_id
    }

    /// Whether a task was actually submitted for this handle
    pub fn is_attached(&self) -> bool {
        self.finished.is_some()
    }

    /// True once the task reached a terminal state, or will never run
    pub fn is_finished(&self) -> bool {
        match &self.finished {
            None => true,
            Some(receiver) => *receiver.borrow() || receiver.has_changed().is_err(),
        }
    }

    /// Wait until the task finishes
    ///
    /// Safe to call repeatedly; later calls return immediately.
    pub async fn wait(&self) {
        let Some(receiver) = &self.finished else {
            return;
        };
        let mut receiver = receiver.clone();
        // Err means the signal was dropped without finishing: the task will never run
        let _ = receiver.wait_for(|finished| *finished).await;
    }

    /// Wait with an upper bound; returns `true` if the task finished in time
    pub async fn wait_timeout(&self, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.wait()).await.is_ok()
    }

    /// Block the current thread until the task finishes
    ///
    /// Intended for callers outside the async runtime. Calling this from a
    /// runtime worker thread stalls that worker.
    pub fn wait_blocking(&self) {
        futures::executor::block_on(self.wait());
    }
}
