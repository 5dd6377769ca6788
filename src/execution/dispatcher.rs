//! # Request Dispatcher
//!
//! Bounded worker pool for analysis round-trips.
//!
//! ```text
//! submit() → [unbounded FIFO queue] → run loop → [Semaphore: N permits] → tokio::spawn(task)
//!                                                        │                      │
//!                                                        └─ N in flight         └─ permit released,
//!                                                                                  handle signalled
//! ```
//!
//! The run loop acquires a permit before spawning, so tasks start in submission
//! order. A panic inside a task is caught at the worker boundary; the permit is
//! released and the pool stays usable.

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::completion::{CompletionHandle, CompletionSignal};
use crate::error::{AnalystError, AnalystResult};

struct QueuedTask {
    task_id: Uuid,
    work: BoxFuture<'static, ()>,
    signal: CompletionSignal,
}

/// Point-in-time pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherUsage {
    pub in_flight: usize,
    pub max_concurrent: usize,
    pub queued: usize,
}

/// Fixed-size pool running submitted tasks with bounded parallelism
pub struct Dispatcher {
    dispatcher_id: String,
    intake: Mutex<Option<mpsc::UnboundedSender<QueuedTask>>>,
    run_loop: Mutex<Option<JoinHandle<()>>>,
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
    queued: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("dispatcher_id", &self.dispatcher_id)
            .field("max_concurrent", &self.max_concurrent)
            .field("accepting", &self.is_accepting())
            .finish()
    }
}

impl Dispatcher {
    /// Start a dispatcher on the ambient Tokio runtime
    pub fn new(dispatcher_id: impl Into<String>, max_concurrent: usize) -> AnalystResult<Self> {
        let runtime = Handle::try_current().map_err(|e| AnalystError::Runtime(e.to_string()))?;
        Self::with_runtime(&runtime, dispatcher_id, max_concurrent)
    }

    /// Start a dispatcher on an explicit runtime handle
    pub fn with_runtime(
        runtime: &Handle,
        dispatcher_id: impl Into<String>,
        max_concurrent: usize,
    ) -> AnalystResult<Self> {
        if max_concurrent == 0 {
            return Err(AnalystError::config_error(
                "dispatcher needs at least one worker slot",
            ));
        }

        let dispatcher_id = dispatcher_id.into();
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let queued = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let (sender, receiver) = mpsc::unbounded_channel();

        let run_loop = runtime.spawn(Self::run(
            receiver,
            semaphore.clone(),
            queued.clone(),
            in_flight.clone(),
            dispatcher_id.clone(),
        ));

        info!(
            dispatcher_id = %dispatcher_id,
            max_concurrent = max_concurrent,
            "Dispatcher started"
        );

        Ok(Self {
            dispatcher_id,
            intake: Mutex::new(Some(sender)),
            run_loop: Mutex::new(Some(run_loop)),
            semaphore,
            max_concurrent,
            queued,
            in_flight,
        })
    }

    /// Enqueue a task; never waits for a worker slot
    ///
    /// After [`shutdown`](Self::shutdown) the task is dropped unrun and a
    /// detached handle is returned.
    pub fn submit<F>(&self, task_id: Uuid, work: F) -> CompletionHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let intake = self.intake.lock();
        let Some(sender) = intake.as_ref() else {
            warn!(
                dispatcher_id = %self.dispatcher_id,
                task_id = %task_id,
                "Dispatcher is shut down; dropping submitted task"
            );
            return CompletionHandle::detached();
        };

        let (handle, signal) = CompletionHandle::pair(task_id);
        self.queued.fetch_add(1, Ordering::SeqCst);
        let queued_task = QueuedTask {
            task_id,
            work: work.boxed(),
            signal,
        };

        if sender.send(queued_task).is_err() {
            self.queued.fetch_sub(1, Ordering::SeqCst);
            error!(
                dispatcher_id = %self.dispatcher_id,
                task_id = %task_id,
                "Dispatcher run loop has stopped; task dropped"
            );
            return CompletionHandle::detached();
        }

        debug!(
            dispatcher_id = %self.dispatcher_id,
            task_id = %task_id,
            "Task queued"
        );
        handle
    }

    pub fn usage(&self) -> DispatcherUsage {
        DispatcherUsage {
            in_flight: self.in_flight.load(Ordering::SeqCst),
            max_concurrent: self.max_concurrent,
            queued: self.queued.load(Ordering::SeqCst),
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.intake.lock().is_some()
    }

    pub fn dispatcher_id(&self) -> &str {
        &self.dispatcher_id
    }

    /// Stop intake, run everything already queued, wait for in-flight tasks, close the pool
    pub async fn shutdown(&self) {
        // Dropping the sender lets the run loop exit once the queue is drained
        drop(self.intake.lock().take());

        let run_loop = self.run_loop.lock().take();
        if let Some(run_loop) = run_loop {
            if let Err(e) = run_loop.await {
                error!(
                    dispatcher_id = %self.dispatcher_id,
                    error = %e,
                    "Dispatcher run loop terminated abnormally"
                );
            }
        }

        // Holding every permit means nothing is in flight
        let slots = u32::try_from(self.max_concurrent).unwrap_or(u32::MAX);
        match self.semaphore.acquire_many(slots).await {
            Ok(permits) => {
                permits.forget();
                self.semaphore.close();
            }
            Err(_) => debug!(
                dispatcher_id = %self.dispatcher_id,
                "Dispatcher pool already closed"
            ),
        }

        info!(dispatcher_id = %self.dispatcher_id, "Dispatcher shut down");
    }

    async fn run(
        mut receiver: mpsc::UnboundedReceiver<QueuedTask>,
        semaphore: Arc<Semaphore>,
        queued: Arc<AtomicUsize>,
        in_flight: Arc<AtomicUsize>,
        dispatcher_id: String,
    ) {
        while let Some(task) = receiver.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    queued.fetch_sub(1, Ordering::SeqCst);
                    error!(
                        dispatcher_id = %dispatcher_id,
                        task_id = %task.task_id,
                        "Worker pool closed - task dropped"
                    );
                    continue;
                }
            };
            queued.fetch_sub(1, Ordering::SeqCst);
            in_flight.fetch_add(1, Ordering::SeqCst);

            let in_flight = in_flight.clone();
            let dispatcher_id = dispatcher_id.clone();
            tokio::spawn(async move {
                let QueuedTask {
                    task_id,
                    work,
                    signal,
                } = task;

                debug!(
                    dispatcher_id = %dispatcher_id,
                    task_id = %task_id,
                    "Acquired worker slot, executing task"
                );

                if let Err(panic) = AssertUnwindSafe(work).catch_unwind().await {
                    let panic_msg = panic_message(&*panic);
                    error!(
                        dispatcher_id = %dispatcher_id,
                        task_id = %task_id,
                        panic_msg = %panic_msg,
                        "Task panicked; worker slot recovered"
                    );
                }

                in_flight.fetch_sub(1, Ordering::SeqCst);
                drop(permit);
                signal.finish();
            });
        }

        debug!(dispatcher_id = %dispatcher_id, "Dispatcher queue closed and drained");
    }
}

/// Best-effort text of a caught panic payload
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
