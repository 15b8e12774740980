//! Bounded background task dispatcher.
//!
//! A fixed pool of workers pulls tasks off a bounded FIFO queue. Submission
//! never waits for execution; once the queue is full or the runner has been
//! shut down, `enqueue` rejects and the caller decides what that means for
//! the job.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::RunnerError;

/// A unit of background work.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Fixed-size worker pool with a bounded admission queue.
pub struct JobRunner {
    tx: RwLock<Option<mpsc::Sender<Task>>>,
    capacity: usize,
    workers: Vec<JoinHandle<()>>,
}

impl JobRunner {
    /// Spawn `worker_count` workers sharing a queue of `queue_capacity`
    /// pending tasks. Both must be at least 1.
    pub fn new(worker_count: usize, queue_capacity: usize) -> Self {
        assert!(worker_count >= 1, "worker_count must be at least 1");
        assert!(queue_capacity >= 1, "queue_capacity must be at least 1");

        let (tx, rx) = mpsc::channel::<Task>(queue_capacity);
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..worker_count)
            .map(|index| {
                let rx = Arc::clone(&rx);
                tokio::spawn(worker_loop(index, rx))
            })
            .collect();

        Self {
            tx: RwLock::new(Some(tx)),
            capacity: queue_capacity,
            workers,
        }
    }

    /// Hand a task to the pool. Returns as soon as the task is queued.
    pub async fn enqueue(&self, task: Task) -> Result<(), RunnerError> {
        let tx = self.tx.read().await;
        let Some(tx) = tx.as_ref() else {
            return Err(RunnerError::ShutDown);
        };

        tx.try_send(task).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => RunnerError::QueueFull {
                capacity: self.capacity,
            },
            mpsc::error::TrySendError::Closed(_) => RunnerError::ShutDown,
        })
    }

    /// Close the queue. Queued tasks drain, workers then exit, and any
    /// further `enqueue` is rejected.
    pub async fn shutdown(&self) {
        let mut tx = self.tx.write().await;
        if tx.take().is_some() {
            debug!("Runner shut down");
        }
    }

    /// Number of workers in the pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

/// Pull tasks until the queue closes. Each task runs in its own spawned
/// task so a panic is confined to it and the worker keeps going.
async fn worker_loop(index: usize, rx: Arc<Mutex<mpsc::Receiver<Task>>>) {
    loop {
        // Lock only to receive, so other workers can pull while this
        // worker is executing.
        let task = { rx.lock().await.recv().await };
        let Some(task) = task else {
            break;
        };

        if let Err(e) = tokio::spawn(task).await {
            if e.is_panic() {
                warn!(worker = index, error = %e, "Task panicked");
            }
        }
    }
    debug!(worker = index, "Worker exiting");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    async fn wait_for(counter: &AtomicUsize, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while counter.load(Ordering::SeqCst) < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("tasks did not finish in time");
    }

    #[tokio::test]
    async fn executes_enqueued_tasks() {
        let runner = JobRunner::new(2, 16);
        let done = Arc::new(AtomicUsize::new(0));

        for _ in 0..8 {
            let done = Arc::clone(&done);
            runner
                .enqueue(Box::pin(async move {
                    done.fetch_add(1, Ordering::SeqCst);
                }))
                .await
                .unwrap();
        }

        wait_for(&done, 8).await;
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_worker_count() {
        let runner = JobRunner::new(2, 64);
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            let done = Arc::clone(&done);
            runner
                .enqueue(Box::pin(async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    done.fetch_add(1, Ordering::SeqCst);
                }))
                .await
                .unwrap();
        }

        wait_for(&done, 10).await;
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn panic_does_not_kill_workers() {
        let runner = JobRunner::new(1, 16);
        let done = Arc::new(AtomicUsize::new(0));

        runner
            .enqueue(Box::pin(async {
                panic!("task blew up");
            }))
            .await
            .unwrap();

        let done_clone = Arc::clone(&done);
        runner
            .enqueue(Box::pin(async move {
                done_clone.fetch_add(1, Ordering::SeqCst);
            }))
            .await
            .unwrap();

        // The worker survives the panic and runs the next task.
        wait_for(&done, 1).await;
    }

    #[tokio::test]
    async fn enqueue_after_shutdown_is_rejected() {
        let runner = JobRunner::new(1, 16);
        runner.shutdown().await;

        let err = runner.enqueue(Box::pin(async {})).await.unwrap_err();
        assert!(matches!(err, RunnerError::ShutDown));
    }

    #[tokio::test]
    async fn full_queue_is_rejected() {
        let runner = JobRunner::new(1, 1);

        // Park the single worker on a long task, then fill the queue.
        runner
            .enqueue(Box::pin(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }))
            .await
            .unwrap();

        // The queue only holds one pending task; keep enqueueing until the
        // worker has picked up the first task and the slot is taken.
        let mut rejected = false;
        for _ in 0..3 {
            if let Err(RunnerError::QueueFull { capacity }) = runner
                .enqueue(Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }))
                .await
            {
                assert_eq!(capacity, 1);
                rejected = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(rejected);
    }
}
