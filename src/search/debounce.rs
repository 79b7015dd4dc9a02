//! Latest-wins debouncing for recomputation.
//!
//! Each `schedule` call bumps a generation counter, aborts the pending task
//! and starts a new one that sleeps for the quiet period. A task commits its
//! result only if its generation is still the latest when it finishes.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// A committed result tagged with the input generation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub generation: u64,
    pub value: T,
}

pub type CommitReceiver<T> = watch::Receiver<Option<Committed<T>>>;

pub struct Debouncer<T> {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<Option<Committed<T>>>,
}

impl<T: Send + Sync + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { delay, generation: Arc::new(AtomicU64::new(0)), pending: None, tx }
    }

    /// Receives every committed result.
    pub fn subscribe(&self) -> CommitReceiver<T> {
        self.tx.subscribe()
    }

    /// Latest scheduled generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Supersedes any pending work and schedules `work` after the quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&mut self, work: F) -> u64
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_pending();

        let latest = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            let value = work().await;

            if latest.load(Ordering::SeqCst) == generation {
                tx.send_replace(Some(Committed { generation, value }));
            } else {
                debug!("Dropping stale result for generation {}", generation);
            }
        }));

        generation
    }

    /// Cancels pending work without scheduling anything new.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();
    }

    /// Returns true while a scheduled task has not finished.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling superseded debounce task");
            }
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_inputs_collapse_to_last() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let mut rx = debouncer.subscribe();

        for input in ["r", "re", "red"] {
            let runs = Arc::clone(&runs);
            debouncer.schedule(move || async move {
                runs.fetch_add(1, Ordering::SeqCst);
                input.to_string()
            });
            tokio::time::advance(Duration::from_millis(50)).await;
        }

        rx.changed().await.unwrap();
        let committed = rx.borrow().clone().unwrap();
        assert_eq!(committed.value, "red");
        assert_eq!(committed.generation, 3);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_period_commits_each_input() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        let mut rx = debouncer.subscribe();

        debouncer.schedule(|| async { 1 });
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|c| c.value), Some(1));

        debouncer.schedule(|| async { 2 });
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|c| c.value), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_commits_before_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let rx = debouncer.subscribe();

        debouncer.schedule(|| async { "x" });
        tokio::time::advance(Duration::from_millis(299)).await;
        tokio::task::yield_now().await;
        assert!(rx.borrow().is_none());
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let rx = debouncer.subscribe();

        debouncer.schedule(|| async { 7 });
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(rx.borrow().is_none());
        assert_eq!(debouncer.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_work_superseded_mid_flight() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        let mut rx = debouncer.subscribe();

        debouncer.schedule(|| async {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            "slow"
        });
        tokio::time::advance(Duration::from_millis(20)).await;
        debouncer.schedule(|| async { "fast" });

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|c| c.value), Some("fast"));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(rx.borrow().as_ref().map(|c| c.value), Some("fast"));
    }
}
