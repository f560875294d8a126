//! Deferred one-shot timers
//!
//! Each timer is a tokio sleep task that delivers a [`Deferred`] value to the
//! page's channel. Every handle is tracked so teardown can abort whatever has
//! not fired yet; dropping the set aborts everything as well.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Deferred work delivered back to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Re-run layout measurement after late content settles
    Remeasure,
    /// Attach hover handlers to interactive elements
    AttachHover,
    /// Start the intro animation
    Intro,
    /// Restore the copy button label; carries the timer that sent it
    RevertCopyLabel(TimerId),
}

/// Handle of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

pub struct DeferredTimers {
    tx: mpsc::UnboundedSender<Deferred>,
    next_id: u64,
    handles: HashMap<u64, JoinHandle<()>>,
}

impl DeferredTimers {
    /// Create a timer set and the receiver its timers deliver to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Deferred>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Self {
            tx,
            next_id: 1,
            handles: HashMap::new(),
        };
        (timers, rx)
    }

    /// Deliver `deferred` after `delay`
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, deferred: Deferred) -> TimerId {
        self.schedule_with(delay, |_| deferred)
    }

    /// Like [`DeferredTimers::schedule`], building the message from the timer's own id
    pub fn schedule_with(
        &mut self,
        delay: Duration,
        make: impl FnOnce(TimerId) -> Deferred,
    ) -> TimerId {
        self.prune();

        let id = self.next_id;
        self.next_id += 1;
        let deferred = make(TimerId(id));

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the page is gone
            let _ = tx.send(deferred);
        });
        self.handles.insert(id, handle);

        debug!(timer = id, ?deferred, delay_ms = delay.as_millis() as u64, "Timer scheduled");
        TimerId(id)
    }

    /// Abort a timer; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.handles.remove(&id.0) {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Abort every outstanding timer
    pub fn cancel_all(&mut self) {
        let count = self.handles.len();
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
        if count > 0 {
            debug!(count, "Timers cancelled");
        }
    }

    /// Number of timers that have not fired yet
    pub fn pending(&self) -> usize {
        self.handles.values().filter(|h| !h.is_finished()).count()
    }

    fn prune(&mut self) {
        self.handles.retain(|_, handle| !handle.is_finished());
    }
}

impl Drop for DeferredTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timers_fire_in_delay_order() {
        let (mut timers, mut rx) = DeferredTimers::new();
        timers.schedule(Duration::from_millis(500), Deferred::Intro);
        timers.schedule(Duration::from_millis(100), Deferred::Remeasure);

        assert_eq!(rx.recv().await, Some(Deferred::Remeasure));
        assert_eq!(rx.recv().await, Some(Deferred::Intro));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (mut timers, mut rx) = DeferredTimers::new();
        let id = timers.schedule(Duration::from_millis(100), Deferred::AttachHover);
        assert_eq!(timers.pending(), 1);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err(), "cancelled timer delivered {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let (mut timers, mut rx) = DeferredTimers::new();
        timers.schedule(Duration::from_millis(100), Deferred::Remeasure);
        timers.schedule(Duration::from_millis(500), Deferred::Remeasure);
        timers.schedule_with(Duration::from_millis(2000), Deferred::RevertCopyLabel);
        timers.cancel_all();
        assert_eq!(timers.pending(), 0);

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_with_tags_message() {
        let (mut timers, mut rx) = DeferredTimers::new();
        let id = timers.schedule_with(Duration::from_millis(100), Deferred::RevertCopyLabel);
        assert_eq!(rx.recv().await, Some(Deferred::RevertCopyLabel(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_and_closes_channel() {
        let (mut timers, mut rx) = DeferredTimers::new();
        timers.schedule(Duration::from_millis(100), Deferred::Intro);
        drop(timers);

        assert_eq!(rx.recv().await, None);
    }
}
