//! Debouncer - collapses call bursts into a single fire
//!
//! A keystroke burst becomes one search request. The callback fires on
//! the trailing edge by default; leading-edge mode fires first and
//! silences the rest of the burst.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::gate::{Gate, GateCallback};

/// Debounce configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period a burst must respect before the callback fires
    pub wait: Duration,

    /// Fire on the leading edge instead of the trailing edge
    pub immediate: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait: Duration::from_millis(100),
            immediate: false,
        }
    }
}

/// Debouncer - fires once per burst of calls
pub struct Debouncer<T> {
    /// Quiet period and edge selection
    config: DebounceConfig,

    /// Callback fired when the gate opens
    callback: GateCallback<T>,

    /// Pending quiet-period timer
    timer: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Trailing-edge debouncer with the given quiet period
    pub fn new(wait: Duration, callback: GateCallback<T>) -> Self {
        Self::with_config(
            DebounceConfig {
                wait,
                immediate: false,
            },
            callback,
        )
    }

    pub fn with_config(config: DebounceConfig, callback: GateCallback<T>) -> Self {
        Self {
            config,
            callback,
            timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Feed one call into the debouncer
    ///
    /// Every call restarts the quiet-period timer. Only the timer that
    /// survives a full `wait` without a newer call opens the gate.
    pub async fn call(&self, input: T) {
        let mut timer = self.timer.lock().await;

        let fire_now = self.config.immediate && timer.is_none();

        if let Some(task) = timer.take() {
            task.abort();
            tracing::debug!("[Debouncer] Call during quiet period, timer reset");
        }

        let wait = self.config.wait;
        if self.config.immediate {
            // Leading mode: the timer only spans the quiet period, its
            // expiry fires nothing.
            let slot = Arc::clone(&self.timer);
            *timer = Some(tokio::spawn(async move {
                tokio::time::sleep(wait).await;
                slot.lock().await.take();
            }));

            if fire_now {
                tracing::debug!("[Debouncer] Leading edge, firing immediately");
                (self.callback)(input);
            }
        } else {
            // Trailing mode: the expiry fires the input that armed the
            // timer, which by then is the latest of the burst.
            let slot = Arc::clone(&self.timer);
            let callback = Arc::clone(&self.callback);
            *timer = Some(tokio::spawn(async move {
                tokio::time::sleep(wait).await;
                let mut slot = slot.lock().await;
                slot.take();
                tracing::debug!("[Debouncer] Quiet period over, firing");
                callback(input);
            }));
        }
    }

    /// Abort any pending timer without firing
    pub async fn cancel(&self) {
        if let Some(task) = self.timer.lock().await.take() {
            task.abort();
            tracing::debug!("[Debouncer] Pending call cancelled");
        }
    }

    /// Whether a quiet-period timer is currently armed
    pub async fn is_pending(&self) -> bool {
        self.timer.lock().await.is_some()
    }
}

#[async_trait]
impl<T: Send + 'static> Gate<T> for Debouncer<T> {
    fn name(&self) -> &str {
        "Debouncer"
    }

    async fn call(&self, input: T) {
        Debouncer::call(self, input).await;
    }

    async fn cancel(&self) {
        Debouncer::cancel(self).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    fn counting_callback(
        count: Arc<AtomicUsize>,
        latest: Arc<StdMutex<Option<u32>>>,
    ) -> GateCallback<u32> {
        Arc::new(move |n: u32| {
            count.fetch_add(1, Ordering::SeqCst);
            *latest.lock().unwrap() = Some(n);
        })
    }

    #[tokio::test]
    async fn test_trailing_fires_once_with_latest() {
        let count = Arc::new(AtomicUsize::new(0));
        let latest = Arc::new(StdMutex::new(None));
        let debouncer = Debouncer::new(
            Duration::from_millis(100),
            counting_callback(count.clone(), latest.clone()),
        );

        debouncer.call(1).await;
        debouncer.call(2).await;
        debouncer.call(3).await;

        assert!(debouncer.is_pending().await);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*latest.lock().unwrap(), Some(3));
        assert!(!debouncer.is_pending().await);
    }

    #[tokio::test]
    async fn test_timer_resets_on_each_call() {
        let count = Arc::new(AtomicUsize::new(0));
        let latest = Arc::new(StdMutex::new(None));
        let debouncer = Debouncer::new(
            Duration::from_millis(200),
            counting_callback(count.clone(), latest.clone()),
        );

        // Calls spaced inside the quiet period keep restarting the timer
        for n in 0..3u32 {
            debouncer.call(n).await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*latest.lock().unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_immediate_fires_leading_only() {
        let count = Arc::new(AtomicUsize::new(0));
        let latest = Arc::new(StdMutex::new(None));
        let debouncer = Debouncer::with_config(
            DebounceConfig {
                wait: Duration::from_millis(100),
                immediate: true,
            },
            counting_callback(count.clone(), latest.clone()),
        );

        debouncer.call(1).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*latest.lock().unwrap(), Some(1));

        // Calls during the quiet period neither fire nor queue a
        // trailing fire
        debouncer.call(2).await;
        debouncer.call(3).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Idle again, the next call is a fresh leading edge
        debouncer.call(4).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(*latest.lock().unwrap(), Some(4));
    }

    #[tokio::test]
    async fn test_cancel_drops_pending() {
        let count = Arc::new(AtomicUsize::new(0));
        let latest = Arc::new(StdMutex::new(None));
        let debouncer = Debouncer::new(
            Duration::from_millis(100),
            counting_callback(count.clone(), latest.clone()),
        );

        debouncer.call(1).await;
        assert!(debouncer.is_pending().await);

        debouncer.cancel().await;
        assert!(!debouncer.is_pending().await);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
