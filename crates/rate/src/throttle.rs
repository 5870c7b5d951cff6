//! Throttler - spaces call bursts out to a fixed cadence
//!
//! At most one fire per window. The first call of an open window fires
//! immediately, one follow-up is held back until the window closes, and
//! everything else in between is dropped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::gate::{Gate, GateCallback};

/// Throttle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum spacing between two fires
    pub wait: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            wait: Duration::from_millis(100),
        }
    }
}

/// Fire bookkeeping shared with the trailing timer task
struct ThrottleState {
    timer: Option<tokio::task::JoinHandle<()>>,
    last_fire: Option<Instant>,
}

/// Throttler - at most one fire per wait window
pub struct Throttler<T> {
    /// Window length
    config: ThrottleConfig,

    /// Callback fired when the gate opens
    callback: GateCallback<T>,

    /// Last fire time and the scheduled trailing timer, if any
    state: Arc<Mutex<ThrottleState>>,
}

impl<T: Send + 'static> Throttler<T> {
    pub fn new(wait: Duration, callback: GateCallback<T>) -> Self {
        Self::with_config(ThrottleConfig { wait }, callback)
    }

    pub fn with_config(config: ThrottleConfig, callback: GateCallback<T>) -> Self {
        Self {
            config,
            callback,
            state: Arc::new(Mutex::new(ThrottleState {
                timer: None,
                last_fire: None,
            })),
        }
    }

    /// Feed one call into the throttler
    ///
    /// Fires immediately when the window is open. The first call inside
    /// a closed window is scheduled for the remainder of the window and
    /// keeps its own input; later calls in the same window are dropped.
    pub async fn call(&self, input: T) {
        let mut state = self.state.lock().await;

        let now = Instant::now();
        let remaining = match state.last_fire {
            None => Duration::ZERO,
            Some(prev) => self.config.wait.saturating_sub(now.duration_since(prev)),
        };

        if remaining.is_zero() {
            if let Some(task) = state.timer.take() {
                task.abort();
            }
            state.last_fire = Some(now);
            tracing::debug!("[Throttler] Window open, firing");
            (self.callback)(input);
        } else if state.timer.is_none() {
            tracing::debug!("[Throttler] Window closed, scheduling fire in {:?}", remaining);
            let shared = Arc::clone(&self.state);
            let callback = Arc::clone(&self.callback);
            state.timer = Some(tokio::spawn(async move {
                tokio::time::sleep(remaining).await;
                let mut state = shared.lock().await;
                state.timer = None;
                state.last_fire = Some(Instant::now());
                tracing::debug!("[Throttler] Window reopened, firing held call");
                callback(input);
            }));
        } else {
            tracing::debug!("[Throttler] Fire already scheduled, dropping call");
        }
    }

    /// Abort the scheduled trailing fire, if any
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        if let Some(task) = state.timer.take() {
            task.abort();
            tracing::debug!("[Throttler] Scheduled fire cancelled");
        }
    }

    /// Whether a trailing fire is currently scheduled
    pub async fn is_pending(&self) -> bool {
        self.state.lock().await.timer.is_some()
    }
}

#[async_trait]
impl<T: Send + 'static> Gate<T> for Throttler<T> {
    fn name(&self) -> &str {
        "Throttler"
    }

    async fn call(&self, input: T) {
        Throttler::call(self, input).await;
    }

    async fn cancel(&self) {
        Throttler::cancel(self).await;
    }
}
