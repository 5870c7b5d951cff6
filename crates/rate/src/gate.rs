//! Gate trait - unified interface over call-gating policies
//!
//! Philosophy:
//! - Composition > Inheritance
//! - One trait, many timing policies
//! - Callbacks stay synchronous; handlers spawn if they need async work

use async_trait::async_trait;
use std::sync::Arc;

/// Callback invoked when a gate lets a call through
pub type GateCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Gate trait - decides when buffered calls actually fire
///
/// A gate wraps one callback and a timing policy. Callers feed every
/// invocation through `call`; the gate fires the callback now, later,
/// or never, depending on the policy inside.
#[async_trait]
pub trait Gate<T: Send + 'static>: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Feed one call into the gate
    ///
    /// Called for EVERY invocation. Whether the wrapped callback fires
    /// is the gate's decision, not the caller's.
    async fn call(&self, input: T);

    /// Drop any scheduled fire without invoking the callback
    async fn cancel(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::{DebounceConfig, Debouncer};
    use crate::throttle::{ThrottleConfig, Throttler};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_gates_share_interface() {
        let fired = Arc::new(AtomicUsize::new(0));

        let debounce_fired = fired.clone();
        let throttle_fired = fired.clone();
        let gates: Vec<Box<dyn Gate<u32>>> = vec![
            Box::new(Debouncer::with_config(
                DebounceConfig {
                    wait: Duration::from_millis(100),
                    immediate: false,
                },
                Arc::new(move |_: u32| {
                    debounce_fired.fetch_add(1, Ordering::SeqCst);
                }),
            )),
            Box::new(Throttler::with_config(
                ThrottleConfig {
                    wait: Duration::from_millis(100),
                },
                Arc::new(move |_: u32| {
                    throttle_fired.fetch_add(1, Ordering::SeqCst);
                }),
            )),
        ];

        assert_eq!(gates[0].name(), "Debouncer");
        assert_eq!(gates[1].name(), "Throttler");

        for gate in &gates {
            gate.call(7).await;
        }

        // The throttler fires on the leading edge, the debouncer is still
        // waiting out its quiet period.
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        for gate in &gates {
            gate.cancel().await;
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
