//! Rate Gating - Debounce and Throttle Primitives
//!
//! Timer-based call gates for bursty call sites: collapse a burst into one
//! fire, or space fires out to a fixed cadence.
//!
//! # Architecture Philosophy
//!
//! 1. **One lock per gate**: all timing state lives behind a single mutex,
//!    so call ordering is never a data race
//! 2. **Tasks are timers**: a pending fire is a spawned task; aborting the
//!    task is the cancellation, no flags to keep in sync
//! 3. **Synchronous callbacks**: gates fire plain `Fn(T)` callbacks and
//!    handlers spawn their own tasks when they need async work

pub mod debounce;
pub mod gate;
pub mod throttle;

pub use debounce::{DebounceConfig, Debouncer};
pub use gate::{Gate, GateCallback};
pub use throttle::{ThrottleConfig, Throttler};
