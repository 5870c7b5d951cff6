//! Dynamic value graphs with cycle-aware cloning.
//!
//! Reference-counted containers model the sharing semantics of a dynamic
//! runtime: assignment copies a handle, not the data underneath it.
//!
//! ## Philosophy
//!
//! - **Identity is data**: containers are `Rc` handles, so shared references
//!   and cycles are representable states, not errors
//! - **One numeric kind**: every number is an `f64`, no integer special case
//! - **Cycle safe by construction**: every traversal carries visited state
//!   instead of trusting the input to be a tree
//!
//! ## Core Design
//!
//! ```text
//! serde_json → Value (Rc graph) → deep_clone → independent Value
//!                   ↓
//!            ValueSerializer → "{\"self\": [Circular]}"
//! ```

pub mod clone;
pub mod convert;
pub mod eq;
pub mod error;
pub mod serializer;
pub mod types;
pub mod utils;

pub use clone::{deep_clone, deep_clone_with, IdentityMap};
pub use convert::{from_json, from_json_str, to_json, to_json_string};
pub use eq::structural_eq;
pub use error::{Result, ValueError};
pub use serializer::{SerializerConfig, ValueSerializer};
pub use types::*;
