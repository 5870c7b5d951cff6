//! Structural deep clone with cycle detection
//!
//! The cloner walks a value graph and produces a fully independent copy:
//! same shape, same primitive leaves, no shared container identity with
//! the source. An identity map keyed by container address makes cycles and
//! shared substructure come out right without any special casing:
//!
//! ```text
//! source graph ──walk──▶ clone graph
//!       │                    ▲
//!       └── IdentityMap ─────┘
//!           (addr → clone, registered before populating)
//! ```
//!
//! Registration happens before a container's contents are populated. A
//! cycle reached while populating therefore resolves to the already
//! created (possibly still empty) clone instead of recursing again. That
//! ordering is load-bearing; everything else falls out of it.

use ahash::AHashMap;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{MapHandle, SeqHandle, Value};

/// Identity map: original container identity → already-produced clone
///
/// Keyed by allocation address, never by value equality, so two
/// structurally equal but distinct containers stay distinct in the output.
/// Scoped to one top-level clone unless the caller deliberately shares one
/// across calls to make several outputs share clones of shared inputs.
pub struct IdentityMap {
    /// Address of a source container → its clone
    clones: AHashMap<usize, Value>,

    /// Handles to the source containers. Keeps every keyed allocation
    /// alive, so an address can never be reused while its entry exists.
    pins: Vec<Value>,
}

impl IdentityMap {
    /// Create a new empty identity map
    pub fn new() -> Self {
        Self {
            clones: AHashMap::new(),
            pins: Vec::new(),
        }
    }

    /// Create an identity map with capacity for a known graph size
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            clones: AHashMap::with_capacity(capacity),
            pins: Vec::with_capacity(capacity),
        }
    }

    /// Look up the clone already produced for this container, if any
    ///
    /// Primitives have no identity and never have an entry.
    pub fn get(&self, original: &Value) -> Option<Value> {
        let addr = original.container_addr()?;
        self.clones.get(&addr).cloned()
    }

    fn register(&mut self, original: &Value, clone: &Value) {
        if let Some(addr) = original.container_addr() {
            self.pins.push(original.clone());
            self.clones.insert(addr, clone.clone());
        }
    }

    /// Number of containers registered so far
    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    /// Drop all entries, including the source handles pinning them
    pub fn clear(&mut self) {
        self.clones.clear();
        self.pins.clear();
    }
}

impl Default for IdentityMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep clone a value graph
///
/// Primitives come back unchanged. Containers come back as new
/// allocations with recursively cloned contents; cycles and shared
/// substructure in the source are reproduced faithfully in the output.
///
/// Recursion depth is bounded by the longest acyclic path in the graph.
/// Pathologically deep non-cyclic structures exhaust the call stack; that
/// bound is the caller's to manage, not checked here.
///
/// ```
/// use value::{deep_clone, Value};
///
/// let graph = Value::new_map();
/// graph.insert("self", graph.clone()).unwrap();
///
/// let copy = deep_clone(&graph);
/// assert!(!copy.ptr_eq(&graph));
/// assert!(copy.get("self").unwrap().ptr_eq(&copy));
/// ```
pub fn deep_clone(value: &Value) -> Value {
    let mut seen = IdentityMap::new();
    deep_clone_with(value, &mut seen)
}

/// Deep clone through a caller-owned identity map
///
/// Passing the same map to several calls makes their outputs share the
/// clones of any containers the inputs share.
pub fn deep_clone_with(value: &Value, seen: &mut IdentityMap) -> Value {
    match value {
        // Primitives have no mutable identity to protect: hand the same
        // value back (for Str this shares the text allocation).
        Value::Null | Value::Undefined | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {
            value.clone()
        }
        Value::Seq(cell) => {
            if let Some(existing) = seen.get(value) {
                return existing;
            }
            let items: SeqHandle = Rc::new(RefCell::new(Vec::with_capacity(cell.borrow().len())));
            let clone = Value::Seq(Rc::clone(&items));
            // Register before populating: a cycle reached below must
            // resolve to this still-empty container, not recurse again.
            seen.register(value, &clone);
            for item in cell.borrow().iter() {
                let cloned = deep_clone_with(item, seen);
                items.borrow_mut().push(cloned);
            }
            clone
        }
        Value::Map(cell) => {
            if let Some(existing) = seen.get(value) {
                return existing;
            }
            let entries: MapHandle =
                Rc::new(RefCell::new(IndexMap::with_capacity(cell.borrow().len())));
            let clone = Value::Map(Rc::clone(&entries));
            seen.register(value, &clone);
            for (key, item) in cell.borrow().iter() {
                let cloned = deep_clone_with(item, seen);
                entries.borrow_mut().insert(key.clone(), cloned);
            }
            clone
        }
    }
}

impl Value {
    /// Method form of [`deep_clone`]
    pub fn deep_clone(&self) -> Value {
        deep_clone(self)
    }
}
