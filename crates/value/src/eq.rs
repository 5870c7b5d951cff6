//! Cycle-safe structural equality
//!
//! A derived `PartialEq` would recurse forever on self-referential graphs,
//! so equality is a hand-written walk with a visited-pair set: container
//! pairs already under comparison are assumed equal (if they turn out not
//! to be, the mismatch surfaces through some other path and the whole
//! comparison is false anyway).

use ahash::AHashSet;
use std::rc::Rc;

use crate::types::Value;

/// Structural equality over possibly-cyclic graphs
///
/// Two values are equal when their reachable shapes and primitive leaves
/// match. Sequence order matters; mapping insertion order does not. NaN
/// compares equal to NaN, so a clone of a graph holding NaN still equals
/// its source. Identical container handles short-circuit to true.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    eq_walk(a, b, &mut AHashSet::new())
}

fn eq_walk(a: &Value, b: &Value, in_progress: &mut AHashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Seq(x), Value::Seq(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let pair = (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize);
            if !in_progress.insert(pair) {
                return true;
            }
            let xs = x.borrow();
            let ys = y.borrow();
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(xi, yi)| eq_walk(xi, yi, in_progress))
        }
        (Value::Map(x), Value::Map(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let pair = (Rc::as_ptr(x) as usize, Rc::as_ptr(y) as usize);
            if !in_progress.insert(pair) {
                return true;
            }
            let xs = x.borrow();
            let ys = y.borrow();
            xs.len() == ys.len()
                && xs.iter().all(|(key, xv)| match ys.get(key) {
                    Some(yv) => eq_walk(xv, yv, in_progress),
                    None => false,
                })
        }
        _ => false,
    }
}

impl PartialEq for Value {
    /// Structural, cycle-safe equality; see [`structural_eq`]
    fn eq(&self, other: &Self) -> bool {
        structural_eq(self, other)
    }
}
