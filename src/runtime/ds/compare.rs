//! Ordering used by every ordered collection.
//!
//! Values order first by type class (`Undefined` < `String` < numbers), then
//! within the class: strings byte-lexicographically, integers exactly, and any
//! comparison involving a real with a tolerance `ε`. Two numbers within `ε` of
//! each other are neither less nor greater, so they collapse to one map key.
//!
//! The tolerance makes "equal" non-transitive at cluster boundaries: with
//! `ε = 1`, `0.0 ≡ 0.9` and `0.9 ≡ 1.8` but `0.0 < 1.8`. Strict "less" is still
//! transitive, and collections built under one `ε` stay sorted under it.

use std::{
    cmp::Ordering,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};

use crate::runtime::{error::RuntimeError, value::Value};

pub const DEFAULT_EPSILON: f64 = 1e-7;

static EPSILON_BITS: AtomicU64 = AtomicU64::new(DEFAULT_EPSILON.to_bits());

/// Current process-wide comparison tolerance.
pub fn epsilon() -> f64 {
    f64::from_bits(EPSILON_BITS.load(AtomicOrdering::Relaxed))
}

/// Replaces the process-wide tolerance.
///
/// Collections that already hold keys are not re-sorted.
pub fn set_epsilon(value: f64) {
    let previous = f64::from_bits(EPSILON_BITS.swap(value.to_bits(), AtomicOrdering::Relaxed));
    tracing::debug!(previous, epsilon = value, "comparison epsilon changed");
}

/// Comparator bound to one tolerance for the duration of an operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DsComparator {
    epsilon: f64,
}

impl DsComparator {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Snapshot of the process-wide tolerance.
    pub fn current() -> Self {
        Self::new(epsilon())
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Rejects values that cannot be ordered.
    pub fn check_key(value: &Value) -> Result<(), RuntimeError> {
        match value {
            Value::Array(_) | Value::Handle(_) => Err(RuntimeError::UnsupportedKeyType {
                got: value.type_name(),
            }),
            _ => Ok(()),
        }
    }

    pub fn less(&self, a: &Value, b: &Value) -> Result<bool, RuntimeError> {
        Self::check_key(a)?;
        Self::check_key(b)?;

        let (ra, rb) = (rank(a), rank(b));
        if ra != rb {
            return Ok(ra < rb);
        }

        let eps = self.epsilon;
        Ok(match (a, b) {
            (Value::Integer(x), Value::Integer(y)) => x < y,
            (Value::Integer(x), Value::Real(y)) => (*x as f64) < y - eps,
            (Value::Real(x), Value::Integer(y)) => (*y as f64) > x + eps,
            (Value::Real(x), Value::Real(y)) => *x < y - eps,
            (Value::String(x), Value::String(y)) => x.as_bytes() < y.as_bytes(),
            _ => false,
        })
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, RuntimeError> {
        if self.less(a, b)? {
            Ok(Ordering::Less)
        } else if self.less(b, a)? {
            Ok(Ordering::Greater)
        } else {
            Ok(Ordering::Equal)
        }
    }

    /// Neither value orders before the other.
    pub fn equivalent(&self, a: &Value, b: &Value) -> Result<bool, RuntimeError> {
        Ok(self.compare(a, b)? == Ordering::Equal)
    }
}

impl Default for DsComparator {
    fn default() -> Self {
        Self::current()
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Undefined => 0,
        Value::String(_) => 1,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::gc::GcHeap;

    fn cmp() -> DsComparator {
        DsComparator::new(1e-7)
    }

    #[test]
    fn type_precedence() {
        let c = cmp();
        assert!(c.less(&Value::Undefined, &Value::from("")).unwrap());
        assert!(c.less(&Value::from("zzz"), &Value::Integer(-5)).unwrap());
        assert!(c.less(&Value::from("zzz"), &Value::Real(-5.0)).unwrap());
        assert!(!c.less(&Value::Integer(0), &Value::Undefined).unwrap());
        assert!(c.equivalent(&Value::Undefined, &Value::Undefined).unwrap());
    }

    #[test]
    fn integers_compare_exactly() {
        let c = DsComparator::new(10.0);
        assert!(c.less(&Value::Integer(1), &Value::Integer(2)).unwrap());
        assert_eq!(
            c.compare(&Value::Integer(5), &Value::Integer(5)).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn reals_within_epsilon_are_equivalent() {
        let c = DsComparator::new(1e-9);
        assert!(c
            .equivalent(&Value::Integer(3), &Value::Real(3.0000000001))
            .unwrap());
        assert!(c
            .equivalent(&Value::Real(3.0000000001), &Value::Integer(3))
            .unwrap());
        assert!(c.less(&Value::Integer(3), &Value::Real(3.1)).unwrap());
        assert!(c.less(&Value::Real(2.9), &Value::Integer(3)).unwrap());
        assert!(c.less(&Value::Real(1.0), &Value::Real(1.5)).unwrap());
    }

    #[test]
    fn strings_compare_bytewise() {
        let c = cmp();
        assert!(c.less(&Value::from("B"), &Value::from("a")).unwrap());
        assert!(c.less(&Value::from("ab"), &Value::from("abc")).unwrap());
        assert!(c
            .less(&Value::make_string(b"a\0b"), &Value::make_string(b"a\x01"))
            .unwrap());
    }

    #[test]
    fn arrays_and_handles_are_rejected() {
        let mut heap = GcHeap::new();
        let array = heap.make_array(vec![Value::Integer(1)]);
        assert_eq!(
            cmp().less(&array, &Value::Integer(1)),
            Err(RuntimeError::UnsupportedKeyType { got: "Array" })
        );
        assert_eq!(
            cmp().compare(&Value::Integer(1), &Value::Handle(2)),
            Err(RuntimeError::UnsupportedKeyType { got: "Handle" })
        );
    }

    #[test]
    fn equivalence_is_not_transitive_across_a_cluster() {
        let c = DsComparator::new(1.0);
        let (a, b, d) = (Value::Real(0.0), Value::Real(0.9), Value::Real(1.8));
        assert!(c.equivalent(&a, &b).unwrap());
        assert!(c.equivalent(&b, &d).unwrap());
        assert!(c.less(&a, &d).unwrap());
    }
}
