//! # Memoized Selectors
//!
//! Derived values are computed from snapshots on demand, never stored in the state.
//! A [`Memoized`] cache remembers exactly one `(key, output)` pair and recomputes only
//! when the key differs from the previous one. [`Selector`] adds the step that pulls
//! the key out of a snapshot.
//!
//! ## Keys
//!
//! How two keys compare is decided by [`MemoKey`]:
//! - `Arc<T>` compares by pointer identity. That is the common case: a reducer that
//!   leaves a slice alone keeps its `Arc`, so the selector hits its cache.
//! - [`ByValue<T>`] compares with `PartialEq`, for small parameters that live outside
//!   the state (a search term, a sort order).
//! - Pairs combine both.
//!
//! ```rust
//! use std::sync::Arc;
//! use store_framework::selector::Selector;
//!
//! #[derive(Debug)]
//! struct Snapshot { items: Arc<Vec<u32>>, flag: bool }
//!
//! fn items(s: &Snapshot) -> Arc<Vec<u32>> {
//!     Arc::clone(&s.items)
//! }
//!
//! let total = Selector::new("total", items, |items: &Arc<Vec<u32>>| items.iter().sum::<u32>());
//!
//! let items = Arc::new(vec![1, 2, 3]);
//! let a = Snapshot { items: Arc::clone(&items), flag: false };
//! let b = Snapshot { items, flag: true };
//!
//! assert_eq!(total.select(&a), 6);
//! assert_eq!(total.select(&b), 6);
//! assert_eq!(total.recomputations(), 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Equality notion used to decide whether a cached output is still valid.
pub trait MemoKey: Clone + Send + Sync + 'static {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized + Send + Sync + 'static> MemoKey for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<A: MemoKey, B: MemoKey> MemoKey for (A, B) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

/// Wraps a plain value so it is compared with `PartialEq` instead of by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByValue<T>(pub T);

impl<T: Clone + PartialEq + Send + Sync + 'static> MemoKey for ByValue<T> {
    fn same(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

type Compute<K, O> = Box<dyn Fn(&K) -> O + Send + Sync>;

/// Single-slot memoization of `compute(key)`.
///
/// The slot holds the most recent key and output, nothing more, so memory use does
/// not grow with the number of distinct inputs seen.
pub struct Memoized<K, O> {
    name: &'static str,
    compute: Compute<K, O>,
    slot: Mutex<Option<(K, O)>>,
    recomputations: AtomicUsize,
}

impl<K: MemoKey, O: Clone> Memoized<K, O> {
    pub fn new(name: &'static str, compute: impl Fn(&K) -> O + Send + Sync + 'static) -> Self {
        Self {
            name,
            compute: Box::new(compute),
            slot: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Returns the cached output if `key` is the same as last time, else recomputes.
    pub fn get(&self, key: K) -> O {
        // A panic inside `compute` leaves the slot as it was, so the data is still sound.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached, output)) = slot.as_ref() {
            if cached.same(&key) {
                trace!(selector = self.name, "Cache hit");
                return output.clone();
            }
        }

        let output = (self.compute)(&key);
        let count = self.recomputations.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(selector = self.name, recomputations = count, "Recomputed");
        *slot = Some((key, output.clone()));
        output
    }

    /// How many times the output has been computed since creation.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Forgets the cached pair. The counter is left untouched.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<K, O> fmt::Debug for Memoized<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("name", &self.name)
            .field("recomputations", &self.recomputations.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A memoized derivation over a whole snapshot type `S`.
///
/// `input` picks the slice the output depends on; only that slice decides whether the
/// cache is reused.
pub struct Selector<S, K, O> {
    input: fn(&S) -> K,
    memo: Memoized<K, O>,
}

impl<S, K: MemoKey, O: Clone> Selector<S, K, O> {
    pub fn new(
        name: &'static str,
        input: fn(&S) -> K,
        compute: impl Fn(&K) -> O + Send + Sync + 'static,
    ) -> Self {
        Self {
            input,
            memo: Memoized::new(name, compute),
        }
    }

    pub fn select(&self, state: &S) -> O {
        self.memo.get((self.input)(state))
    }

    pub fn recomputations(&self) -> usize {
        self.memo.recomputations()
    }
}

impl<S, K, O> fmt::Debug for Selector<S, K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector").field("memo", &self.memo).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_arc_hits_cache() {
        let memo = Memoized::new("len", |v: &Arc<Vec<u8>>| v.len());
        let data = Arc::new(vec![1, 2, 3]);

        assert_eq!(memo.get(Arc::clone(&data)), 3);
        assert_eq!(memo.get(Arc::clone(&data)), 3);
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn test_equal_but_distinct_arc_recomputes() {
        let memo = Memoized::new("len", |v: &Arc<Vec<u8>>| v.len());

        memo.get(Arc::new(vec![1]));
        memo.get(Arc::new(vec![1]));
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn test_single_slot_replaces_previous_pair() {
        let memo = Memoized::new("len", |v: &Arc<Vec<u8>>| v.len());
        let first = Arc::new(vec![1]);
        let second = Arc::new(vec![1, 2]);

        memo.get(Arc::clone(&first));
        memo.get(Arc::clone(&second));
        // The first key was evicted, so asking again recomputes.
        memo.get(Arc::clone(&first));
        assert_eq!(memo.recomputations(), 3);
        // Only the cache holds the extra reference to `first`.
        assert_eq!(Arc::strong_count(&first), 2);
        assert_eq!(Arc::strong_count(&second), 1);
    }

    #[test]
    fn test_by_value_and_pair_keys() {
        let memo = Memoized::new("filter", |(items, min): &(Arc<Vec<u32>>, ByValue<u32>)| {
            items.iter().filter(|n| **n >= min.0).count()
        });
        let items = Arc::new(vec![1, 5, 10]);

        assert_eq!(memo.get((Arc::clone(&items), ByValue(5))), 2);
        assert_eq!(memo.get((Arc::clone(&items), ByValue(5))), 2);
        assert_eq!(memo.get((Arc::clone(&items), ByValue(2))), 2);
        assert_eq!(memo.get((Arc::clone(&items), ByValue(11))), 0);
        assert_eq!(memo.recomputations(), 3);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let memo = Memoized::new("len", |v: &Arc<Vec<u8>>| v.len());
        let data = Arc::new(vec![]);

        memo.get(Arc::clone(&data));
        memo.clear();
        memo.get(data);
        assert_eq!(memo.recomputations(), 2);
    }
}
