//! # StoreState Trait
//!
//! The `StoreState` trait is the contract a state tree must satisfy to be owned by a
//! [`StoreActor`](crate::StoreActor). It pairs the state type with its closed set of
//! actions and the pure reducer that maps `(previous state, action)` to the next state.
//!
//! # Architecture Note
//! The store never mutates state in place. `reduce` borrows the current snapshot and
//! either returns a brand new value or reports that nothing changed. The actor wraps
//! every new value in a fresh `Arc`, so observers can tell "something changed" by
//! pointer identity alone. Memoized selectors (see [`crate::selector`]) depend on that.
//!
//! Large slices of the state should themselves live behind `Arc`s. A reducer that
//! touches one slice then clones the others cheaply, and their identity survives the
//! transition.

use std::fmt::Debug;

/// A state tree plus the pure mutation rules that drive it.
///
/// # Purity
/// Implementations must not perform I/O, panic on type-valid input, or read the
/// clock. Everything the reducer needs has to be carried by the action.
///
/// # Example
///
/// ```rust
/// use store_framework::StoreState;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter { value: i64 }
///
/// #[derive(Debug)]
/// enum CounterAction { Add(i64), Reset }
///
/// impl StoreState for Counter {
///     type Action = CounterAction;
///
///     fn reduce(&self, action: CounterAction) -> Option<Self> {
///         match action {
///             CounterAction::Add(0) => None,
///             CounterAction::Add(n) => Some(Self { value: self.value + n }),
///             CounterAction::Reset if self.value == 0 => None,
///             CounterAction::Reset => Some(Self::default()),
///         }
///     }
/// }
///
/// let next = Counter::default().reduce(CounterAction::Add(2)).unwrap();
/// assert_eq!(next.value, 2);
/// assert!(next.reduce(CounterAction::Add(0)).is_none());
/// ```
pub trait StoreState: Clone + Debug + Send + Sync + 'static {
    /// The closed set of requests that can mutate this state.
    type Action: Debug + Send + 'static;

    /// Applies exactly one mutation rule.
    ///
    /// Returns `None` when the action leaves the state unchanged. The store then keeps
    /// the previous snapshot reference and does not notify subscribers.
    fn reduce(&self, action: Self::Action) -> Option<Self>;
}
