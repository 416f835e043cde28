//! Guard predicates for automatic transitions.
//!
//! Guards are pure boolean functions over whatever the machine decides on.
//! The timer machine guards its eventless transitions on the context.

/// Pure predicate that decides whether a transition may be taken.
///
/// # Example
///
/// ```rust
/// use ticktock::core::Guard;
///
/// let positive = Guard::new(|n: &i64| *n > 0);
///
/// assert!(positive.check(&3));
/// assert!(!positive.check(&-1));
/// ```
pub struct Guard<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against a value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> std::fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
