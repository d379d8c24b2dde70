//! Write protection for read-only attributes.
//!
//! A [`ReadOnlySet`] holds the keys a record forbids external code from
//! writing. Trusted internal paths (hydrating from storage, framework
//! bookkeeping) bypass the protection by entering an [`UnguardedScope`]:
//! while one is live on the current thread, every read-only check answers
//! false. The scope releases on drop, on every exit path including
//! panics, so the bypass can never leak into subsequent writes.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::marker::PhantomData;

thread_local! {
    static UNGUARDED_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Check whether the current thread is inside an unguarded scope.
pub fn is_unguarded() -> bool {
    UNGUARDED_DEPTH.with(|depth| depth.get() > 0)
}

/// RAII bypass of read-only protection for the current thread.
///
/// Scopes nest; protection is restored when the outermost scope drops.
///
/// # Example
///
/// ```rust
/// use veneer::guard::{unguarded, ReadOnlySet};
///
/// let guard = ReadOnlySet::new(["status".to_string()]);
///
/// assert!(guard.is_read_only("status"));
/// assert!(!unguarded(|| guard.is_read_only("status")));
/// assert!(guard.is_read_only("status"));
/// ```
pub struct UnguardedScope {
    // Tied to the thread whose counter it incremented.
    _not_send: PhantomData<*const ()>,
}

impl UnguardedScope {
    /// Enter an unguarded scope on the current thread.
    pub fn enter() -> Self {
        UNGUARDED_DEPTH.with(|depth| depth.set(depth.get() + 1));
        tracing::trace!("entered unguarded scope");
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for UnguardedScope {
    fn drop(&mut self) {
        UNGUARDED_DEPTH.with(|depth| depth.set(depth.get() - 1));
        tracing::trace!("left unguarded scope");
    }
}

/// Run a closure inside an unguarded scope.
pub fn unguarded<T>(f: impl FnOnce() -> T) -> T {
    let _scope = UnguardedScope::enter();
    f()
}

/// The set of attribute keys a record refuses to write while guarded.
#[derive(Debug, Default, Clone)]
pub struct ReadOnlySet {
    keys: BTreeSet<String>,
}

impl ReadOnlySet {
    /// Build the set from the schema's read-only keys.
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Membership test honoring the unguarded scope: always false while
    /// the current thread is unguarded.
    pub fn is_read_only(&self, key: &str) -> bool {
        !is_unguarded() && self.keys.contains(key)
    }

    /// Raw membership, regardless of the unguarded scope.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
