// crates/divisions-core/src/memo.rs
//! Result cache for pure functions over the immutable dataset.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

/// Wraps a pure `Fn(&A) -> V` and caches its results.
///
/// The cache key is the JSON serialization of the argument. Struct fields
/// serialize in declaration order, so keys are canonical as long as any map
/// inside `A` is a `BTreeMap`. The cache is unbounded and never invalidated:
/// only wrap functions whose result depends on nothing but their argument.
///
/// The lock is not held while `f` runs. Two threads racing on the same new
/// key may both compute it; both results are equal, and the first stored wins.
///
/// ```rust
/// use divisions_core::memo::memoize;
///
/// let square = memoize(|x: &u32| x * x);
/// assert_eq!(square.call(&4), 16);
/// assert_eq!(square.call(&4), 16);
/// assert_eq!(square.len(), 1);
/// ```
pub struct Memoized<A: ?Sized, V, F> {
    f: F,
    cache: MemoCache<V>,
    _arg: PhantomData<fn(&A)>,
}

/// Wrap `f` in a [`Memoized`] cache.
pub fn memoize<A, V, F>(f: F) -> Memoized<A, V, F>
where
    A: Serialize + ?Sized,
    V: Clone,
    F: Fn(&A) -> V,
{
    Memoized {
        f,
        cache: MemoCache::new(),
        _arg: PhantomData,
    }
}

impl<A, V, F> Memoized<A, V, F>
where
    A: Serialize + ?Sized,
    V: Clone,
    F: Fn(&A) -> V,
{
    pub fn call(&self, args: &A) -> V {
        self.cache.get_or_insert_with(args, || (self.f)(args))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<A: ?Sized, V, F> fmt::Debug for Memoized<A, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

/// The keyed storage behind [`Memoized`], usable on its own when the
/// computation needs context the argument does not carry (for example a
/// borrowed registry).
pub struct MemoCache<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V> Default for MemoCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> MemoCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, V>> {
        // `compute` never runs under the lock, so a poisoned map is still consistent
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<V: Clone> MemoCache<V> {
    /// Return the cached value for `args`, computing and storing it on a miss.
    pub fn get_or_insert_with<A, C>(&self, args: &A, compute: C) -> V
    where
        A: Serialize + ?Sized,
        C: FnOnce() -> V,
    {
        let key = match serde_json::to_string(args) {
            Ok(key) => key,
            Err(e) => {
                // unserializable arguments bypass the cache
                log::debug!("memo key serialization failed, calling through: {e}");
                return compute();
            }
        };

        if let Some(hit) = self.lock().get(&key) {
            return hit.clone();
        }

        let value = compute();
        self.lock().entry(key).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

impl<V> fmt::Debug for MemoCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("entries", &self.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn repeat_calls_compute_once() {
        let calls = AtomicUsize::new(0);
        let m = memoize(|x: &i64| {
            calls.fetch_add(1, Ordering::SeqCst);
            x * 2
        });
        assert_eq!(m.call(&21), 42);
        assert_eq!(m.call(&21), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(m.call(&1), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn transparent_to_the_wrapped_function() {
        let f = |s: &str| s.to_uppercase();
        let m = memoize(f);
        for s in ["", "hà nội", "abc"] {
            assert_eq!(m.call(s), f(s));
        }
    }

    #[test]
    fn structured_args_key_by_value() {
        #[derive(Serialize)]
        struct Args<'a> {
            level: usize,
            query: &'a str,
        }

        let calls = AtomicUsize::new(0);
        let m = memoize(|a: &Args<'_>| {
            calls.fetch_add(1, Ordering::SeqCst);
            format!("{}:{}", a.level, a.query)
        });
        m.call(&Args { level: 1, query: "ha" });
        m.call(&Args { level: 1, query: "ha" });
        m.call(&Args { level: 2, query: "ha" });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(m.len(), 2);
    }
}
