//! Per-key mutual exclusion via DashMap.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;

/// One mutex per key, created on first use.
///
/// Two callers holding the same key are serialized; different keys never
/// contend beyond the map's shard lock.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    pub fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        // Clone the Arc out so the shard lock is released before blocking.
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let result = {
            // The protected value is `()`, so a poisoned lock carries no bad state.
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            f()
        };
        drop(lock);

        // Only the map's own Arc left means nobody holds or waits on this key.
        // Waiters clone the Arc under the shard lock, so they are never missed.
        self.locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Drop entries nobody holds or waits on. Held entries are kept, so a
    /// later caller for the same key still queues behind the holder.
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn same_key_is_serialized() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (locks, inside, max_seen) = (locks.clone(), inside.clone(), max_seen.clone());
                thread::spawn(move || {
                    locks.with_lock("+56911111111", || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(2));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn idle_keys_are_released() {
        let locks = KeyedLocks::new();
        locks.with_lock("a", || ());
        locks.with_lock("b", || ());
        assert!(locks.is_empty());
    }

    #[test]
    fn prune_keeps_held_keys_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let held = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));

        let enter = |inside: &AtomicUsize, max_seen: &AtomicUsize| {
            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
            max_seen.fetch_max(now, Ordering::SeqCst);
        };

        let holder = {
            let (locks, inside, max_seen) = (locks.clone(), inside.clone(), max_seen.clone());
            let (held, release) = (held.clone(), release.clone());
            thread::spawn(move || {
                locks.with_lock("+56961234567", || {
                    enter(&inside, &max_seen);
                    held.wait();
                    release.wait();
                    thread::sleep(std::time::Duration::from_millis(20));
                    inside.fetch_sub(1, Ordering::SeqCst);
                });
            })
        };

        held.wait();
        locks.prune();
        assert_eq!(locks.len(), 1);

        let contender = {
            let (locks, inside, max_seen) = (locks.clone(), inside.clone(), max_seen.clone());
            thread::spawn(move || {
                locks.with_lock("+56961234567", || {
                    enter(&inside, &max_seen);
                    inside.fetch_sub(1, Ordering::SeqCst);
                });
            })
        };
        release.wait();

        holder.join().unwrap();
        contender.join().unwrap();
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn prune_drops_idle_keys() {
        let locks = KeyedLocks::new();
        // An entry whose only reference is the map's own.
        locks
            .locks
            .insert("stale".to_string(), Arc::new(Mutex::new(())));
        assert_eq!(locks.len(), 1);
        locks.prune();
        assert!(locks.is_empty());
    }
}
