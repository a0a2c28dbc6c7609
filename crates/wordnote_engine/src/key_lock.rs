use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = HashMap<String, Arc<Mutex<()>>>;

/// One async mutex per key. Holding the guard serializes every other
/// `acquire` for the same key; different keys never block each other.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<LockTable>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            forget_idle(&mut locks);
            Arc::clone(
                locks
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Keys currently held or waited on.
    pub async fn tracked_keys(&self) -> usize {
        let mut locks = self.locks.lock().await;
        forget_idle(&mut locks);
        locks.len()
    }
}

// The table's own `Arc` is the only reference left once every guard and
// waiter is gone.
fn forget_idle(locks: &mut LockTable) {
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
}
