use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use wordnote_engine::KeyLocks;

#[tokio::test]
async fn released_keys_are_forgotten() {
    let locks = KeyLocks::new();
    let first = locks.acquire("42").await;
    let second = locks.acquire("u1.42").await;
    assert_eq!(locks.tracked_keys().await, 2);

    drop(first);
    assert_eq!(locks.tracked_keys().await, 1);

    drop(second);
    assert_eq!(locks.tracked_keys().await, 0);
}

#[tokio::test]
async fn reacquiring_a_released_key_does_not_grow_the_table() {
    let locks = KeyLocks::new();
    for _ in 0..10 {
        drop(locks.acquire("42").await);
    }
    let _held = locks.acquire("7").await;
    assert_eq!(locks.tracked_keys().await, 1);
}

#[tokio::test]
async fn same_key_waits_for_the_holder() {
    let locks = Arc::new(KeyLocks::new());
    let held = locks.acquire("42").await;
    let entered = Arc::new(AtomicBool::new(false));

    let waiter = {
        let locks = Arc::clone(&locks);
        let entered = Arc::clone(&entered);
        tokio::spawn(async move {
            let _guard = locks.acquire("42").await;
            entered.store(true, Ordering::SeqCst);
        })
    };
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(!entered.load(Ordering::SeqCst));
    assert_eq!(locks.tracked_keys().await, 1);

    drop(held);
    waiter.await.unwrap();
    assert!(entered.load(Ordering::SeqCst));
    assert_eq!(locks.tracked_keys().await, 0);
}

#[tokio::test]
async fn other_keys_do_not_wait() {
    let locks = KeyLocks::new();
    let _held = locks.acquire("42").await;
    let _other = locks.acquire("43").await;
    assert_eq!(locks.tracked_keys().await, 2);
}
