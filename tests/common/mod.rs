//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use crossbeam_channel::bounded;
use std::thread;
use std::time::Duration;

/// Upper bound for any single sieve run in these tests
pub fn test_timeout() -> Duration {
    Duration::from_secs(30)
}

/// First `count` primes by plain trial division
pub fn reference_primes(count: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut candidate = 2u64;
    while primes.len() < count {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

/// Run `f` on a helper thread and fail the test if it does not finish in time.
///
/// A deadlocked pipeline would otherwise hang the test binary forever.
pub fn within_timeout<T, F>(timeout: Duration, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(timeout)
        .unwrap_or_else(|_| panic!("sieve did not finish within {:?}", timeout))
}
