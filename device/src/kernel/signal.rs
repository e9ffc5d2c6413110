use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A one-way stop flag that sleepers can wait on.
///
/// Clones share the same flag. Once signalled it stays signalled.
#[derive(Clone, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    stopped: Mutex<bool>,
    condvar: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        *self.lock() = true;
        self.inner.condvar.notify_all();
    }

    pub fn is_signaled(&self) -> bool {
        *self.lock()
    }

    /// Sleeps for `timeout` unless signalled first. Returns true if the
    /// signal was raised before or during the wait.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut stopped = self.lock();
        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            stopped = match self.inner.condvar.wait_timeout(stopped, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        *stopped
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        // the flag is a plain bool, a panicking holder cannot corrupt it
        self.inner
            .stopped
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn times_out_when_not_signaled() {
        let stop = StopSignal::new();
        let before = Instant::now();
        assert!(!stop.wait_timeout(Duration::from_millis(20)));
        assert!(before.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn wakes_early_when_signaled() {
        let stop = StopSignal::new();
        let remote = stop.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            remote.signal();
        });
        let before = Instant::now();
        assert!(stop.wait_timeout(Duration::from_secs(30)));
        assert!(before.elapsed() < Duration::from_secs(30));
        handle.join().unwrap();
    }

    #[test]
    fn stays_signaled() {
        let stop = StopSignal::new();
        stop.signal();
        assert!(stop.is_signaled());
        assert!(stop.wait_timeout(Duration::from_secs(30)));
    }
}
