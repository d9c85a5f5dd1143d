use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Owned once-per-second countdown. The ticker stops on its own when the
/// counter reaches zero and never goes negative. Dropping the handle cancels
/// the ticker, so replacing a session's countdown can never leave two of them
/// running.
pub struct Countdown {
    remaining: Arc<RwLock<u32>>,
    cancelled: Arc<AtomicBool>,
}

impl Countdown {
    pub fn start(duration_seconds: u32) -> Self {
        let remaining = Arc::new(RwLock::new(duration_seconds));
        let cancelled = Arc::new(AtomicBool::new(false));
        {
            let remaining = Arc::clone(&remaining);
            let cancelled = Arc::clone(&cancelled);
            thread::spawn(move || loop {
                thread::sleep(Duration::from_secs(1));
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                let mut seconds = remaining.write();
                if *seconds == 0 {
                    return;
                }
                *seconds -= 1;
                if *seconds == 0 {
                    return;
                }
            });
        }
        Countdown {
            remaining,
            cancelled,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        *self.remaining.read()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
