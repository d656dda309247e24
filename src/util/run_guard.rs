use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lets at most one pipeline run be active at a time.
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    running: Arc<AtomicBool>,
}

/// Held for the lifetime of a run; dropping it frees the guard.
#[derive(Debug)]
pub struct RunToken {
    running: Arc<AtomicBool>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another run holds the guard.
    pub fn try_acquire(&self) -> Option<RunToken> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunToken {
                running: self.running.clone(),
            })
    }
}

impl Drop for RunToken {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
