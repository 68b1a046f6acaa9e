//! Single-slot task guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Holds at most one running task of a category.
///
/// [`TaskSlot::try_acquire`] either claims the slot or reports that a task
/// is already running; the slot frees itself when the returned guard drops.
#[derive(Debug, Clone, Default)]
pub struct TaskSlot {
    running: Arc<AtomicBool>,
}

/// Proof that the owning task holds its slot. Dropping it frees the slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct SlotGuard {
    running: Arc<AtomicBool>,
}

impl TaskSlot {
    /// Create an idle slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a task already holds it.
    pub fn try_acquire(&self) -> Option<SlotGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotGuard {
                running: Arc::clone(&self.running),
            })
    }

    /// Whether a task currently holds the slot.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
