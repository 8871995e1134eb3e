use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot marker that end-of-request shutdown handling has begun.
///
/// Shared by `Arc` between the event bridge, which sets it, and any client
/// that wants to stop holding errors back for batched sending once set.
/// Deliberately not a process global, so independent instances (and tests)
/// cannot contaminate each other.
#[derive(Default)]
pub struct ShutdownFlag(AtomicBool);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks shutdown as begun. Returns `true` on the transition, `false`
    /// on every later call.
    pub fn begin(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Scratch allocation held while a request is being processed. Releasing it
/// right before the last fatal error is inspected guarantees enough headroom
/// to format and dispatch one more report even when the process ran out of
/// memory.
pub struct MemoryReserve {
    size: usize,
    block: parking_lot::Mutex<Option<Vec<u8>>>,
}

impl MemoryReserve {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            block: parking_lot::Mutex::new(Some(vec![0; size])),
        }
    }

    /// Re-acquires the scratch block for the next request.
    pub fn rearm(&self) {
        *self.block.lock() = Some(vec![0; self.size]);
    }

    pub fn release(&self) {
        *self.block.lock() = None;
    }

    pub fn is_held(&self) -> bool {
        self.block.lock().is_some()
    }
}
