use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flight marker for sign-in adapters.
///
/// At most one [`InFlightGuard`] exists per `InFlight` at a time; the flag is
/// released when the guard drops, on every exit path of the guarded call.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    busy: AtomicBool,
}

pub(crate) struct InFlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when another call already holds the flag.
    pub(crate) fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { busy: &self.busy })
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
