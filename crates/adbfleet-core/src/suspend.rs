// ── External polling suspension ──
//
// Callers that poll the fleet on a timer hand the orchestrators a
// `RefreshGate` so the timer is held off while a multi-step operation is
// in flight (otherwise a refresh can invalidate the device snapshot
// mid-operation). Acquisition is scoped: the guard resumes polling on
// every exit path, including errors and cancellation.

use std::sync::Arc;

/// Capability to pause and resume an external polling loop.
pub trait RefreshGate: Send + Sync {
    fn suspend(&self);
    fn resume(&self);
}

/// RAII pause on a [`RefreshGate`]. Resumes on drop.
pub struct RefreshPause {
    gate: Arc<dyn RefreshGate>,
}

impl RefreshPause {
    pub fn acquire(gate: Arc<dyn RefreshGate>) -> Self {
        gate.suspend();
        Self { gate }
    }
}

impl Drop for RefreshPause {
    fn drop(&mut self) {
        self.gate.resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingGate;

    #[test]
    fn pause_resumes_on_drop() {
        let gate = Arc::new(CountingGate::default());
        {
            let _pause = RefreshPause::acquire(gate.clone());
            assert_eq!(gate.suspend_count(), 1);
            assert_eq!(gate.resume_count(), 0);
        }
        assert_eq!(gate.resume_count(), 1);
    }

    #[test]
    fn pause_resumes_on_unwind() {
        let gate = Arc::new(CountingGate::default());
        let cloned = gate.clone();
        let result = std::panic::catch_unwind(move || {
            let _pause = RefreshPause::acquire(cloned);
            panic!("operation blew up");
        });
        assert!(result.is_err());
        assert_eq!(gate.resume_count(), 1);
    }
}
