//! Submit-in-progress flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether a submission is running. Front ends disable the submit control
/// while this is set.
#[derive(Debug, Clone, Default)]
pub struct SubmitState {
    submitting: Arc<AtomicBool>,
}

impl SubmitState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Set the flag, unless it is already set.
    ///
    /// The flag is cleared when the returned guard is dropped, whatever the
    /// outcome of the submission.
    #[must_use]
    pub fn begin(&self) -> Option<InFlight> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                submitting: Arc::clone(&self.submitting),
            })
    }
}

/// Guard held for the duration of one submission.
#[derive(Debug)]
pub struct InFlight {
    submitting: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.submitting.store(false, Ordering::Release);
    }
}
