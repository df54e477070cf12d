//! Sync progress reporting.

/// Receives progress updates while a sync applies its changes.
pub trait SyncProgress {
    /// Called when a phase starts (e.g., "Reconciling 412 Steam games").
    fn on_phase(&self, message: &str);

    /// Called after each mutation is applied.
    fn on_change(&self, current: usize, total: usize, description: &str);

    /// Called when the sync is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_change(&self, _current: usize, _total: usize, _description: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_change(&self, current: usize, total: usize, description: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, description);
        } else {
            log::debug!("  [{}/{}] {}", current, total, description);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
