// src/progress.rs
/// Lightweight progress reporting for the extraction batch.
/// Frontends implement this to surface status; the CLI logs through `tracing`.
pub trait Progress {
    /// Called at the start with the number of dossiers in the batch.
    fn begin(&mut self, _total: usize) {}

    /// One dossier scraped; `activities` may be zero.
    fn item_done(&mut self, _dossier_id: &str, _activities: usize) {}

    /// One dossier skipped after an error.
    fn item_failed(&mut self, _dossier_id: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress as log lines, with a running `[n/total]` counter.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    seen: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.seen = 0;
        tracing::info!(total, "scraping dossiers");
    }

    fn item_done(&mut self, dossier_id: &str, activities: usize) {
        self.seen += 1;
        tracing::info!("[{}/{}] dossier {dossier_id}: {activities} activities", self.seen, self.total);
    }

    fn item_failed(&mut self, dossier_id: &str, err: &str) {
        self.seen += 1;
        tracing::warn!("[{}/{}] dossier {dossier_id} skipped: {err}", self.seen, self.total);
    }

    fn finish(&mut self) {
        tracing::info!(processed = self.seen, "batch finished");
    }
}
