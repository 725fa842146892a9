//! Advisory upload progress reporting.

/// Cumulative transfer counters for one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    pub bytes_sent: u64,
    pub bytes_total: u64,
}

impl ProgressReport {
    /// Whole percentage, rounded to the nearest integer. An empty upload is
    /// reported as complete.
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 100;
        }
        ((self.bytes_sent * 100 + self.bytes_total / 2) / self.bytes_total) as u8
    }
}

/// Observer invoked as upload bytes are handed to the transport.
///
/// Purely advisory: observers cannot fail and must not gate control flow.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, report: ProgressReport);
}

/// Observer that discards all reports.
pub struct NoOpProgress;

impl ProgressObserver for NoOpProgress {
    fn on_progress(&self, _report: ProgressReport) {}
}

/// Chunk size used by backends when feeding the transport and reporting
/// per-chunk progress.
pub(crate) const PROGRESS_CHUNK_BYTES: usize = 64 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_to_nearest() {
        let report = ProgressReport {
            bytes_sent: 1,
            bytes_total: 3,
        };
        assert_eq!(report.percent(), 33);

        let report = ProgressReport {
            bytes_sent: 2,
            bytes_total: 3,
        };
        assert_eq!(report.percent(), 67);
    }

    #[test]
    fn test_percent_complete_and_empty() {
        let done = ProgressReport {
            bytes_sent: 10,
            bytes_total: 10,
        };
        assert_eq!(done.percent(), 100);

        let empty = ProgressReport {
            bytes_sent: 0,
            bytes_total: 0,
        };
        assert_eq!(empty.percent(), 100);
    }
}
