//! Line-by-line consumer: parse → aggregate → publish
//!
//! One line is fully processed (including the dashboard re-render) before the
//! next one is looked at.

use crate::aggregator_core::{GospelAggregator, GospelRecord, RecordError, Snapshot};
use crate::dashboard::DashboardPublisher;

/// What happened to a single input line
#[derive(Debug)]
pub enum LineOutcome {
    Processed(Snapshot),
    Skipped(RecordError),
}

impl LineOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, LineOutcome::Processed(_))
    }
}

pub struct GospelConsumer {
    aggregator: GospelAggregator,
    publisher: DashboardPublisher,
}

impl GospelConsumer {
    pub fn new(aggregator: GospelAggregator, publisher: DashboardPublisher) -> Self {
        Self {
            aggregator,
            publisher,
        }
    }

    /// Handle one raw JSONL line
    ///
    /// Malformed lines are logged and skipped. Render failures are logged and
    /// do not affect the outcome: the record has already been counted.
    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        let record = match GospelRecord::from_jsonl(line) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping message ({}): {}", e, line);
                return LineOutcome::Skipped(e);
            }
        };

        let snapshot = self.aggregator.process(&record);

        if let Some(point) = snapshot.latest_point() {
            log::info!(
                "📨 Message #{} - Gospel Score: {:.2}, Impact: {:.2}, Author: {}",
                snapshot.total_count,
                point.score,
                point.impact,
                record.author
            );
        }

        match self.publisher.publish(&snapshot).await {
            Ok(true) => log::debug!("Dashboard refreshed for message #{}", snapshot.total_count),
            Ok(false) => {}
            Err(e) => log::error!("❌ Failed to update dashboard: {}", e),
        }

        LineOutcome::Processed(snapshot)
    }

    /// Handle a batch of lines, returning how many were processed
    pub async fn handle_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut processed = 0;
        for line in lines {
            if self.handle_line(line.as_ref()).await.is_processed() {
                processed += 1;
            }
        }
        processed
    }

    pub fn snapshot(&self) -> Snapshot {
        self.aggregator.snapshot()
    }

    /// One-line run summary printed on shutdown
    pub fn summary(&self) -> String {
        format!(
            "Consumer stopped. Gospel messages analyzed: {}/{}",
            self.aggregator.gospel_count(),
            self.aggregator.total_count()
        )
    }
}
