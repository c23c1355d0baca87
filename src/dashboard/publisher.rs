//! Unified publisher for dashboard outputs
//!
//! Routes each snapshot through every configured renderer, in order.

use super::chart::ChartRenderer;
use super::html::HtmlDashboardWriter;
use super::renderer::{RenderError, SnapshotRenderer};
use crate::aggregator_core::Snapshot;
use std::path::PathBuf;

/// A time series needs two points before a chart is worth drawing
pub const MIN_POINTS_TO_RENDER: usize = 2;

pub struct DashboardPublisher {
    renderers: Vec<Box<dyn SnapshotRenderer>>,
}

impl DashboardPublisher {
    pub fn new(renderers: Vec<Box<dyn SnapshotRenderer>>) -> Self {
        Self { renderers }
    }

    /// Chart image followed by the HTML page that embeds it
    pub fn with_chart_and_html(
        chart_path: PathBuf,
        dashboard_path: PathBuf,
    ) -> Result<Self, RenderError> {
        let html = HtmlDashboardWriter::new(dashboard_path, &chart_path)?;
        let chart = ChartRenderer::new(chart_path)?;
        Ok(Self::new(vec![Box::new(chart), Box::new(html)]))
    }

    /// Render the snapshot with every backend
    ///
    /// Returns `Ok(false)` when the snapshot is too short to render. Stops at
    /// the first failing renderer so the page never embeds a stale chart.
    pub async fn publish(&mut self, snapshot: &Snapshot) -> Result<bool, RenderError> {
        if snapshot.point_count() < MIN_POINTS_TO_RENDER {
            return Ok(false);
        }

        for renderer in self.renderers.iter_mut() {
            renderer.render(snapshot).await?;
        }
        Ok(true)
    }

    /// Get backend types for logging
    pub fn backend_types(&self) -> Vec<&'static str> {
        self.renderers.iter().map(|r| r.backend_type()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator_core::{GospelAggregator, GospelRecord};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct RecordingRenderer {
        name: &'static str,
        fail: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl SnapshotRenderer for RecordingRenderer {
        async fn render(&mut self, _snapshot: &Snapshot) -> Result<(), RenderError> {
            self.calls.lock().unwrap().push(self.name);
            if self.fail {
                return Err(RenderError::Chart("boom".to_string()));
            }
            Ok(())
        }

        fn backend_type(&self) -> &'static str {
            self.name
        }
    }

    fn snapshot_with(points: usize) -> Snapshot {
        let mut agg = GospelAggregator::new(10);
        for _ in 0..points {
            agg.process(&GospelRecord::new("faith", "a", 0.5, "x"));
        }
        agg.snapshot()
    }

    fn publisher(fail_first: bool, calls: &Arc<Mutex<Vec<&'static str>>>) -> DashboardPublisher {
        DashboardPublisher::new(vec![
            Box::new(RecordingRenderer { name: "first", fail: fail_first, calls: calls.clone() }),
            Box::new(RecordingRenderer { name: "second", fail: false, calls: calls.clone() }),
        ])
    }

    #[tokio::test]
    async fn test_skips_short_series() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut publisher = publisher(false, &calls);

        assert!(!publisher.publish(&snapshot_with(1)).await.unwrap());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_renders_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut publisher = publisher(false, &calls);

        assert!(publisher.publish(&snapshot_with(2)).await.unwrap());
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(publisher.backend_types(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut publisher = publisher(true, &calls);

        let result = publisher.publish(&snapshot_with(3)).await;
        assert!(matches!(result, Err(RenderError::Chart(_))));
        assert_eq!(*calls.lock().unwrap(), vec!["first"]);
    }
}
