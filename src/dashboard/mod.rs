//! Dashboard output - chart image and auto-refreshing HTML page
//!
//! Every renderer is a read-only projection of an aggregator [`Snapshot`];
//! nothing here feeds back into the aggregator.
//!
//! [`Snapshot`]: crate::aggregator_core::Snapshot

pub mod chart;
pub mod html;
pub mod publisher;
pub mod renderer;

pub use chart::ChartRenderer;
pub use html::{render_dashboard_html, HtmlDashboardWriter};
pub use publisher::DashboardPublisher;
pub use renderer::{RenderError, SnapshotRenderer};
