//! Aggregator Core - Gospel Message Scoring Engine
//!
//! This module turns a stream of JSONL chat messages into running gospel-content
//! statistics that the dashboard layer renders.
//!
//! # Architecture
//!
//! ```text
//! JSONL file → TailReader (byte offset, poll interval)
//!     ↓
//! GospelRecord::from_jsonl (defaults + type coercion)
//!     ↓
//! GospelScorer (keyword taxonomy → score)
//!     ↓
//! OpportunityDetector (phrase list + sentiment extremes)
//!     ↓
//! GospelAggregator (rolling series + counters) → Snapshot
//! ```

pub mod aggregator;
pub mod detector;
pub mod reader;
pub mod record;
pub mod scorer;
pub mod window;

pub use aggregator::{Evaluation, GospelAggregator, Snapshot, Thresholds};
pub use detector::OpportunityDetector;
pub use reader::TailReader;
pub use record::{GospelRecord, RecordError};
pub use scorer::{GospelScorer, ScoreBreakdown, KEYWORD_TAXONOMY};
pub use window::{RollingSeries, SeriesPoint};
