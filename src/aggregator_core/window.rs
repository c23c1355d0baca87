//! Bounded rolling series of per-message scores

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// One processed message: when it arrived, its gospel score and its faith impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    pub impact: f64,
}

/// Fixed-capacity FIFO of [`SeriesPoint`]s. The oldest point is evicted on overflow.
///
/// Timestamps, scores and impacts live in the same entry, so the three views
/// always have equal length and index `i` refers to the same message in each.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, returning the evicted one if the series was full
    pub fn push(&mut self, point: SeriesPoint) -> Option<SeriesPoint> {
        let evicted = if self.points.len() == self.capacity {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.score).collect()
    }

    pub fn impacts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.impact).collect()
    }
}
