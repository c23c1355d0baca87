//! Gospel message aggregator - rolling series and cumulative counters

use super::detector::OpportunityDetector;
use super::record::GospelRecord;
use super::scorer::{GospelScorer, ScoreBreakdown};
use super::window::{RollingSeries, SeriesPoint};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Sentiment floor used when computing faith impact
pub const IMPACT_SENTIMENT_FLOOR: f64 = 0.3;

/// Score/impact thresholds that drive the counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// score above this counts as a gospel message
    pub gospel_score: f64,
    /// score above this is logged as a strong gospel message
    pub strong_gospel_score: f64,
    /// impact above this counts as bold witness
    pub bold_impact: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            gospel_score: 0.3,
            strong_gospel_score: 0.5,
            bold_impact: 0.7,
        }
    }
}

/// Derived metrics for one record, computed before any state is touched
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub breakdown: ScoreBreakdown,
    pub impact: f64,
    pub opportunity: bool,
}

impl Evaluation {
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }
}

/// Immutable view of the aggregator handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_count: u64,
    pub gospel_count: u64,
    pub strong_gospel_count: u64,
    pub bold_count: u64,
    pub opportunity_count: u64,
    pub distinct_authors: usize,
    pub timestamps: Vec<DateTime<Utc>>,
    pub scores: Vec<f64>,
    pub impacts: Vec<f64>,
    pub keyword_frequency: BTreeMap<String, u64>,
    pub category_counts: BTreeMap<String, u64>,
}

impl Snapshot {
    fn rate(&self, count: u64) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        count as f64 / self.total_count as f64 * 100.0
    }

    /// Percentage of messages above the gospel threshold
    pub fn gospel_rate(&self) -> f64 {
        self.rate(self.gospel_count)
    }

    /// Percentage of messages above the bold-witness impact threshold
    pub fn bold_rate(&self) -> f64 {
        self.rate(self.bold_count)
    }

    /// Percentage of messages flagged as evangelistic opportunities
    pub fn opportunity_rate(&self) -> f64 {
        self.rate(self.opportunity_count)
    }

    /// Most frequent keywords, count descending then keyword ascending
    pub fn top_keywords(&self, n: usize) -> Vec<(&str, u64)> {
        let mut keywords: Vec<(&str, u64)> = self
            .keyword_frequency
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        keywords.truncate(n);
        keywords
    }

    pub fn point_count(&self) -> usize {
        self.scores.len()
    }

    pub fn latest_point(&self) -> Option<SeriesPoint> {
        let i = self.scores.len().checked_sub(1)?;
        Some(SeriesPoint {
            timestamp: self.timestamps[i],
            score: self.scores[i],
            impact: self.impacts[i],
        })
    }
}

/// Accumulates gospel statistics over the lifetime of a consumer run
pub struct GospelAggregator {
    scorer: GospelScorer,
    detector: OpportunityDetector,
    thresholds: Thresholds,
    series: RollingSeries,
    total_count: u64,
    gospel_count: u64,
    strong_gospel_count: u64,
    bold_count: u64,
    opportunity_count: u64,
    keyword_frequency: HashMap<&'static str, u64>,
    authors: HashSet<String>,
    category_counts: HashMap<String, u64>,
}

impl GospelAggregator {
    pub fn new(capacity: usize) -> Self {
        Self::with_components(
            capacity,
            GospelScorer::new(),
            OpportunityDetector::with_defaults(),
            Thresholds::default(),
        )
    }

    pub fn with_components(
        capacity: usize,
        scorer: GospelScorer,
        detector: OpportunityDetector,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            scorer,
            detector,
            thresholds,
            series: RollingSeries::new(capacity),
            total_count: 0,
            gospel_count: 0,
            strong_gospel_count: 0,
            bold_count: 0,
            opportunity_count: 0,
            keyword_frequency: HashMap::new(),
            authors: HashSet::new(),
            category_counts: HashMap::new(),
        }
    }

    /// Faith impact: score scaled by sentiment, with sentiment floored at 0.3
    pub fn impact(score: f64, sentiment: f64) -> f64 {
        score * sentiment.max(IMPACT_SENTIMENT_FLOOR)
    }

    /// Score a record without mutating any state
    pub fn evaluate(&self, record: &GospelRecord) -> Evaluation {
        let breakdown = self.scorer.score(&record.message);
        let impact = Self::impact(breakdown.score, record.sentiment);
        let opportunity = self.detector.is_opportunity(&record.message, record.sentiment);

        Evaluation {
            breakdown,
            impact,
            opportunity,
        }
    }

    /// Process one record stamped with the current wall clock
    pub fn process(&mut self, record: &GospelRecord) -> Snapshot {
        self.process_at(record, Utc::now())
    }

    /// Process one record stamped with `now`
    ///
    /// Every record is accepted; counters are updated in a fixed order:
    /// rolling series, total, gospel (author + category), strong gospel,
    /// bold witness, opportunity.
    pub fn process_at(&mut self, record: &GospelRecord, now: DateTime<Utc>) -> Snapshot {
        let evaluation = self.evaluate(record);
        let score = evaluation.score();

        for keyword in &evaluation.breakdown.keyword_hits {
            *self.keyword_frequency.entry(*keyword).or_insert(0) += 1;
        }

        self.series.push(SeriesPoint {
            timestamp: now,
            score,
            impact: evaluation.impact,
        });

        self.total_count += 1;

        if score > self.thresholds.gospel_score {
            self.gospel_count += 1;
            self.authors.insert(record.author.clone());
            *self
                .category_counts
                .entry(record.category.clone())
                .or_insert(0) += 1;
        }

        if score > self.thresholds.strong_gospel_score {
            self.strong_gospel_count += 1;
            log::info!("✝️  STRONG GOSPEL MESSAGE detected from {}!", record.author);
        }

        if evaluation.impact > self.thresholds.bold_impact {
            self.bold_count += 1;
        }

        if evaluation.opportunity {
            self.opportunity_count += 1;
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            total_count: self.total_count,
            gospel_count: self.gospel_count,
            strong_gospel_count: self.strong_gospel_count,
            bold_count: self.bold_count,
            opportunity_count: self.opportunity_count,
            distinct_authors: self.authors.len(),
            timestamps: self.series.timestamps(),
            scores: self.series.scores(),
            impacts: self.series.impacts(),
            keyword_frequency: self
                .keyword_frequency
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            category_counts: self
                .category_counts
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn gospel_count(&self) -> u64 {
        self.gospel_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_total_count_matches_calls() {
        let mut agg = GospelAggregator::new(10);
        let record = GospelRecord::new("hello", "bob", 0.0, "chat");

        for i in 0..25 {
            let snapshot = agg.process_at(&record, at(i));
            assert_eq!(snapshot.total_count, i as u64 + 1);
        }

        assert_eq!(agg.total_count(), 25);
    }

    #[test]
    fn test_rolling_series_bounded_and_aligned() {
        let mut agg = GospelAggregator::new(4);
        let record = GospelRecord::new("Jesus saves", "amy", 0.5, "faith");

        for i in 0..9 {
            let snapshot = agg.process_at(&record, at(i));
            assert!(snapshot.point_count() <= 4);
            assert_eq!(snapshot.timestamps.len(), snapshot.scores.len());
            assert_eq!(snapshot.scores.len(), snapshot.impacts.len());
        }

        let snapshot = agg.snapshot();
        assert_eq!(snapshot.timestamps.first(), Some(&at(5)));
        assert_eq!(snapshot.latest_point().map(|p| p.timestamp), Some(at(8)));
    }

    #[test]
    fn test_negative_sentiment_impact_is_floored() {
        let record = GospelRecord::new("jesus and faith", "amy", -0.5, "faith");
        let agg = GospelAggregator::new(10);
        let evaluation = agg.evaluate(&record);

        assert!(approx(evaluation.score(), 0.6));
        assert!(approx(evaluation.impact, 0.6 * 0.3));
    }

    #[test]
    fn test_zero_score_has_zero_impact() {
        assert_eq!(GospelAggregator::impact(0.0, 0.95), 0.0);
        assert!(approx(GospelAggregator::impact(0.5, 0.9), 0.45));
    }

    #[test]
    fn test_gospel_message_updates_author_and_category() {
        let mut agg = GospelAggregator::new(10);

        // k=2, c=2 -> 0.6, above the 0.3 gospel threshold
        agg.process_at(&GospelRecord::new("Jesus gives faith", "amy", 0.2, "faith"), at(0));
        agg.process_at(&GospelRecord::new("Jesus gives faith", "amy", 0.2, "faith"), at(1));
        // Below threshold: author and category are not recorded
        let snapshot = agg.process_at(&GospelRecord::new("nice weather", "cal", 0.2, "chat"), at(2));

        assert_eq!(snapshot.total_count, 3);
        assert_eq!(snapshot.gospel_count, 2);
        assert_eq!(snapshot.distinct_authors, 1);
        assert_eq!(snapshot.category_counts.get("faith"), Some(&2));
        assert!(snapshot.category_counts.get("chat").is_none());
    }

    #[test]
    fn test_single_keyword_crosses_gospel_threshold() {
        let mut agg = GospelAggregator::new(10);

        // k=1, c=1: 0.2 + 0.1 lands just above 0.3 in f64
        let snapshot = agg.process_at(&GospelRecord::new("Praise the Lord", "ben", 0.2, "praise"), at(0));

        assert!(snapshot.scores[0] > 0.3);
        assert_eq!(snapshot.gospel_count, 1);
        assert_eq!(snapshot.category_counts.get("praise"), Some(&1));
    }

    #[test]
    fn test_keyword_frequency_counts_all_records() {
        let mut agg = GospelAggregator::new(10);

        agg.process_at(&GospelRecord::new("I believe", "a", 0.0, "x"), at(0));
        agg.process_at(&GospelRecord::new("believe in love", "b", 0.0, "x"), at(1));
        agg.process_at(&GospelRecord::new("plain text", "c", 0.0, "x"), at(2));
        let snapshot = agg.snapshot();

        assert_eq!(snapshot.total_count, 3);
        assert_eq!(snapshot.keyword_frequency.get("believe"), Some(&2));
        assert_eq!(snapshot.keyword_frequency.get("love"), Some(&1));
        assert_eq!(snapshot.keyword_frequency.len(), 2);
        assert_eq!(snapshot.top_keywords(1), vec![("believe", 2)]);
    }

    #[test]
    fn test_bold_witness_and_strong_gospel() {
        let mut agg = GospelAggregator::new(10);
        // jesus, christ, lord (jesus) + faith (faith) + bible (scripture): k=5 -> 1.0 capped
        let record = GospelRecord::new("Jesus Christ is Lord, faith in the Bible", "amy", 0.9, "faith");
        let snapshot = agg.process_at(&record, at(0));

        assert_eq!(snapshot.scores, vec![1.0]);
        assert!(approx(snapshot.impacts[0], 0.9));
        assert_eq!(snapshot.strong_gospel_count, 1);
        assert_eq!(snapshot.bold_count, 1);
        // sentiment 0.9 > 0.8
        assert_eq!(snapshot.opportunity_count, 1);
    }

    #[test]
    fn test_opportunity_without_gospel_content() {
        let mut agg = GospelAggregator::new(10);
        let snapshot = agg.process_at(&GospelRecord::new("life is hard", "dan", 0.1, "life"), at(0));

        assert_eq!(snapshot.gospel_count, 0);
        assert_eq!(snapshot.opportunity_count, 1);
        assert_eq!(snapshot.bold_count, 0);
    }

    #[test]
    fn test_rates() {
        let mut agg = GospelAggregator::new(10);
        assert_eq!(agg.snapshot().gospel_rate(), 0.0);

        agg.process_at(&GospelRecord::new("Jesus gives faith", "amy", 0.0, "faith"), at(0));
        agg.process_at(&GospelRecord::new("hello", "bob", 0.0, "chat"), at(1));
        agg.process_at(&GospelRecord::new("hello", "bob", 0.0, "chat"), at(2));
        agg.process_at(&GospelRecord::new("hello", "bob", 0.95, "chat"), at(3));
        let snapshot = agg.snapshot();

        assert!(approx(snapshot.gospel_rate(), 25.0));
        assert!(approx(snapshot.opportunity_rate(), 25.0));
        assert_eq!(snapshot.bold_rate(), 0.0);
    }

    #[test]
    fn test_top_keywords_tie_break() {
        let mut agg = GospelAggregator::new(10);
        agg.process_at(&GospelRecord::new("soul spirit", "a", 0.0, "x"), at(0));
        agg.process_at(&GospelRecord::new("mercy", "a", 0.0, "x"), at(1));
        agg.process_at(&GospelRecord::new("mercy", "a", 0.0, "x"), at(2));

        let snapshot = agg.snapshot();
        assert_eq!(
            snapshot.top_keywords(8),
            vec![("mercy", 2), ("soul", 1), ("spirit", 1)]
        );
    }
}
