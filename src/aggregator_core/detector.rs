//! Evangelistic opportunity detection with configurable sentiment thresholds

pub const OPPORTUNITY_PHRASES: [&str; 14] = [
    "what is the point",
    "feeling lost",
    "need hope",
    "struggling",
    "what happens when",
    "life is hard",
    "need help",
    "depressed",
    "lonely",
    "purpose",
    "meaning",
    "why am i here",
    "amazing",
    "boring",
];

pub struct OpportunityDetector {
    low_sentiment_threshold: f64,
    high_sentiment_threshold: f64,
}

impl OpportunityDetector {
    pub fn new(low_sentiment_threshold: f64, high_sentiment_threshold: f64) -> Self {
        Self {
            low_sentiment_threshold,
            high_sentiment_threshold,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(-0.1, 0.8)
    }

    /// Detect whether a message opens a conversation about faith
    ///
    /// # Triggers
    /// - **PHRASE**: message contains one of [`OPPORTUNITY_PHRASES`] (case-insensitive)
    /// - **SENTIMENT**: sentiment strictly below the low threshold or strictly above
    ///   the high threshold
    pub fn is_opportunity(&self, message: &str, sentiment: f64) -> bool {
        let lowered = message.to_lowercase();
        if OPPORTUNITY_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
            return true;
        }

        sentiment < self.low_sentiment_threshold || sentiment > self.high_sentiment_threshold
    }
}

impl Default for OpportunityDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_sentiment_is_opportunity() {
        let detector = OpportunityDetector::with_defaults();

        assert!(detector.is_opportunity("", 0.9));
        assert!(detector.is_opportunity("anything at all", 0.9));
    }

    #[test]
    fn test_neutral_message_is_not_opportunity() {
        let detector = OpportunityDetector::with_defaults();

        assert!(!detector.is_opportunity("hello", 0.0));
    }

    #[test]
    fn test_low_sentiment_is_opportunity() {
        let detector = OpportunityDetector::with_defaults();

        assert!(detector.is_opportunity("hello", -0.5));
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let detector = OpportunityDetector::with_defaults();

        assert!(!detector.is_opportunity("hello", -0.1));
        assert!(!detector.is_opportunity("hello", 0.8));
    }

    #[test]
    fn test_phrase_match_is_case_insensitive() {
        let detector = OpportunityDetector::with_defaults();

        assert!(detector.is_opportunity("Honestly I'm Feeling Lost lately", 0.2));
        assert!(detector.is_opportunity("WHY AM I HERE", 0.0));
    }
}
