//! Keyword scoring for gospel content detection

/// Keyword taxonomy: (category, keywords). Matching is case-insensitive substring.
pub const KEYWORD_TAXONOMY: [(&str, &[&str]); 8] = [
    ("salvation", &["salvation", "saved", "born again", "redeemed", "forgiven"]),
    ("jesus", &["jesus", "christ", "lord", "savior", "messiah", "god"]),
    ("faith", &["faith", "believe", "trust", "christian", "prayer"]),
    ("scripture", &["bible", "scripture", "word", "psalm", "verse", "biblical"]),
    ("grace", &["grace", "mercy", "forgiveness", "love", "blessed"]),
    ("witness", &["testimony", "witness", "share", "proclaim", "preach"]),
    ("truth", &["truth", "righteousness", "holy", "pure", "righteous"]),
    ("eternity", &["heaven", "eternal", "soul", "spirit", "heavenly"]),
];

const KEYWORD_WEIGHT: f64 = 0.2;
const CATEGORY_WEIGHT: f64 = 0.1;

/// Result of scoring a single message
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    /// Every keyword that matched, in taxonomy order
    pub keyword_hits: Vec<&'static str>,
    /// Categories with at least one hit, in taxonomy order
    pub categories: Vec<&'static str>,
}

impl ScoreBreakdown {
    fn empty() -> Self {
        Self {
            score: 0.0,
            keyword_hits: Vec::new(),
            categories: Vec::new(),
        }
    }
}

pub struct GospelScorer;

impl GospelScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute gospel score (0.0-1.0) for a message
    ///
    /// # Factors
    /// - Keyword density: 0.2 per keyword hit, capped at 1.0
    /// - Category diversity: 0.1 per category with at least one hit
    ///
    /// The density term is capped before the diversity term is added, then the
    /// sum is capped again.
    pub fn score(&self, text: &str) -> ScoreBreakdown {
        if text.is_empty() {
            return ScoreBreakdown::empty();
        }

        let lowered = text.to_lowercase();
        let mut breakdown = ScoreBreakdown::empty();

        for &(category, keywords) in KEYWORD_TAXONOMY.iter() {
            let mut category_found = false;
            for &keyword in keywords {
                if lowered.contains(keyword) {
                    breakdown.keyword_hits.push(keyword);
                    if !category_found {
                        breakdown.categories.push(category);
                        category_found = true;
                    }
                }
            }
        }

        let base_score = (breakdown.keyword_hits.len() as f64 * KEYWORD_WEIGHT).min(1.0);
        let diversity_bonus = breakdown.categories.len() as f64 * CATEGORY_WEIGHT;
        breakdown.score = (base_score + diversity_bonus).min(1.0);

        breakdown
    }
}

impl Default for GospelScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = GospelScorer::new();
        let result = scorer.score("");

        assert_eq!(result.score, 0.0);
        assert!(result.keyword_hits.is_empty());
    }

    #[test]
    fn test_two_categories_two_keywords() {
        let scorer = GospelScorer::new();
        let result = scorer.score("Jesus gives me FAITH");

        assert_eq!(result.keyword_hits, vec!["jesus", "faith"]);
        assert_eq!(result.categories, vec!["jesus", "faith"]);
        assert!(approx(result.score, 0.6), "expected 0.6, got {}", result.score);
    }

    #[test]
    fn test_same_category_counts_once() {
        let scorer = GospelScorer::new();
        // "jesus" and "christ" both belong to the jesus category
        let result = scorer.score("jesus christ");

        assert_eq!(result.keyword_hits.len(), 2);
        assert_eq!(result.categories, vec!["jesus"]);
        assert!(approx(result.score, 0.5), "expected 0.5, got {}", result.score);
    }

    #[test]
    fn test_substring_matching() {
        let scorer = GospelScorer::new();
        // "godly" contains "god", "lovely" contains "love"
        let result = scorer.score("a godly and lovely day");

        assert_eq!(result.keyword_hits, vec!["god", "love"]);
    }

    #[test]
    fn test_score_is_capped() {
        let scorer = GospelScorer::new();
        let text = "salvation jesus faith bible grace testimony truth heaven saved christ";
        let result = scorer.score(text);

        assert_eq!(result.categories.len(), 8);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_no_keywords() {
        let scorer = GospelScorer::new();
        let result = scorer.score("the weather is nice today");

        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_score_is_deterministic_and_bounded() {
        let scorer = GospelScorer::new();
        let samples = [
            "",
            "hello",
            "Holy Spirit, eternal soul",
            "Pray, trust, believe, faith, christian prayer",
            "ÄÖÜ unicode input with Lord",
        ];

        for text in samples {
            let first = scorer.score(text);
            let second = scorer.score(text);
            assert_eq!(first, second);
            assert!((0.0..=1.0).contains(&first.score), "{} out of range", first.score);
        }
    }
}
