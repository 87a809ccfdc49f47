use std::collections::{HashMap, HashSet};

use insight_core::{
    AdRecord, AnalysisConfig, AnalysisError, EmotionScores, SentimentAnalysis, SentimentAnalyzer,
    SentimentKeyword, SentimentLabel,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod lexicon;

/// Lexicon-based sentiment engine over a competitor's ad copy.
///
/// Scoring is a pure function of the input text; the one pseudo-random
/// component (the surprise emotion) is drawn from a generator re-seeded on
/// every call, so repeated analyses of the same input are identical.
pub struct SentimentAnalysisEngine {
    positive_words: HashSet<&'static str>,
    negative_words: HashSet<&'static str>,
    config: AnalysisConfig,
    seed: u64,
}

impl SentimentAnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        let seed = config.sentiment_seed;
        Self {
            positive_words: lexicon::POSITIVE_WORDS.iter().copied().collect(),
            negative_words: lexicon::NEGATIVE_WORDS.iter().copied().collect(),
            config,
            seed,
        }
    }

    /// Override the surprise-component seed (tests pin this)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| {
                w.to_lowercase()
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_string()
            })
            .filter(|w| !w.is_empty())
            .collect()
    }

    fn classify(&self, word: &str) -> SentimentLabel {
        if self.positive_words.contains(word) {
            SentimentLabel::Positive
        } else if self.negative_words.contains(word) {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Emotion vector: a fixed linear map of the positive/negative scores,
    /// plus a bounded seeded surprise term. All components clamp to [0, 1].
    fn emotions(&self, positive_score: f64, negative_score: f64) -> EmotionScores {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let surprise: f64 = rng.gen::<f64>() * self.config.surprise_scale;

        EmotionScores {
            joy: (0.8 * positive_score).clamp(0.0, 1.0),
            trust: (0.6 * positive_score).clamp(0.0, 1.0),
            anticipation: (0.5 * positive_score).clamp(0.0, 1.0),
            fear: (0.7 * negative_score).clamp(0.0, 1.0),
            sadness: (0.6 * negative_score).clamp(0.0, 1.0),
            anger: (0.5 * negative_score).clamp(0.0, 1.0),
            disgust: (0.4 * negative_score).clamp(0.0, 1.0),
            surprise: surprise.clamp(0.0, 1.0),
        }
    }

    /// Top keywords by frequency, ties broken by first appearance
    fn keywords(&self, tokens: &[String]) -> Vec<SentimentKeyword> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, token) in tokens.iter().enumerate() {
            if token.len() <= self.config.min_keyword_len {
                continue;
            }
            let entry = counts.entry(token.as_str()).or_insert((0, idx));
            entry.0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(word, (freq, first_seen))| (word, freq, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(self.config.max_keywords)
            .map(|(word, freq, _)| SentimentKeyword {
                word: word.to_string(),
                sentiment: self.classify(word),
                frequency: freq,
            })
            .collect()
    }

    fn analyze_text(&self, text: &str) -> SentimentAnalysis {
        let tokens = Self::tokenize(text);
        let total = tokens.len();
        if total == 0 {
            return SentimentAnalysis::neutral();
        }

        let positive_count = tokens
            .iter()
            .filter(|t| self.positive_words.contains(t.as_str()))
            .count();
        let negative_count = tokens
            .iter()
            .filter(|t| self.negative_words.contains(t.as_str()))
            .count();

        let positive_score = positive_count as f64 / total as f64;
        let negative_score = negative_count as f64 / total as f64;
        let score = positive_score - negative_score;

        let overall = SentimentLabel::from_score(
            score,
            self.config.positive_cutoff,
            self.config.negative_cutoff,
        );

        tracing::debug!(
            total_words = total,
            positive_count,
            negative_count,
            score,
            "scored ad copy sentiment"
        );

        SentimentAnalysis {
            overall,
            score,
            emotions: self.emotions(positive_score, negative_score),
            keywords: self.keywords(&tokens),
        }
    }
}

impl SentimentAnalyzer for SentimentAnalysisEngine {
    fn analyze(&self, ads: &[AdRecord]) -> Result<SentimentAnalysis, AnalysisError> {
        let text = ads.iter().map(|ad| ad.text()).collect::<Vec<_>>().join(" ");
        Ok(self.analyze_text(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use insight_core::AdFormat;

    fn ad(content: &str) -> AdRecord {
        AdRecord {
            id: "a1".into(),
            competitor_id: "c1".into(),
            title: String::new(),
            content: content.into(),
            format: AdFormat::Image,
            ctr: 0.01,
            cpm: 5.0,
            spend: 100.0,
            engagement: 0.02,
            call_to_action: String::new(),
            audience: None,
            created_at: Utc::now(),
        }
    }

    fn engine() -> SentimentAnalysisEngine {
        SentimentAnalysisEngine::new(AnalysisConfig::default()).with_seed(7)
    }

    #[test]
    fn all_positive_lexicon_words_score_positive() {
        let result = engine().analyze(&[ad("gratis korting beste aanbieding")]).unwrap();
        assert_eq!(result.overall, SentimentLabel::Positive);
        assert!(result.score > 0.0);
        assert!((result.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text_is_neutral() {
        let result = engine().analyze(&[]).unwrap();
        assert_eq!(result.overall, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
        assert!(result.keywords.is_empty());

        let blank = engine().analyze(&[ad("   ")]).unwrap();
        assert_eq!(blank.overall, SentimentLabel::Neutral);
        assert_eq!(blank.score, 0.0);
    }

    #[test]
    fn negative_copy_scores_negative() {
        let result = engine()
            .analyze(&[ad("duur slecht probleem klacht teleurstellend")])
            .unwrap();
        assert_eq!(result.overall, SentimentLabel::Negative);
        assert!(result.score < 0.0);
        assert!(result.emotions.fear > 0.0);
        assert!(result.emotions.joy == 0.0);
    }

    #[test]
    fn mixed_copy_near_zero_is_neutral() {
        // One positive, one negative word among many neutral ones
        let result = engine()
            .analyze(&[ad(
                "onze nieuwe collectie gratis bezorgd maar retourneren blijft duur dit seizoen voor iedereen online beschikbaar vanaf vandaag bestel direct via de webshop pagina",
            )])
            .unwrap();
        assert_eq!(result.overall, SentimentLabel::Neutral);
    }

    #[test]
    fn keywords_ranked_by_frequency_then_first_seen() {
        let result = engine()
            .analyze(&[ad("schoenen schoenen jassen jassen tassen")])
            .unwrap();
        let words: Vec<&str> = result.keywords.iter().map(|k| k.word.as_str()).collect();
        // Equal-frequency pair keeps first-seen order
        assert_eq!(words, vec!["schoenen", "jassen", "tassen"]);
        assert_eq!(result.keywords[0].frequency, 2);
        assert_eq!(result.keywords[2].frequency, 1);
    }

    #[test]
    fn keywords_skip_short_tokens() {
        let result = engine().analyze(&[ad("nu op de mooie aanbieding")]).unwrap();
        let words: Vec<&str> = result.keywords.iter().map(|k| k.word.as_str()).collect();
        assert!(words.contains(&"mooie"));
        assert!(words.contains(&"aanbieding"));
        assert!(!words.contains(&"nu"));
        assert!(!words.contains(&"op"));
    }

    #[test]
    fn keyword_sentiment_tags_follow_lexicon() {
        let result = engine().analyze(&[ad("gratis probleem overig")]).unwrap();
        for kw in &result.keywords {
            let expected = match kw.word.as_str() {
                "gratis" => SentimentLabel::Positive,
                "probleem" => SentimentLabel::Negative,
                _ => SentimentLabel::Neutral,
            };
            assert_eq!(kw.sentiment, expected, "word {}", kw.word);
        }
    }

    #[test]
    fn same_seed_same_output() {
        let a = engine().analyze(&[ad("gratis korting vandaag")]).unwrap();
        let b = engine().analyze(&[ad("gratis korting vandaag")]).unwrap();
        assert_eq!(a.emotions, b.emotions);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn surprise_is_bounded() {
        let result = engine().analyze(&[ad("gratis korting")]).unwrap();
        assert!(result.emotions.surprise >= 0.0);
        assert!(result.emotions.surprise <= 0.3);
    }

    #[test]
    fn punctuation_is_stripped() {
        let result = engine().analyze(&[ad("Gratis! Korting, beste... aanbieding?")]).unwrap();
        assert_eq!(result.overall, SentimentLabel::Positive);
    }
}
