use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creative format of an ad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    Image,
    Video,
    Carousel,
    Other,
}

impl AdFormat {
    /// Human-readable label for the format
    pub fn label(&self) -> &'static str {
        match self {
            AdFormat::Image => "image",
            AdFormat::Video => "video",
            AdFormat::Carousel => "carousel",
            AdFormat::Other => "other",
        }
    }
}

/// A single observed competitor ad. Owned by the caller, borrowed
/// read-only by every engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdRecord {
    pub id: String,
    pub competitor_id: String,
    pub title: String,
    pub content: String,
    pub format: AdFormat,
    /// Click-through rate (fraction, >= 0)
    pub ctr: f64,
    /// Cost per 1,000 impressions (>= 0)
    pub cpm: f64,
    pub spend: f64,
    pub engagement: f64,
    pub call_to_action: String,
    /// Optional caller-supplied targeting label
    #[serde(default)]
    pub audience: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AdRecord {
    /// Combined creative text (content plus title) used by the text analyzers
    pub fn text(&self) -> String {
        format!("{} {}", self.content, self.title)
    }
}

/// Competitor identity, supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub id: String,
    pub name: String,
}

/// Tag distinguishing the kinds of insight the engines emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Trend,
    Opportunity,
    Threat,
    Recommendation,
    Prediction,
    Anomaly,
    Sentiment,
}

/// Qualitative impact of an insight or trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// Dimension of competitor activity an insight speaks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Creative,
    Targeting,
    Timing,
    Budget,
    Platform,
    Content,
}

/// One advisory finding about a competitor. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    /// 0-100, clamped by the constructor
    pub confidence: f64,
    pub impact: Impact,
    pub category: InsightCategory,
    pub data_points: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub predicted_outcome: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Insight {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: f64,
        impact: Impact,
        category: InsightCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            confidence: confidence.clamp(0.0, 100.0),
            impact,
            category,
            data_points: Vec::new(),
            recommendations: Vec::new(),
            predicted_outcome: None,
            timeframe: None,
            created_at,
        }
    }

    pub fn with_data_points(mut self, data_points: Vec<String>) -> Self {
        self.data_points = data_points;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_predicted_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.predicted_outcome = Some(outcome.into());
        self
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = Some(timeframe.into());
        self
    }
}

/// Direction of a metric over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Direction, strength and confidence of one metric over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trend: String,
    pub direction: TrendDirection,
    /// 0-100
    pub strength: f64,
    /// 0-100
    pub confidence: f64,
    pub timeframe: String,
    pub indicators: Vec<String>,
    pub impact: Impact,
}

/// Overall sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a -1..1 sentiment score with the standard +/-0.05 cutoffs
    pub fn from_score(score: f64, positive_cutoff: f64, negative_cutoff: f64) -> Self {
        if score > positive_cutoff {
            SentimentLabel::Positive
        } else if score < negative_cutoff {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Plutchik-style emotion vector, each component in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub joy: f64,
    pub trust: f64,
    pub fear: f64,
    pub surprise: f64,
    pub sadness: f64,
    pub disgust: f64,
    pub anger: f64,
    pub anticipation: f64,
}

/// A frequent token with its lexicon classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentKeyword {
    pub word: String,
    pub sentiment: SentimentLabel,
    pub frequency: usize,
}

/// Lexicon-based sentiment reading over a competitor's ad copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub overall: SentimentLabel,
    /// -1..1
    pub score: f64,
    pub emotions: EmotionScores,
    pub keywords: Vec<SentimentKeyword>,
}

impl SentimentAnalysis {
    /// Neutral reading for empty input
    pub fn neutral() -> Self {
        Self {
            overall: SentimentLabel::Neutral,
            score: 0.0,
            emotions: EmotionScores::default(),
            keywords: Vec::new(),
        }
    }
}

/// Dimension in which an anomaly was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Performance,
    Spend,
    Creative,
    Timing,
}

/// How far outside normal an anomaly sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Statistical outlier flagged by the anomaly detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyDetection {
    pub kind: AnomalyKind,
    pub severity: Severity,
    /// 0-100
    pub score: f64,
    pub description: String,
    pub expected_value: f64,
    pub actual_value: f64,
    /// z-score magnitude (ratio for timing anomalies)
    pub deviation: f64,
    pub recommendations: Vec<String>,
}

/// Competitor risk classification derived from SWOT counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Aggregate analysis of one competitor. Treated as a value object: built
/// once by the aggregator and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorInsight {
    pub competitor_id: String,
    pub competitor_name: String,
    pub insights: Vec<Insight>,
    pub trends: Vec<TrendAnalysis>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    /// 0-100
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub sentiment: SentimentAnalysis,
    pub anomalies: Vec<AnomalyDetection>,
    pub last_updated: DateTime<Utc>,
}

/// Competitors bucketed by overall-score trajectory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitiveLandscape {
    pub top_performers: Vec<String>,
    pub rising: Vec<String>,
    pub declining: Vec<String>,
}

/// Market-level sentiment summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub overall: SentimentLabel,
    pub average_score: f64,
}

/// Market-wide roll-up over all analyzed competitors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInsight {
    pub market_trends: Vec<String>,
    pub emerging_patterns: Vec<String>,
    pub seasonal_factors: Vec<String>,
    pub landscape: CompetitiveLandscape,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub sentiment: MarketSentiment,
    /// High and critical anomalies across all competitors
    pub anomalies: Vec<AnomalyDetection>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn insight_constructor_clamps_confidence() {
        let now = Utc::now();
        let high = Insight::new(
            InsightKind::Trend,
            "t",
            "d",
            140.0,
            Impact::Low,
            InsightCategory::Creative,
            now,
        );
        assert_eq!(high.confidence, 100.0);

        let low = Insight::new(
            InsightKind::Threat,
            "t",
            "d",
            -3.0,
            Impact::Low,
            InsightCategory::Creative,
            now,
        );
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn sentiment_label_cutoffs() {
        assert_eq!(
            SentimentLabel::from_score(0.06, 0.05, -0.05),
            SentimentLabel::Positive
        );
        assert_eq!(
            SentimentLabel::from_score(-0.06, 0.05, -0.05),
            SentimentLabel::Negative
        );
        assert_eq!(
            SentimentLabel::from_score(0.05, 0.05, -0.05),
            SentimentLabel::Neutral
        );
        assert_eq!(
            SentimentLabel::from_score(0.0, 0.05, -0.05),
            SentimentLabel::Neutral
        );
    }
}
