use chrono::{DateTime, Utc};

use crate::{AdRecord, AnalysisError, AnomalyDetection, Insight, SentimentAnalysis, TrendAnalysis};

/// Trait for pattern extraction engines. `now` anchors every relative
/// time window so identical inputs produce identical outputs.
pub trait PatternAnalyzer: Send + Sync {
    fn analyze(&self, ads: &[AdRecord], now: DateTime<Utc>) -> Result<Vec<Insight>, AnalysisError>;
}

/// Trait for sentiment analysis engines
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, ads: &[AdRecord]) -> Result<SentimentAnalysis, AnalysisError>;
}

/// Trait for statistical anomaly detectors
pub trait AnomalyDetector: Send + Sync {
    fn detect(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<AnomalyDetection>, AnalysisError>;
}

/// Trait for metric trend analyzers
pub trait TrendAnalyzer: Send + Sync {
    fn analyze(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendAnalysis>, AnalysisError>;
}
