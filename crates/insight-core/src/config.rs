use serde::{Deserialize, Serialize};

/// Every numeric threshold used by the heuristic engines, gathered in one
/// place so the exact original values are documented and testable. The
/// defaults reproduce the shipped behavior; none of them is derived from
/// data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // Time windows
    /// Window for "recent" comparisons (performance trend, predictions)
    pub recent_days: i64,
    /// Window for activity checks (SWOT, timing anomaly)
    pub activity_window_days: i64,

    // Pattern analysis
    /// Recent mean CTR must reach this multiple of the overall mean to
    /// count as an improving trend
    pub improving_trend_ratio: f64,
    /// Timing buckets within this fraction of the best bucket are "optimal"
    pub optimal_time_ratio: f64,
    /// Minimum word length for creative themes
    pub min_theme_word_len: usize,
    pub performance_trend_confidence: f64,
    pub creative_trend_confidence: f64,
    pub timing_confidence: f64,

    // Sentiment
    pub positive_cutoff: f64,
    pub negative_cutoff: f64,
    /// Keywords must be strictly longer than this
    pub min_keyword_len: usize,
    pub max_keywords: usize,
    /// Upper bound of the pseudo-random surprise component
    pub surprise_scale: f64,
    /// Default seed for the surprise generator
    pub sentiment_seed: u64,

    // Anomaly detection
    pub anomaly_min_records: usize,
    /// z-score above which a record is flagged, both dimensions
    pub anomaly_flag_z: f64,
    pub performance_critical_z: f64,
    pub performance_high_z: f64,
    pub spend_critical_z: f64,
    pub spend_high_z: f64,
    pub performance_score_scale: f64,
    pub spend_score_scale: f64,
    /// Fraction of records inside the activity window that flags a burst
    pub timing_burst_share: f64,
    pub timing_anomaly_score: f64,
    /// Expected share of records inside the activity window
    pub timing_expected_share: f64,

    // Trend analysis
    pub trend_min_records: usize,
    /// recent/historical ratio at or above which a trend is Up
    pub trend_up_ratio: f64,
    /// recent/historical ratio at or below which a trend is Down
    pub trend_down_ratio: f64,

    // SWOT
    pub strong_ctr: f64,
    pub strong_engagement: f64,
    pub weak_ctr: f64,
    /// Distinct formats below this count is a weakness
    pub min_format_variety: usize,
    pub threat_ctr: f64,
    /// Fraction of high-CTR records that constitutes a threat
    pub threat_share: f64,

    // Predictions
    pub seasonal_peak_ratio: f64,
    pub seasonal_confidence: f64,
    pub seasonal_fallback_confidence: f64,
    /// Relative CTR shift that moves the market position off stable
    pub position_shift: f64,
    pub position_confidence: f64,
    pub position_stable_confidence: f64,
    /// Format share above which it dominates recent creatives
    pub creative_dominance_share: f64,
    pub creative_confidence: f64,
    pub creative_mixed_confidence: f64,
    pub creative_fallback_confidence: f64,

    // Competitor scoring
    pub score_base: f64,
    pub score_per_opportunity: f64,
    pub score_per_threat: f64,
    pub score_per_trend_insight: f64,
    pub score_per_strength: f64,
    pub score_per_weakness: f64,
    pub score_per_up_trend: f64,
    pub score_per_down_trend: f64,
    pub score_per_severe_anomaly: f64,

    // Market landscape
    pub top_performer_score: f64,
    pub rising_score: f64,
    pub declining_score: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recent_days: 30,
            activity_window_days: 7,

            improving_trend_ratio: 1.2,
            optimal_time_ratio: 0.8,
            min_theme_word_len: 5,
            performance_trend_confidence: 75.0,
            creative_trend_confidence: 80.0,
            timing_confidence: 65.0,

            positive_cutoff: 0.05,
            negative_cutoff: -0.05,
            min_keyword_len: 3,
            max_keywords: 10,
            surprise_scale: 0.3,
            sentiment_seed: 42,

            anomaly_min_records: 3,
            anomaly_flag_z: 2.0,
            performance_critical_z: 3.0,
            performance_high_z: 2.5,
            spend_critical_z: 3.5,
            spend_high_z: 3.0,
            performance_score_scale: 20.0,
            spend_score_scale: 15.0,
            timing_burst_share: 0.8,
            timing_anomaly_score: 75.0,
            timing_expected_share: 0.3,

            trend_min_records: 5,
            trend_up_ratio: 1.1,
            trend_down_ratio: 0.9,

            strong_ctr: 0.03,
            strong_engagement: 0.05,
            weak_ctr: 0.01,
            min_format_variety: 3,
            threat_ctr: 0.05,
            threat_share: 0.3,

            seasonal_peak_ratio: 0.8,
            seasonal_confidence: 80.0,
            seasonal_fallback_confidence: 60.0,
            position_shift: 0.2,
            position_confidence: 75.0,
            position_stable_confidence: 65.0,
            creative_dominance_share: 0.5,
            creative_confidence: 70.0,
            creative_mixed_confidence: 60.0,
            creative_fallback_confidence: 50.0,

            score_base: 50.0,
            score_per_opportunity: 5.0,
            score_per_threat: -5.0,
            score_per_trend_insight: 2.0,
            score_per_strength: 3.0,
            score_per_weakness: -3.0,
            score_per_up_trend: 10.0,
            score_per_down_trend: -10.0,
            score_per_severe_anomaly: -4.0,

            top_performer_score: 70.0,
            rising_score: 55.0,
            declining_score: 45.0,
        }
    }
}
