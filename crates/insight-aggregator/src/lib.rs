use std::collections::HashMap;

use anomaly_detection::AnomalyDetectionEngine;
use chrono::{DateTime, Utc};
use insight_core::{
    AdRecord, AnalysisConfig, AnomalyDetection, AnomalyDetector, AnomalyKind, CompetitorInsight,
    CompetitorProfile, Impact, Insight, InsightCategory, InsightKind, PatternAnalyzer,
    SentimentAnalysis, SentimentAnalyzer, SentimentLabel, Severity, TrendAnalysis, TrendAnalyzer,
    TrendDirection,
};
use pattern_analysis::PatternAnalysisEngine;
use prediction_engine::PredictionEngine;
use rayon::prelude::*;
use sentiment_analysis::SentimentAnalysisEngine;
use swot_analysis::SwotSynthesizer;
use trend_analysis::TrendAnalysisEngine;

mod market;
pub use market::*;

/// Orchestrates every analyzer engine per competitor and rolls the results
/// into immutable [`CompetitorInsight`] values. Stateless: all data comes
/// in as parameters and all results go out as new values, so callers own
/// any caching.
pub struct InsightAggregator {
    config: AnalysisConfig,
    pattern_engine: PatternAnalysisEngine,
    sentiment_engine: SentimentAnalysisEngine,
    anomaly_engine: AnomalyDetectionEngine,
    trend_engine: TrendAnalysisEngine,
    swot_synthesizer: SwotSynthesizer,
    prediction_engine: PredictionEngine,
}

impl InsightAggregator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            pattern_engine: PatternAnalysisEngine::new(config.clone()),
            sentiment_engine: SentimentAnalysisEngine::new(config.clone()),
            anomaly_engine: AnomalyDetectionEngine::new(config.clone()),
            trend_engine: TrendAnalysisEngine::new(config.clone()),
            swot_synthesizer: SwotSynthesizer::new(config.clone()),
            prediction_engine: PredictionEngine::new(config.clone()),
            config,
        }
    }

    /// Analyze all competitors' ads. Records with an unknown competitor id
    /// are ignored; competitors with no matching records are skipped. The
    /// output preserves the input competitor order.
    pub fn analyze_competitor_ads(
        &self,
        ads: &[AdRecord],
        competitors: &[CompetitorProfile],
    ) -> Vec<CompetitorInsight> {
        self.analyze_at(ads, competitors, Utc::now())
    }

    /// Same as [`analyze_competitor_ads`](Self::analyze_competitor_ads) but
    /// with an explicit reference instant, making the whole pipeline a pure
    /// function of its inputs.
    pub fn analyze_at(
        &self,
        ads: &[AdRecord],
        competitors: &[CompetitorProfile],
        now: DateTime<Utc>,
    ) -> Vec<CompetitorInsight> {
        let mut grouped: HashMap<&str, Vec<AdRecord>> = HashMap::new();
        for ad in ads {
            grouped
                .entry(ad.competitor_id.as_str())
                .or_default()
                .push(ad.clone());
        }

        tracing::info!(
            ads = ads.len(),
            competitors = competitors.len(),
            matched = grouped.len(),
            "starting competitor analysis"
        );

        // Competitors are independent; rayon's indexed collect keeps the
        // input order
        competitors
            .par_iter()
            .filter_map(|competitor| {
                let competitor_ads = grouped.get(competitor.id.as_str())?;
                Some(self.analyze_competitor(competitor, competitor_ads, now))
            })
            .collect()
    }

    fn analyze_competitor(
        &self,
        competitor: &CompetitorProfile,
        ads: &[AdRecord],
        now: DateTime<Utc>,
    ) -> CompetitorInsight {
        let mut insights = match self.pattern_engine.analyze(ads, now) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(competitor = %competitor.id, "pattern analysis failed: {e}");
                Vec::new()
            }
        };
        insights.extend(self.prediction_engine.forecast(ads, now));

        let sentiment = match self.sentiment_engine.analyze(ads) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(competitor = %competitor.id, "sentiment analysis failed: {e}");
                SentimentAnalysis::neutral()
            }
        };
        if let Some(insight) = self.sentiment_insight(&sentiment, now) {
            insights.push(insight);
        }

        let anomalies = match self.anomaly_engine.detect(ads, now) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(competitor = %competitor.id, "anomaly detection failed: {e}");
                Vec::new()
            }
        };
        for anomaly in anomalies.iter().filter(|a| a.severity == Severity::Critical) {
            insights.push(self.anomaly_insight(anomaly, now));
        }

        let trends = match self.trend_engine.analyze(ads, now) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(competitor = %competitor.id, "trend analysis failed: {e}");
                Vec::new()
            }
        };

        let swot = self.swot_synthesizer.synthesize(ads, now);
        let overall_score = self.score(&insights, &trends, &swot, &anomalies);
        let risk_level = swot.risk_level();

        tracing::debug!(
            competitor = %competitor.id,
            insights = insights.len(),
            trends = trends.len(),
            anomalies = anomalies.len(),
            overall_score,
            "competitor analysis complete"
        );

        CompetitorInsight {
            competitor_id: competitor.id.clone(),
            competitor_name: competitor.name.clone(),
            insights,
            trends,
            strengths: swot.strengths,
            weaknesses: swot.weaknesses,
            opportunities: swot.opportunities,
            threats: swot.threats,
            overall_score,
            risk_level,
            sentiment,
            anomalies,
            last_updated: now,
        }
    }

    fn sentiment_insight(
        &self,
        sentiment: &SentimentAnalysis,
        now: DateTime<Utc>,
    ) -> Option<Insight> {
        let (title, description) = match sentiment.overall {
            SentimentLabel::Positive => (
                "Positive Ad Copy Tone",
                format!("Ad copy leans positive (score {:+.2})", sentiment.score),
            ),
            SentimentLabel::Negative => (
                "Negative Ad Copy Tone",
                format!("Ad copy leans negative (score {:+.2})", sentiment.score),
            ),
            SentimentLabel::Neutral => return None,
        };
        Some(
            Insight::new(
                InsightKind::Sentiment,
                title,
                description,
                70.0,
                Impact::Medium,
                InsightCategory::Content,
                now,
            )
            .with_data_points(
                sentiment
                    .keywords
                    .iter()
                    .take(3)
                    .map(|k| format!("{} (x{})", k.word, k.frequency))
                    .collect(),
            ),
        )
    }

    fn anomaly_insight(&self, anomaly: &AnomalyDetection, now: DateTime<Utc>) -> Insight {
        let category = match anomaly.kind {
            AnomalyKind::Performance => InsightCategory::Content,
            AnomalyKind::Spend => InsightCategory::Budget,
            AnomalyKind::Creative => InsightCategory::Creative,
            AnomalyKind::Timing => InsightCategory::Timing,
        };
        Insight::new(
            InsightKind::Anomaly,
            "Critical Statistical Anomaly",
            anomaly.description.clone(),
            anomaly.score,
            Impact::High,
            category,
            now,
        )
        .with_recommendations(anomaly.recommendations.clone())
    }

    /// Competitor score: fixed base adjusted by per-item increments, then
    /// clamped to [0, 100]
    fn score(
        &self,
        insights: &[Insight],
        trends: &[TrendAnalysis],
        swot: &swot_analysis::SwotSummary,
        anomalies: &[AnomalyDetection],
    ) -> f64 {
        let cfg = &self.config;
        let mut score = cfg.score_base;

        for insight in insights {
            score += match insight.kind {
                InsightKind::Opportunity => cfg.score_per_opportunity,
                InsightKind::Threat => cfg.score_per_threat,
                InsightKind::Trend => cfg.score_per_trend_insight,
                InsightKind::Recommendation
                | InsightKind::Prediction
                | InsightKind::Anomaly
                | InsightKind::Sentiment => 0.0,
            };
        }
        for trend in trends {
            score += match trend.direction {
                TrendDirection::Up => cfg.score_per_up_trend,
                TrendDirection::Down => cfg.score_per_down_trend,
                TrendDirection::Stable => 0.0,
            };
        }
        score += swot.strengths.len() as f64 * cfg.score_per_strength;
        score += swot.weaknesses.len() as f64 * cfg.score_per_weakness;
        score += anomalies
            .iter()
            .filter(|a| a.severity >= Severity::High)
            .count() as f64
            * cfg.score_per_severe_anomaly;

        score.clamp(0.0, 100.0)
    }
}

impl Default for InsightAggregator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
