use chrono::{DateTime, Duration, Utc};
use insight_core::{
    stats, AdRecord, AnalysisConfig, AnalysisError, Impact, TrendAnalysis, TrendAnalyzer,
    TrendDirection,
};

/// Computes direction, strength and confidence for CTR, engagement and
/// spend by comparing the recent-window mean against the full-set mean.
pub struct TrendAnalysisEngine {
    config: AnalysisConfig,
}

impl TrendAnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn analyze_metric(
        &self,
        name: &str,
        ads: &[AdRecord],
        now: DateTime<Utc>,
        metric: impl Fn(&AdRecord) -> f64,
    ) -> Option<TrendAnalysis> {
        let all: Vec<f64> = ads.iter().map(&metric).collect();
        let historical_mean = stats::mean(&all);
        if historical_mean <= 0.0 {
            return None;
        }

        let cutoff = now - Duration::days(self.config.recent_days);
        let recent: Vec<f64> = ads
            .iter()
            .filter(|a| a.created_at >= cutoff)
            .map(&metric)
            .collect();
        if recent.is_empty() {
            return None;
        }

        let recent_mean = stats::mean(&recent);
        let ratio = recent_mean / historical_mean;
        let direction = if ratio >= self.config.trend_up_ratio {
            TrendDirection::Up
        } else if ratio <= self.config.trend_down_ratio {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };

        let strength = ((ratio - 1.0).abs() * 100.0).clamp(0.0, 100.0);
        // Confidence grows with recent sample size, capped well below
        // certainty: these are heuristics over noisy observations
        let confidence = (40.0 + 5.0 * recent.len().min(10) as f64).min(90.0);
        let impact = if strength > 50.0 {
            Impact::High
        } else if strength > 20.0 {
            Impact::Medium
        } else {
            Impact::Low
        };

        Some(TrendAnalysis {
            trend: format!("{} {}", name, match direction {
                TrendDirection::Up => "rising",
                TrendDirection::Down => "falling",
                TrendDirection::Stable => "stable",
            }),
            direction,
            strength,
            confidence,
            timeframe: format!("{} days", self.config.recent_days),
            indicators: vec![
                format!("recent mean {}: {:.4} ({} ads)", name, recent_mean, recent.len()),
                format!("historical mean {}: {:.4} ({} ads)", name, historical_mean, ads.len()),
            ],
            impact,
        })
    }
}

impl TrendAnalyzer for TrendAnalysisEngine {
    fn analyze(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendAnalysis>, AnalysisError> {
        if ads.len() < self.config.trend_min_records {
            return Ok(Vec::new());
        }

        let trends: Vec<TrendAnalysis> = [
            self.analyze_metric("CTR", ads, now, |a| a.ctr),
            self.analyze_metric("engagement", ads, now, |a| a.engagement),
            self.analyze_metric("spend", ads, now, |a| a.spend),
        ]
        .into_iter()
        .flatten()
        .collect();

        tracing::debug!(ads = ads.len(), trends = trends.len(), "trend analysis done");
        Ok(trends)
    }
}
