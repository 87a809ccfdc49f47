use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use insight_core::{
    stats, AdFormat, AdRecord, AnalysisConfig, Impact, Insight, InsightCategory, InsightKind,
};

/// Short/medium-term forecasts from historical aggregates: seasonal
/// activity, market position drift, and emerging creative formats. All
/// three are heuristic projections, never a trained model.
pub struct PredictionEngine {
    config: AnalysisConfig,
}

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl PredictionEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// All three forecasts for one competitor's ad history
    pub fn forecast(&self, ads: &[AdRecord], now: DateTime<Utc>) -> Vec<Insight> {
        let forecasts = vec![
            self.seasonal(ads, now),
            self.market_position(ads, now),
            self.creative_trend(ads, now),
        ];
        tracing::debug!(ads = ads.len(), forecasts = forecasts.len(), "forecasting done");
        forecasts
    }

    /// Peak activity months: calendar-month buckets at or above 80% of the
    /// busiest month
    pub fn seasonal(&self, ads: &[AdRecord], now: DateTime<Utc>) -> Insight {
        let mut month_counts: HashMap<u32, usize> = HashMap::new();
        for ad in ads {
            *month_counts.entry(ad.created_at.month()).or_insert(0) += 1;
        }

        let max = month_counts.values().copied().max().unwrap_or(0);
        let mut peaks: Vec<u32> = month_counts
            .iter()
            .filter(|(_, &count)| count as f64 >= self.config.seasonal_peak_ratio * max as f64)
            .map(|(&month, _)| month)
            .collect();
        peaks.sort_unstable();

        if max == 0 {
            return Insight::new(
                InsightKind::Prediction,
                "Seasonal Activity Forecast",
                "No seasonal pattern detectable in the available history",
                self.config.seasonal_fallback_confidence,
                Impact::Low,
                InsightCategory::Timing,
                now,
            )
            .with_predicted_outcome("Activity expected to stay irregular");
        }

        let names: Vec<&str> = peaks
            .iter()
            .map(|&m| MONTH_NAMES[(m - 1) as usize])
            .collect();
        Insight::new(
            InsightKind::Prediction,
            "Seasonal Activity Forecast",
            format!("Ad activity historically peaks in: {}", names.join(", ")),
            self.config.seasonal_confidence,
            Impact::Medium,
            InsightCategory::Timing,
            now,
        )
        .with_data_points(
            peaks
                .iter()
                .map(|&m| {
                    format!(
                        "{}: {} ads",
                        MONTH_NAMES[(m - 1) as usize],
                        month_counts[&m]
                    )
                })
                .collect(),
        )
        .with_recommendations(vec![
            "Budget defensively ahead of the competitor's peak months".to_string(),
        ])
        .with_predicted_outcome(format!("Elevated activity expected in {}", names.join(", ")))
    }

    /// Market position drift: last-window mean CTR against the all-time mean
    pub fn market_position(&self, ads: &[AdRecord], now: DateTime<Utc>) -> Insight {
        let all_mean = stats::mean(&ads.iter().map(|a| a.ctr).collect::<Vec<_>>());
        let cutoff = now - Duration::days(self.config.recent_days);
        let recent: Vec<f64> = ads
            .iter()
            .filter(|a| a.created_at >= cutoff)
            .map(|a| a.ctr)
            .collect();

        let shift = if all_mean > 0.0 && !recent.is_empty() {
            (stats::mean(&recent) - all_mean) / all_mean
        } else {
            0.0
        };

        let (direction, confidence) = if shift > self.config.position_shift {
            ("strengthening", self.config.position_confidence)
        } else if shift < -self.config.position_shift {
            ("weakening", self.config.position_confidence)
        } else {
            ("stable", self.config.position_stable_confidence)
        };

        Insight::new(
            InsightKind::Prediction,
            "Market Position Forecast",
            format!(
                "Competitive position looks {} ({:+.0}% CTR shift vs all-time)",
                direction,
                shift * 100.0
            ),
            confidence,
            if direction == "stable" { Impact::Low } else { Impact::Medium },
            InsightCategory::Budget,
            now,
        )
        .with_data_points(vec![
            format!("all-time mean CTR: {:.4}", all_mean),
            format!("last-{}-day ads: {}", self.config.recent_days, recent.len()),
        ])
        .with_timeframe(format!("{} days", self.config.recent_days))
        .with_predicted_outcome(format!("Market position {}", direction))
    }

    /// Emerging creative format among the recent window's ads
    pub fn creative_trend(&self, ads: &[AdRecord], now: DateTime<Utc>) -> Insight {
        let cutoff = now - Duration::days(self.config.recent_days);
        let recent: Vec<&AdRecord> = ads.iter().filter(|a| a.created_at >= cutoff).collect();

        if recent.is_empty() {
            return Insight::new(
                InsightKind::Prediction,
                "Creative Format Forecast",
                "Insufficient recent data to project a creative direction",
                self.config.creative_fallback_confidence,
                Impact::Low,
                InsightCategory::Creative,
                now,
            )
            .with_predicted_outcome("Unknown creative direction");
        }

        let mut format_counts: HashMap<AdFormat, usize> = HashMap::new();
        for ad in &recent {
            *format_counts.entry(ad.format).or_insert(0) += 1;
        }
        let (dominant, count) = format_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&f, &c)| (f, c))
            .unwrap_or((AdFormat::Other, 0));
        let share = count as f64 / recent.len() as f64;

        let mut shares: Vec<(&'static str, usize)> = format_counts
            .iter()
            .map(|(f, &c)| (f.label(), c))
            .collect();
        shares.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let data_points: Vec<String> = shares
            .iter()
            .map(|(label, c)| {
                format!("{}: {:.0}%", label, 100.0 * *c as f64 / recent.len() as f64)
            })
            .collect();

        if share > self.config.creative_dominance_share {
            Insight::new(
                InsightKind::Prediction,
                "Creative Format Forecast",
                format!(
                    "{} creatives dominate recent ads ({:.0}% share)",
                    dominant.label(),
                    share * 100.0
                ),
                self.config.creative_confidence,
                Impact::Medium,
                InsightCategory::Creative,
                now,
            )
            .with_data_points(data_points)
            .with_predicted_outcome(format!("Expect more {} creatives", dominant.label()))
        } else {
            Insight::new(
                InsightKind::Prediction,
                "Creative Format Forecast",
                "No single format dominates the recent creative mix",
                self.config.creative_mixed_confidence,
                Impact::Low,
                InsightCategory::Creative,
                now,
            )
            .with_data_points(data_points)
            .with_predicted_outcome("Mixed creative formats expected")
        }
    }
}
