use std::collections::HashMap;

use chrono::{DateTime, Utc};
use insight_core::{
    CompetitiveLandscape, CompetitorInsight, MarketInsight, MarketSentiment, SentimentLabel,
    Severity, TrendDirection,
};

use crate::InsightAggregator;

impl InsightAggregator {
    /// Roll per-competitor analyses into one market-wide report
    pub fn market_insight(
        &self,
        competitors: &[CompetitorInsight],
        now: DateTime<Utc>,
    ) -> MarketInsight {
        MarketInsight {
            market_trends: self.common_trends(competitors),
            emerging_patterns: collect_descriptions(
                competitors,
                "Creative Format Forecast",
                self.config.creative_confidence,
            ),
            seasonal_factors: collect_descriptions(
                competitors,
                "Seasonal Activity Forecast",
                self.config.seasonal_confidence,
            ),
            landscape: self.landscape(competitors),
            recommendations: self.top_recommendations(competitors),
            risk_factors: self.risk_factors(competitors),
            sentiment: self.market_sentiment(competitors),
            anomalies: competitors
                .iter()
                .flat_map(|c| c.anomalies.iter())
                .filter(|a| a.severity >= Severity::High)
                .cloned()
                .collect(),
            generated_at: now,
        }
    }

    fn landscape(&self, competitors: &[CompetitorInsight]) -> CompetitiveLandscape {
        let cfg = &self.config;
        let mut landscape = CompetitiveLandscape::default();
        for competitor in competitors {
            let ups = competitor
                .trends
                .iter()
                .filter(|t| t.direction == TrendDirection::Up)
                .count();
            let downs = competitor
                .trends
                .iter()
                .filter(|t| t.direction == TrendDirection::Down)
                .count();

            if competitor.overall_score >= cfg.top_performer_score {
                landscape.top_performers.push(competitor.competitor_name.clone());
            } else if competitor.overall_score >= cfg.rising_score && ups > 0 {
                landscape.rising.push(competitor.competitor_name.clone());
            } else if competitor.overall_score < cfg.declining_score || downs > ups {
                landscape.declining.push(competitor.competitor_name.clone());
            }
        }
        landscape
    }

    /// Trend labels shared across competitors, most common first
    fn common_trends(&self, competitors: &[CompetitorInsight]) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for competitor in competitors {
            for trend in &competitor.trends {
                *counts.entry(trend.trend.as_str()).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(5)
            .map(|(label, count)| format!("{} ({} competitors)", label, count))
            .collect()
    }

    /// Highest-confidence recommendations across all insights, deduplicated
    fn top_recommendations(&self, competitors: &[CompetitorInsight]) -> Vec<String> {
        let mut insights: Vec<_> = competitors
            .iter()
            .flat_map(|c| c.insights.iter())
            .filter(|i| !i.recommendations.is_empty())
            .collect();
        insights.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen = Vec::new();
        for insight in insights {
            for rec in &insight.recommendations {
                if !seen.contains(rec) {
                    seen.push(rec.clone());
                }
            }
            if seen.len() >= 5 {
                break;
            }
        }
        seen.truncate(5);
        seen
    }

    fn risk_factors(&self, competitors: &[CompetitorInsight]) -> Vec<String> {
        let mut factors = Vec::new();
        for competitor in competitors {
            if competitor.risk_level == insight_core::RiskLevel::High {
                factors.push(format!(
                    "{} shows high competitive risk",
                    competitor.competitor_name
                ));
            }
            let critical = competitor
                .anomalies
                .iter()
                .filter(|a| a.severity == Severity::Critical)
                .count();
            if critical > 0 {
                factors.push(format!(
                    "{} has {} critical anomalies in recent activity",
                    competitor.competitor_name, critical
                ));
            }
        }
        factors
    }

    fn market_sentiment(&self, competitors: &[CompetitorInsight]) -> MarketSentiment {
        if competitors.is_empty() {
            return MarketSentiment {
                overall: SentimentLabel::Neutral,
                average_score: 0.0,
            };
        }
        let average_score = competitors.iter().map(|c| c.sentiment.score).sum::<f64>()
            / competitors.len() as f64;
        MarketSentiment {
            overall: SentimentLabel::from_score(
                average_score,
                self.config.positive_cutoff,
                self.config.negative_cutoff,
            ),
            average_score,
        }
    }
}

fn collect_descriptions(
    competitors: &[CompetitorInsight],
    title: &str,
    min_confidence: f64,
) -> Vec<String> {
    competitors
        .iter()
        .flat_map(|c| c.insights.iter())
        .filter(|i| i.title == title && i.confidence >= min_confidence)
        .map(|i| i.description.clone())
        .collect()
}
