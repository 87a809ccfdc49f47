use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use insight_core::{stats, AdFormat, AdRecord, AnalysisConfig, RiskLevel};
use serde::{Deserialize, Serialize};

/// SWOT lists derived from a competitor's ad set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwotSummary {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl SwotSummary {
    /// Risk classification from threat and weakness counts
    pub fn risk_level(&self) -> RiskLevel {
        if self.threats.len() >= 3 || self.weaknesses.len() >= 4 {
            RiskLevel::High
        } else if self.threats.len() >= 2 || self.weaknesses.len() >= 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Deterministic thresholded SWOT synthesis over one competitor's ads
pub struct SwotSynthesizer {
    config: AnalysisConfig,
}

impl SwotSynthesizer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn synthesize(&self, ads: &[AdRecord], now: DateTime<Utc>) -> SwotSummary {
        let mut summary = SwotSummary::default();
        if ads.is_empty() {
            return summary;
        }

        let mean_ctr = stats::mean(&ads.iter().map(|a| a.ctr).collect::<Vec<_>>());
        let mean_engagement = stats::mean(&ads.iter().map(|a| a.engagement).collect::<Vec<_>>());

        if mean_ctr > self.config.strong_ctr {
            summary.strengths.push(format!(
                "Above-average click-through rate ({:.4})",
                mean_ctr
            ));
        }
        if mean_engagement > self.config.strong_engagement {
            summary.strengths.push(format!(
                "Strong audience engagement ({:.4})",
                mean_engagement
            ));
        }

        if mean_ctr < self.config.weak_ctr {
            summary
                .weaknesses
                .push(format!("Low click-through rate ({:.4})", mean_ctr));
        }
        let formats: HashSet<AdFormat> = ads.iter().map(|a| a.format).collect();
        if formats.len() < self.config.min_format_variety {
            summary.weaknesses.push(format!(
                "Limited format variety ({} of {} formats in use)",
                formats.len(),
                self.config.min_format_variety
            ));
        }

        let cutoff = now - Duration::days(self.config.activity_window_days);
        let recent = ads.iter().filter(|a| a.created_at >= cutoff).count();
        if recent == 0 {
            summary.opportunities.push(format!(
                "No recent activity in the last {} days - window to capture attention",
                self.config.activity_window_days
            ));
        }

        let high_ctr = ads.iter().filter(|a| a.ctr > self.config.threat_ctr).count();
        if high_ctr as f64 / ads.len() as f64 > self.config.threat_share {
            summary.threats.push(format!(
                "Strong competitive performance ({} of {} ads above {:.2} CTR)",
                high_ctr,
                ads.len(),
                self.config.threat_ctr
            ));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn ad(ctr: f64, engagement: f64, format: AdFormat, days_ago: i64) -> AdRecord {
        AdRecord {
            id: format!("ad-{}-{}", days_ago, ctr),
            competitor_id: "c1".into(),
            title: String::new(),
            content: String::new(),
            format,
            ctr,
            cpm: 4.0,
            spend: 100.0,
            engagement,
            call_to_action: String::new(),
            audience: None,
            created_at: fixed_now() - Duration::days(days_ago),
        }
    }

    fn synth() -> SwotSynthesizer {
        SwotSynthesizer::new(AnalysisConfig::default())
    }

    #[test]
    fn strong_metrics_become_strengths() {
        let ads = vec![
            ad(0.04, 0.06, AdFormat::Image, 2),
            ad(0.05, 0.07, AdFormat::Video, 3),
            ad(0.04, 0.06, AdFormat::Carousel, 4),
        ];
        let swot = synth().synthesize(&ads, fixed_now());
        assert_eq!(swot.strengths.len(), 2);
        assert!(swot.strengths[0].contains("click-through"));
        assert!(swot.strengths[1].contains("engagement"));
    }

    #[test]
    fn weak_ctr_and_format_monoculture_are_weaknesses() {
        let ads = vec![
            ad(0.005, 0.01, AdFormat::Image, 2),
            ad(0.006, 0.01, AdFormat::Image, 3),
        ];
        let swot = synth().synthesize(&ads, fixed_now());
        assert_eq!(swot.weaknesses.len(), 2);
        assert!(swot.weaknesses[0].contains("Low click-through"));
        assert!(swot.weaknesses[1].contains("format variety"));
    }

    #[test]
    fn quiet_week_is_an_opportunity() {
        // One historical ad, nothing inside the 7-day window
        let ads = vec![ad(0.02, 0.03, AdFormat::Image, 30)];
        let swot = synth().synthesize(&ads, fixed_now());
        assert!(swot
            .opportunities
            .iter()
            .any(|o| o.contains("No recent activity")));
    }

    #[test]
    fn active_week_is_not_an_opportunity() {
        let ads = vec![ad(0.02, 0.03, AdFormat::Image, 2)];
        let swot = synth().synthesize(&ads, fixed_now());
        assert!(swot.opportunities.is_empty());
    }

    #[test]
    fn high_ctr_share_is_a_threat() {
        // 2 of 5 ads above 0.05 CTR: 40% share, over the 30% cutoff
        let ads = vec![
            ad(0.06, 0.01, AdFormat::Image, 2),
            ad(0.07, 0.01, AdFormat::Video, 3),
            ad(0.01, 0.01, AdFormat::Carousel, 4),
            ad(0.01, 0.01, AdFormat::Image, 5),
            ad(0.01, 0.01, AdFormat::Video, 6),
        ];
        let swot = synth().synthesize(&ads, fixed_now());
        assert_eq!(swot.threats.len(), 1);
        assert!(swot.threats[0].contains("Strong competitive performance"));
    }

    #[test]
    fn exact_threat_share_does_not_trigger() {
        // 3 of 10 is exactly 30%
        let mut ads: Vec<AdRecord> = (0..7).map(|i| ad(0.01, 0.01, AdFormat::Image, 2 + i)).collect();
        for i in 0..3 {
            ads.push(ad(0.06, 0.01, AdFormat::Video, 2 + i));
        }
        let swot = synth().synthesize(&ads, fixed_now());
        assert!(swot.threats.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let swot = synth().synthesize(&[], fixed_now());
        assert!(swot.strengths.is_empty());
        assert!(swot.weaknesses.is_empty());
        assert!(swot.opportunities.is_empty());
        assert!(swot.threats.is_empty());
        assert_eq!(swot.risk_level(), RiskLevel::Low);
    }

    #[test]
    fn risk_level_tiers() {
        let mut swot = SwotSummary::default();
        assert_eq!(swot.risk_level(), RiskLevel::Low);

        swot.weaknesses = vec!["w1".into(), "w2".into()];
        assert_eq!(swot.risk_level(), RiskLevel::Medium);

        swot.threats = vec!["t1".into(), "t2".into(), "t3".into()];
        assert_eq!(swot.risk_level(), RiskLevel::High);

        let heavy_weakness = SwotSummary {
            weaknesses: vec!["w1".into(), "w2".into(), "w3".into(), "w4".into()],
            ..Default::default()
        };
        assert_eq!(heavy_weakness.risk_level(), RiskLevel::High);
    }
}
