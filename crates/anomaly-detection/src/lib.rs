use chrono::{DateTime, Duration, Utc};
use insight_core::{
    stats, AdRecord, AnalysisConfig, AnalysisError, AnomalyDetection, AnomalyDetector, AnomalyKind,
    Severity,
};

/// Statistical outlier detection across performance, spend and timing.
///
/// Performance and spend use z-scores against the population standard
/// deviation of the ad set; timing flags publication bursts inside the
/// activity window.
pub struct AnomalyDetectionEngine {
    config: AnalysisConfig,
}

struct Dimension {
    kind: AnomalyKind,
    critical_z: f64,
    high_z: f64,
    score_scale: f64,
    metric_name: &'static str,
}

impl AnomalyDetectionEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn severity(dim: &Dimension, deviation: f64) -> Severity {
        if deviation > dim.critical_z {
            Severity::Critical
        } else if deviation > dim.high_z {
            Severity::High
        } else {
            Severity::Medium
        }
    }

    fn detect_dimension(
        &self,
        ads: &[AdRecord],
        values: &[f64],
        dim: &Dimension,
        out: &mut Vec<AnomalyDetection>,
    ) {
        let mu = stats::mean(values);
        let sigma = stats::population_std_dev(values);
        // Zero variance: nothing can be an outlier
        if sigma < f64::EPSILON {
            return;
        }

        for (ad, &value) in ads.iter().zip(values) {
            let deviation = (value - mu).abs() / sigma;
            if deviation <= self.config.anomaly_flag_z {
                continue;
            }
            let severity = Self::severity(dim, deviation);
            let score = (deviation * dim.score_scale).min(100.0);
            tracing::debug!(
                ad = %ad.id,
                metric = dim.metric_name,
                deviation,
                ?severity,
                "flagged outlier"
            );
            out.push(AnomalyDetection {
                kind: dim.kind,
                severity,
                score,
                description: format!(
                    "Ad {} has {} {:.4}, {:.1} standard deviations from the set mean {:.4}",
                    ad.id, dim.metric_name, value, deviation, mu
                ),
                expected_value: mu,
                actual_value: value,
                deviation,
                recommendations: vec![format!(
                    "Inspect ad {} for the cause of the unusual {}",
                    ad.id, dim.metric_name
                )],
            });
        }
    }

    fn detect_timing(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
        out: &mut Vec<AnomalyDetection>,
    ) {
        let cutoff = now - Duration::days(self.config.activity_window_days);
        let recent = ads.iter().filter(|a| a.created_at >= cutoff).count();
        let total = ads.len();
        if (recent as f64) <= self.config.timing_burst_share * total as f64 {
            return;
        }

        let expected = self.config.timing_expected_share * total as f64;
        out.push(AnomalyDetection {
            kind: AnomalyKind::Timing,
            severity: Severity::Medium,
            score: self.config.timing_anomaly_score,
            description: format!(
                "{} of {} ads launched within the last {} days - unusual publication burst",
                recent, total, self.config.activity_window_days
            ),
            expected_value: expected,
            actual_value: recent as f64,
            deviation: recent as f64 / expected,
            recommendations: vec![
                "A launch burst often precedes a campaign push; watch this competitor closely"
                    .to_string(),
            ],
        });
    }
}

impl AnomalyDetector for AnomalyDetectionEngine {
    fn detect(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<AnomalyDetection>, AnalysisError> {
        if ads.len() < self.config.anomaly_min_records {
            return Ok(Vec::new());
        }

        let mut anomalies = Vec::new();

        let ctrs: Vec<f64> = ads.iter().map(|a| a.ctr).collect();
        self.detect_dimension(
            ads,
            &ctrs,
            &Dimension {
                kind: AnomalyKind::Performance,
                critical_z: self.config.performance_critical_z,
                high_z: self.config.performance_high_z,
                score_scale: self.config.performance_score_scale,
                metric_name: "CTR",
            },
            &mut anomalies,
        );

        let spends: Vec<f64> = ads.iter().map(|a| a.spend).collect();
        self.detect_dimension(
            ads,
            &spends,
            &Dimension {
                kind: AnomalyKind::Spend,
                critical_z: self.config.spend_critical_z,
                high_z: self.config.spend_high_z,
                score_scale: self.config.spend_score_scale,
                metric_name: "spend",
            },
            &mut anomalies,
        );

        self.detect_timing(ads, now, &mut anomalies);

        Ok(anomalies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use insight_core::AdFormat;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn ad(id: &str, ctr: f64, spend: f64, days_ago: i64) -> AdRecord {
        AdRecord {
            id: id.into(),
            competitor_id: "c1".into(),
            title: String::new(),
            content: String::new(),
            format: AdFormat::Image,
            ctr,
            cpm: 4.0,
            spend,
            engagement: 0.02,
            call_to_action: String::new(),
            audience: None,
            created_at: fixed_now() - Duration::days(days_ago),
        }
    }

    fn engine() -> AnomalyDetectionEngine {
        AnomalyDetectionEngine::new(AnalysisConfig::default())
    }

    #[test]
    fn fewer_than_three_records_yield_nothing() {
        let ads = vec![ad("a1", 0.01, 100.0, 30), ad("a2", 0.9, 9000.0, 30)];
        assert!(engine().detect(&ads, fixed_now()).unwrap().is_empty());
    }

    #[test]
    fn zero_variance_ctr_never_flags() {
        let ads = vec![
            ad("a1", 0.02, 100.0, 30),
            ad("a2", 0.02, 100.0, 30),
            ad("a3", 0.02, 100.0, 30),
            ad("a4", 0.02, 100.0, 30),
        ];
        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        assert!(anomalies
            .iter()
            .all(|a| a.kind != AnomalyKind::Performance && a.kind != AnomalyKind::Spend));
    }

    #[test]
    fn borderline_outlier_stays_under_the_flag() {
        // Regression fixture from the design review: z of the 0.10 record
        // is ~1.997, just under the 2.0 cutoff
        let ads = vec![
            ad("a1", 0.01, 100.0, 30),
            ad("a2", 0.012, 100.0, 30),
            ad("a3", 0.011, 100.0, 30),
            ad("a4", 0.009, 100.0, 30),
            ad("a5", 0.10, 100.0, 30),
        ];
        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Performance));
    }

    #[test]
    fn clear_performance_outlier_is_flagged() {
        // Six ads at ~0.01 and one at 0.10: z of the outlier is ~2.45,
        // over the 2.0 flag but under the 2.5 high cutoff
        let mut ads: Vec<AdRecord> = (0..6)
            .map(|i| ad(&format!("a{}", i), 0.01 + (i as f64) * 0.0001, 100.0, 30))
            .collect();
        ads.push(ad("hot", 0.10, 100.0, 30));

        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        let flagged: Vec<&AnomalyDetection> = anomalies
            .iter()
            .filter(|a| a.kind == AnomalyKind::Performance)
            .collect();
        assert_eq!(flagged.len(), 1);
        let hot = flagged[0];
        assert!(hot.deviation > 2.0);
        assert_eq!(hot.actual_value, 0.10);
        assert!(hot.score <= 100.0);
        assert_eq!(hot.severity, Severity::Medium);
    }

    #[test]
    fn extreme_outlier_is_critical_with_capped_score() {
        // Thirty near-identical ads plus one extreme: z is ~5.5, so the
        // 20x performance scale saturates at 100
        let mut ads: Vec<AdRecord> = (0..30)
            .map(|i| ad(&format!("a{}", i), 0.01 + (i as f64) * 0.00001, 100.0, 30))
            .collect();
        ads.push(ad("hot", 0.5, 100.0, 30));

        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        let hot = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Performance)
            .expect("performance anomaly");
        assert!(hot.deviation > 3.0);
        assert_eq!(hot.severity, Severity::Critical);
        assert_eq!(hot.score, 100.0);
    }

    #[test]
    fn spend_severity_uses_wider_thresholds() {
        // Spend outlier with z ~2.79: between 2.5 and 3.0, which would be
        // high severity on the performance thresholds but stays medium on
        // the wider spend ones
        let mut ads: Vec<AdRecord> = (0..12)
            .map(|i| ad(&format!("a{}", i), 0.01, 100.0 + (i % 3) as f64 * 40.0, 30))
            .collect();
        ads.push(ad("big", 0.01, 300.0, 30));

        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        let big = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Spend)
            .expect("spend anomaly");
        assert!(big.deviation > 2.5 && big.deviation < 3.0, "z = {}", big.deviation);
        assert_eq!(big.severity, Severity::Medium);
        // Spend scores scale by 15 rather than 20
        assert!((big.score - big.deviation * 15.0).abs() < 1e-9);
    }

    #[test]
    fn launch_burst_emits_timing_anomaly() {
        // 5 of 6 ads inside the 7-day window: 83% of the set, over the 80%
        // burst share
        let ads = vec![
            ad("a1", 0.01, 100.0, 1),
            ad("a2", 0.01, 100.0, 2),
            ad("a3", 0.01, 100.0, 3),
            ad("a4", 0.01, 100.0, 4),
            ad("a5", 0.01, 100.0, 5),
            ad("a6", 0.01, 100.0, 60),
        ];
        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        let timing = anomalies
            .iter()
            .find(|a| a.kind == AnomalyKind::Timing)
            .expect("timing anomaly");
        assert_eq!(timing.severity, Severity::Medium);
        assert_eq!(timing.score, 75.0);
        assert_eq!(timing.actual_value, 5.0);
        assert!((timing.expected_value - 1.8).abs() < 1e-9);
        assert!((timing.deviation - 5.0 / 1.8).abs() < 1e-9);
    }

    #[test]
    fn exact_burst_share_is_not_a_burst() {
        // 4 of 5 recent is exactly 80%; the rule requires strictly more
        let ads = vec![
            ad("a1", 0.01, 100.0, 1),
            ad("a2", 0.01, 100.0, 2),
            ad("a3", 0.01, 100.0, 3),
            ad("a4", 0.01, 100.0, 4),
            ad("a5", 0.01, 100.0, 60),
        ];
        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Timing));
    }

    #[test]
    fn spread_out_launches_emit_no_timing_anomaly() {
        let ads = vec![
            ad("a1", 0.01, 100.0, 1),
            ad("a2", 0.01, 100.0, 20),
            ad("a3", 0.01, 100.0, 40),
            ad("a4", 0.01, 100.0, 60),
        ];
        let anomalies = engine().detect(&ads, fixed_now()).unwrap();
        assert!(anomalies.iter().all(|a| a.kind != AnomalyKind::Timing));
    }
}
