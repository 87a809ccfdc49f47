use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use insight_core::{
    stats, AdRecord, AnalysisConfig, AnalysisError, Impact, Insight, InsightCategory, InsightKind,
    PatternAnalyzer,
};

/// Extracts performance, creative, targeting and timing patterns from one
/// competitor's ad set. Confidence values are fixed per insight type: this
/// is a heuristic engine, not a learned model.
pub struct PatternAnalysisEngine {
    config: AnalysisConfig,
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl PatternAnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn performance_patterns(
        &self,
        ads: &[AdRecord],
        now: DateTime<Utc>,
        insights: &mut Vec<Insight>,
    ) {
        let ctrs: Vec<f64> = ads.iter().map(|a| a.ctr).collect();
        let mean_ctr = stats::mean(&ctrs);
        let mean_cpm = stats::mean(&ads.iter().map(|a| a.cpm).collect::<Vec<_>>());
        let mean_engagement = stats::mean(&ads.iter().map(|a| a.engagement).collect::<Vec<_>>());

        let mut by_ctr: Vec<&AdRecord> = ads.iter().collect();
        by_ctr.sort_by(|a, b| b.ctr.partial_cmp(&a.ctr).unwrap_or(std::cmp::Ordering::Equal));
        let top: Vec<&AdRecord> = by_ctr.into_iter().take(3).collect();

        if let Some(best) = top.first() {
            if best.ctr >= mean_ctr {
                let delta = best.ctr - mean_ctr;
                let impact = if mean_ctr > 0.0 && best.ctr >= 2.0 * mean_ctr {
                    Impact::High
                } else {
                    Impact::Medium
                };
                let data_points: Vec<String> = top
                    .iter()
                    .map(|ad| format!("{}: CTR {:.4}", ad.id, ad.ctr))
                    .chain([format!(
                        "set means: CTR {:.4}, CPM {:.2}, engagement {:.4}",
                        mean_ctr, mean_cpm, mean_engagement
                    )])
                    .collect();
                insights.push(
                    Insight::new(
                        InsightKind::Opportunity,
                        "Top Performing Creative",
                        format!(
                            "Best ad beats the set average CTR by {:.4} ({:.4} vs {:.4})",
                            delta, best.ctr, mean_ctr
                        ),
                        70.0,
                        impact,
                        InsightCategory::Creative,
                        now,
                    )
                    .with_data_points(data_points)
                    .with_recommendations(vec![
                        "Study the top creative's hook and format for your own campaigns"
                            .to_string(),
                    ]),
                );
            }
        }

        let cutoff = now - Duration::days(self.config.recent_days);
        let recent_ctrs: Vec<f64> = ads
            .iter()
            .filter(|a| a.created_at >= cutoff)
            .map(|a| a.ctr)
            .collect();
        if !recent_ctrs.is_empty() && mean_ctr > 0.0 {
            let recent_mean = stats::mean(&recent_ctrs);
            if recent_mean >= self.config.improving_trend_ratio * mean_ctr {
                insights.push(
                    Insight::new(
                        InsightKind::Trend,
                        "Improving Performance Trend",
                        format!(
                            "Recent CTR ({:.4}) runs {:.0}% above the overall mean ({:.4})",
                            recent_mean,
                            (recent_mean / mean_ctr - 1.0) * 100.0,
                            mean_ctr
                        ),
                        self.config.performance_trend_confidence,
                        Impact::Medium,
                        InsightCategory::Content,
                        now,
                    )
                    .with_data_points(vec![
                        format!("recent mean CTR: {:.4} ({} ads)", recent_mean, recent_ctrs.len()),
                        format!("overall mean CTR: {:.4} ({} ads)", mean_ctr, ads.len()),
                    ])
                    .with_timeframe(format!("{} days", self.config.recent_days)),
                );
            }
        }
    }

    fn creative_patterns(&self, ads: &[AdRecord], now: DateTime<Utc>, insights: &mut Vec<Insight>) {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut index = 0usize;
        for ad in ads {
            for word in ad.text().to_lowercase().split_whitespace() {
                let word = word.trim_matches(|c: char| !c.is_alphanumeric());
                if word.len() < self.config.min_theme_word_len {
                    continue;
                }
                let entry = counts.entry(word.to_string()).or_insert((0, index));
                entry.0 += 1;
                index += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (freq, first))| (word, freq, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        let themes: Vec<(String, usize)> =
            ranked.into_iter().take(3).map(|(w, f, _)| (w, f)).collect();

        if themes.is_empty() {
            return;
        }

        let theme_list = themes
            .iter()
            .map(|(w, _)| w.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        insights.push(
            Insight::new(
                InsightKind::Trend,
                "Dominant Creative Themes",
                format!("Recurring themes across ad copy: {}", theme_list),
                self.config.creative_trend_confidence,
                Impact::Medium,
                InsightCategory::Creative,
                now,
            )
            .with_data_points(
                themes
                    .iter()
                    .map(|(w, f)| format!("{} ({} mentions)", w, f))
                    .collect(),
            ),
        );
    }

    /// Audience label for a record: caller-supplied wins, otherwise a
    /// deterministic call-to-action heuristic.
    fn audience_label(ad: &AdRecord) -> String {
        if let Some(audience) = &ad.audience {
            return audience.clone();
        }
        let cta = ad.call_to_action.to_lowercase();
        if ["shop", "buy", "koop", "bestel", "order"].iter().any(|v| cta.contains(v)) {
            "shoppers".to_string()
        } else if ["sign up", "subscribe", "register", "aanmeld"].iter().any(|v| cta.contains(v)) {
            "subscribers".to_string()
        } else if ["learn", "lees", "meer info", "discover", "ontdek"].iter().any(|v| cta.contains(v)) {
            "researchers".to_string()
        } else {
            "general".to_string()
        }
    }

    fn targeting_patterns(&self, ads: &[AdRecord], now: DateTime<Utc>, insights: &mut Vec<Insight>) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for ad in ads {
            *counts.entry(Self::audience_label(ad)).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let Some((primary, primary_count)) = ranked.first().cloned() else {
            return;
        };
        // Strict majority required before calling it a focus
        if primary_count * 2 <= ads.len() {
            return;
        }

        let secondary = ranked.get(1).map(|(label, _)| label.clone());
        let description = match &secondary {
            Some(sec) => format!(
                "{} of {} ads target {} (secondary audience: {})",
                primary_count,
                ads.len(),
                primary,
                sec
            ),
            None => format!("All {} ads target {}", ads.len(), primary),
        };

        insights.push(
            Insight::new(
                InsightKind::Trend,
                "Primary Audience Focus",
                description,
                70.0,
                Impact::Medium,
                InsightCategory::Targeting,
                now,
            )
            .with_data_points(
                ranked
                    .iter()
                    .map(|(label, count)| format!("{}: {} ads", label, count))
                    .collect(),
            ),
        );
    }

    fn timing_patterns(&self, ads: &[AdRecord], now: DateTime<Utc>, insights: &mut Vec<Insight>) {
        let mut hour_buckets: HashMap<u32, Vec<f64>> = HashMap::new();
        let mut day_buckets: HashMap<Weekday, Vec<f64>> = HashMap::new();
        for ad in ads {
            hour_buckets
                .entry(ad.created_at.hour())
                .or_default()
                .push(ad.engagement);
            day_buckets
                .entry(ad.created_at.weekday())
                .or_default()
                .push(ad.engagement);
        }

        let hour_means: Vec<(u32, f64)> = hour_buckets
            .into_iter()
            .map(|(hour, vals)| (hour, stats::mean(&vals)))
            .collect();
        let day_means: Vec<(Weekday, f64)> = day_buckets
            .into_iter()
            .map(|(day, vals)| (day, stats::mean(&vals)))
            .collect();

        let max_hour = hour_means.iter().map(|(_, m)| *m).fold(0.0_f64, f64::max);
        let max_day = day_means.iter().map(|(_, m)| *m).fold(0.0_f64, f64::max);
        if max_hour <= 0.0 && max_day <= 0.0 {
            return;
        }

        let mut optimal: Vec<String> = Vec::new();
        if max_hour > 0.0 {
            let mut hours: Vec<u32> = hour_means
                .iter()
                .filter(|(_, m)| *m >= self.config.optimal_time_ratio * max_hour)
                .map(|(h, _)| *h)
                .collect();
            hours.sort_unstable();
            optimal.extend(hours.into_iter().map(|h| format!("{:02}:00", h)));
        }
        if max_day > 0.0 {
            let mut days: Vec<Weekday> = day_means
                .iter()
                .filter(|(_, m)| *m >= self.config.optimal_time_ratio * max_day)
                .map(|(d, _)| *d)
                .collect();
            days.sort_by_key(|d| d.num_days_from_monday());
            optimal.extend(days.into_iter().map(|d| weekday_name(d).to_string()));
        }

        if optimal.is_empty() {
            return;
        }

        insights.push(
            Insight::new(
                InsightKind::Recommendation,
                "Optimal Posting Times",
                format!("Engagement peaks around: {}", optimal.join(", ")),
                self.config.timing_confidence,
                Impact::Low,
                InsightCategory::Timing,
                now,
            )
            .with_data_points(optimal)
            .with_recommendations(vec![
                "Schedule launches in the competitor's quiet hours or contest their peaks"
                    .to_string(),
            ]),
        );
    }
}

impl PatternAnalyzer for PatternAnalysisEngine {
    fn analyze(&self, ads: &[AdRecord], now: DateTime<Utc>) -> Result<Vec<Insight>, AnalysisError> {
        // Empty input yields no insights, not an error
        if ads.is_empty() {
            return Ok(Vec::new());
        }

        let mut insights = Vec::new();
        self.performance_patterns(ads, now, &mut insights);
        self.creative_patterns(ads, now, &mut insights);
        self.targeting_patterns(ads, now, &mut insights);
        self.timing_patterns(ads, now, &mut insights);

        tracing::debug!(ads = ads.len(), insights = insights.len(), "pattern analysis done");
        Ok(insights)
    }
}
