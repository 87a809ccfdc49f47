use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{AdFormat, AdRecord};

/// Raw ad record as ingested upstream: every field may be missing or
/// malformed. Normalization shapes it into the canonical [`AdRecord`]
/// rather than rejecting it, so aggregate statistics stay well-defined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAdRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub competitor_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub format: Option<AdFormat>,
    #[serde(default)]
    pub ctr: Option<f64>,
    #[serde(default)]
    pub cpm: Option<f64>,
    #[serde(default)]
    pub spend: Option<f64>,
    #[serde(default)]
    pub engagement: Option<f64>,
    #[serde(default)]
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Missing, negative or non-finite metrics normalize to 0.0
fn shape_metric(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Shape one raw record into the canonical model. Missing text becomes
/// empty, missing format becomes `Other`, a missing timestamp falls back
/// to the Unix epoch so the record sorts before any real window.
pub fn normalize_record(raw: RawAdRecord) -> AdRecord {
    AdRecord {
        id: raw.id.unwrap_or_default(),
        competitor_id: raw.competitor_id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        format: raw.format.unwrap_or(AdFormat::Other),
        ctr: shape_metric(raw.ctr),
        cpm: shape_metric(raw.cpm),
        spend: shape_metric(raw.spend),
        engagement: shape_metric(raw.engagement),
        call_to_action: raw.call_to_action.unwrap_or_default(),
        audience: raw.audience,
        created_at: raw
            .created_at
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    }
}

/// Normalize a batch of raw records.
pub fn normalize_records(raw: Vec<RawAdRecord>) -> Vec<AdRecord> {
    raw.into_iter().map(normalize_record).collect()
}
