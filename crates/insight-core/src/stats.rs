//! Shared statistics helpers for the analyzer engines.
//!
//! The std deviation here is the population form (variance over n, not
//! n-1): outlier flagging is calibrated against it, and the borderline
//! cases sit close enough to the 2-sigma cutoff that the sample form
//! would flip them.

/// Mean of a slice; 0.0 for empty input.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation; 0.0 for fewer than 2 values.
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// z-score of `value` against `data`; 0.0 when variance vanishes.
pub fn z_score(value: f64, data: &[f64]) -> f64 {
    let sd = population_std_dev(data);
    if sd < f64::EPSILON {
        return 0.0;
    }
    (value - mean(data)) / sd
}
