use serde::{Deserialize, Serialize};

/// Descriptive statistics of a series of values.
///
/// Every field is NaN when computed from an empty series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Difference between the maximum and the minimum.
    pub diff_min_max: f64,
}

impl Statistics {
    pub fn from_values(vals: &[f64]) -> Self {
        let min = compute_min(vals);
        let max = compute_max(vals);
        Self {
            mean: compute_mean(vals),
            std_dev: compute_var(vals).sqrt(),
            min,
            max,
            diff_min_max: (max - min).abs(),
        }
    }

    /// Values in the order mean, standard deviation, minimum, maximum, difference.
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.mean,
            self.std_dev,
            self.min,
            self.max,
            self.diff_min_max,
        ]
    }
}

fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

fn compute_var(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    let mean = compute_mean(vals);
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / vals.len() as f64
}

fn compute_min(vals: &[f64]) -> f64 {
    vals.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

fn compute_max(vals: &[f64]) -> f64 {
    vals.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}
