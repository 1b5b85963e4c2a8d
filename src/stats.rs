//! Rating statistics used by the outlier report.
//!
//! Means and standard deviations are population statistics over the per-title
//! average ratings of one kind (books or movies).

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self { count: values.len(), mean, stddev: variance.sqrt() })
    }

    /// `None` when the spread is zero and no title can stand out.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        (self.stddev > f64::EPSILON).then(|| (value - self.mean) / self.stddev)
    }
}

/// Returns `(item, z_score)` for every item whose `|z|` is strictly above `threshold`.
pub fn outliers<T>(items: Vec<(T, f64)>, threshold: f64) -> Vec<(T, f64)> {
    if items.len() < 2 {
        return Vec::new();
    }
    let values: Vec<f64> = items.iter().map(|(_, v)| *v).collect();
    let Some(summary) = Summary::from_values(&values) else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|(item, value)| {
            let z = summary.z_score(value)?;
            (z.abs() > threshold).then_some((item, z))
        })
        .collect()
}
