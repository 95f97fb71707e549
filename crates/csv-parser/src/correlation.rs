//! Pairwise Pearson correlation across numeric columns.

use rayon::prelude::*;

use crate::frame::Frame;

/// Square correlation matrix labelled by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major coefficients, `values[i][j]` pairs `labels[i]` with `labels[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Smallest and largest finite coefficient, if any.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl Frame {
    /// Correlate every pair of numeric columns using pairwise-complete rows.
    pub fn correlation(&self) -> CorrelationMatrix {
        let columns = self.numeric_columns();
        let labels: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
        let data: Vec<&[f64]> = columns
            .iter()
            .filter_map(|c| c.as_numeric().ok())
            .collect();

        let values: Vec<Vec<f64>> = (0..data.len())
            .into_par_iter()
            .map(|i| {
                (0..data.len())
                    .map(|j| {
                        let r = pearson(data[i], data[j]);
                        if i == j && r.is_finite() {
                            1.0
                        } else {
                            r
                        }
                    })
                    .collect()
            })
            .collect();

        CorrelationMatrix { labels, values }
    }
}

/// Pearson coefficient over rows where both values are present.
///
/// Returns `NaN` with fewer than two shared rows or zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(x, y)| (*x, *y))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sab, mut saa, mut sbb) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }

    let denom = (saa * sbb).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (sab / denom).clamp(-1.0, 1.0)
}
