//! Group-by aggregation over frame columns.

use std::collections::BTreeMap;

use crate::error::CsvResult;
use crate::frame::{Frame, GroupKey};

/// Reduction applied to each group's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Arithmetic mean of present values; `NaN` when none are present.
    Mean,
    /// Sum of present values; `0` when none are present.
    Sum,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Frame {
    /// Group rows by `key` and reduce `value` per group.
    ///
    /// Rows with a missing key are dropped and missing values are skipped.
    /// Groups come back sorted by key.
    pub fn group_by(
        &self,
        key: &str,
        value: &str,
        aggregation: Aggregation,
    ) -> CsvResult<Vec<(GroupKey, f64)>> {
        let key_column = self.column(key)?;
        let values = self.column(value)?.as_numeric()?;

        let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
        for (row, v) in values.iter().enumerate() {
            let Some(group) = key_column.key_at(row) else {
                continue;
            };
            let acc = groups.entry(group).or_default();
            if !v.is_nan() {
                acc.sum += v;
                acc.count += 1;
            }
        }

        Ok(groups
            .into_iter()
            .map(|(group, acc)| {
                let reduced = match aggregation {
                    Aggregation::Sum => acc.sum,
                    Aggregation::Mean if acc.count == 0 => f64::NAN,
                    Aggregation::Mean => acc.sum / acc.count as f64,
                };
                (group, reduced)
            })
            .collect())
    }

    /// Split `value` into per-category samples keyed by `key`.
    ///
    /// Category order follows [`crate::Column::categories`]; missing values
    /// are dropped from each sample.
    pub fn samples_by(&self, key: &str, value: &str) -> CsvResult<Vec<(GroupKey, Vec<f64>)>> {
        let key_column = self.column(key)?;
        let values = self.column(value)?.as_numeric()?;

        let mut samples: Vec<(GroupKey, Vec<f64>)> = key_column
            .categories()
            .into_iter()
            .map(|k| (k, Vec::new()))
            .collect();
        let index: BTreeMap<GroupKey, usize> = samples
            .iter()
            .enumerate()
            .map(|(i, (k, _))| (k.clone(), i))
            .collect();

        for (row, v) in values.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            if let Some(slot) = key_column.key_at(row).and_then(|k| index.get(&k)) {
                samples[*slot].1.push(*v);
            }
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_duplicate_groups() {
        let frame = Frame::from_csv_bytes(b"x,y\nA,1\nA,3\nB,2\n").unwrap();
        let groups = frame.group_by("x", "y", Aggregation::Mean).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.to_string(), "A");
        assert_eq!(groups[0].1, 2.0);
        assert_eq!(groups[1].0.to_string(), "B");
        assert_eq!(groups[1].1, 2.0);
    }

    #[test]
    fn test_sum_skips_missing() {
        let frame = Frame::from_csv_bytes(b"x,y\nA,1\nA,\n,5\nB,\n").unwrap();
        let groups = frame.group_by("x", "y", Aggregation::Sum).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, 1.0);
        assert_eq!(groups[1].1, 0.0);
    }

    #[test]
    fn test_numeric_keys_sorted() {
        let frame = Frame::from_csv_bytes(b"x,y\n10,1\n2,3\n10,5\n").unwrap();
        let groups = frame.group_by("x", "y", Aggregation::Mean).unwrap();
        let keys: Vec<f64> = groups.iter().filter_map(|(k, _)| k.as_number()).collect();
        assert_eq!(keys, vec![2.0, 10.0]);
        assert_eq!(groups[1].1, 3.0);
    }

    #[test]
    fn test_text_values_rejected() {
        let frame = Frame::from_csv_bytes(b"x,y\nA,b\n").unwrap();
        assert!(frame.group_by("x", "y", Aggregation::Mean).is_err());
    }

    #[test]
    fn test_samples_by_appearance_order() {
        let frame = Frame::from_csv_bytes(b"g,v\nz,1\na,2\nz,3\na,\n").unwrap();
        let samples = frame.samples_by("g", "v").unwrap();
        assert_eq!(samples[0].0.to_string(), "z");
        assert_eq!(samples[0].1, vec![1.0, 3.0]);
        assert_eq!(samples[1].1, vec![2.0]);
    }
}
