use crate::models::{Dimension, Record};
use serde::{Deserialize, Serialize};

/// Summary statistics for one dimension across all records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub dimension: Dimension,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// `(min, max)` of a dimension, or `None` for an empty slice.
pub fn extent(records: &[Record], dim: Dimension) -> Option<(f64, f64)> {
    let mut it = records.iter().map(|r| r.value(dim));
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Compute statistics for each of the six dimensions.
pub fn dimension_summary(records: &[Record]) -> Vec<Summary> {
    Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let mut vals: Vec<f64> = records.iter().map(|r| r.value(dimension)).collect();
            vals.sort_by(|a, b| a.total_cmp(b));
            let count = vals.len();
            let min = vals.first().cloned();
            let max = vals.last().cloned();
            let mean = if count > 0 {
                Some(vals.iter().copied().sum::<f64>() / count as f64)
            } else {
                None
            };
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            Summary { dimension, count, min, max, mean, median }
        })
        .collect()
}
