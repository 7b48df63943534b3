//! Linear domain → pixel scales and their axis ticks.

use crate::config::{DOMAIN_PAD_HIGH, DOMAIN_PAD_LOW, MAX_TICK_COUNT};
use crate::error::ChartError;
use crate::models::{Dimension, Record};
use crate::stats::extent;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// A linear mapping from a data domain to a pixel range.
///
/// Scales are values: a new selection produces a new scale, nothing is mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to a pixel coordinate. A degenerate domain maps to the range midpoint.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0 + (r1 - r0) * 0.5;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Map a pixel coordinate back into the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0 + (d1 - d0) * 0.5;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    /// Roughly `count` round tick values inside the domain, plus the step between them.
    /// `count` is capped at [`MAX_TICK_COUNT`].
    pub fn ticks(&self, count: usize) -> (Vec<f64>, f64) {
        let count = count.min(MAX_TICK_COUNT);
        let (mut start, mut stop) = self.domain;
        if !(start.is_finite() && stop.is_finite()) || count == 0 {
            return (Vec::new(), 0.0);
        }
        if start == stop {
            return (vec![start], 0.0);
        }
        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }
        let (i1, i2, inc) = tick_spec(start, stop, count as f64);
        if i2 < i1 {
            return (Vec::new(), 0.0);
        }
        let n = (i2 - i1 + 1.0) as usize;
        let mut ticks: Vec<f64> = (0..n)
            .map(|i| {
                let k = i1 + i as f64;
                if inc < 0.0 { k / -inc } else { k * inc }
            })
            .collect();
        if reverse {
            ticks.reverse();
        }
        let step = if inc < 0.0 { 1.0 / -inc } else { inc };
        (ticks, step)
    }
}

/// d3's tick-increment: steps of 1, 2 or 5 × 10^n. A negative increment encodes `1 / -inc`
/// to keep sub-unit steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, inc)
    }
}

/// Format a tick value with the precision its step needs and thousands separators,
/// e.g. `45,000` or `12.5`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let grouped = match int_part.parse::<u64>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::with_capacity(fixed.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Scale for a dimension with the default `0.8 × min .. 1.2 × max` domain padding.
pub fn compute_scale(
    records: &[Record],
    dim: impl Into<Dimension>,
    range_min: f64,
    range_max: f64,
) -> Result<LinearScale, ChartError> {
    compute_scale_padded(
        records,
        dim,
        (range_min, range_max),
        (DOMAIN_PAD_LOW, DOMAIN_PAD_HIGH),
    )
}

/// Scale for a dimension with explicit `(low, high)` padding factors.
pub fn compute_scale_padded(
    records: &[Record],
    dim: impl Into<Dimension>,
    range: (f64, f64),
    pad: (f64, f64),
) -> Result<LinearScale, ChartError> {
    let (min, max) = extent(records, dim.into()).ok_or(ChartError::EmptyDataset)?;
    Ok(LinearScale::new((pad.0 * min, pad.1 * max), range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_pick_round_steps() {
        let s = LinearScale::new((10.24, 21.72), (0.0, 800.0));
        let (ticks, step) = s.ticks(10);
        assert_eq!(step, 1.0);
        assert_eq!(ticks.first().copied(), Some(11.0));
        assert_eq!(ticks.last().copied(), Some(21.0));

        let s = LinearScale::new((34_400.0, 85_200.0), (500.0, 0.0));
        let (ticks, step) = s.ticks(10);
        assert_eq!(step, 5_000.0);
        assert_eq!(ticks, (7..=17).map(|k| k as f64 * 5_000.0).collect::<Vec<_>>());
    }

    #[test]
    fn sub_unit_ticks_stay_exact() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let (ticks, step) = s.ticks(10);
        assert_eq!(step, 0.1);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(format_tick(ticks[3], step), "0.3");
    }

    #[test]
    fn tick_labels_group_thousands() {
        assert_eq!(format_tick(45_000.0, 5_000.0), "45,000");
        assert_eq!(format_tick(12.0, 1.0), "12");
        assert_eq!(format_tick(12.5, 0.5), "12.5");
        assert_eq!(format_tick(-2.0, 1.0), "-2");
    }

    #[test]
    fn tick_count_is_capped() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let (ticks, step) = s.ticks(usize::MAX);
        assert!(step > 0.0);
        assert!(ticks.len() <= MAX_TICK_COUNT + 1, "{}", ticks.len());
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::new((0.0, 0.0), (0.0, 100.0));
        assert_eq!(s.map(0.0), 50.0);
    }

    #[test]
    fn invert_undoes_map() {
        let s = LinearScale::new((10.0, 20.0), (400.0, 0.0));
        assert!((s.invert(s.map(13.0)) - 13.0).abs() < 1e-9);
    }
}
