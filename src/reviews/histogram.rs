use super::dataset::{ReviewRecord, SENTIMENT_SCORE_COLUMN, parse_finite};
use crate::core::PipelineError;

pub const DEFAULT_BIN_COUNT: usize = 10;

/// One equal-width bin. Every bin is `[range_low, range_high)` except the
/// last, which also includes `range_high`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub range_low: f64,
    pub range_high: f64,
    pub count: usize,
}

/// Count `field` values into `bin_count` equal-width bins spanning `[min, max]`.
///
/// Empty input gives no buckets. When every value is equal, all bins have
/// zero width and the first one holds every record.
pub fn histogram<'a, I>(
    records: I,
    field: &str,
    bin_count: usize,
) -> Result<Vec<HistogramBucket>, PipelineError>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    if bin_count == 0 {
        return Err(PipelineError::InvalidBinCount);
    }

    let values = records
        .into_iter()
        .map(|record| field_value(record, field))
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(bin_values(&values, bin_count))
}

fn field_value(record: &ReviewRecord, field: &str) -> Result<f64, PipelineError> {
    if field == SENTIMENT_SCORE_COLUMN {
        return Ok(record.sentiment_score);
    }

    let raw = record.field(field).unwrap_or_default();
    parse_finite(&raw).ok_or_else(|| PipelineError::NonNumericField {
        field: field.to_string(),
        value: raw.into_owned(),
    })
}

fn bin_values(values: &[f64], bin_count: usize) -> Vec<HistogramBucket> {
    let Some((min, max)) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
        Some(match acc {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        })
    }) else {
        return Vec::new();
    };

    let edges = bin_edges(min, max, bin_count);
    let mut buckets: Vec<HistogramBucket> = edges
        .windows(2)
        .map(|pair| HistogramBucket {
            range_low: pair[0],
            range_high: pair[1],
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = bucket_index(&edges, value, min, max);
        buckets[idx].count += 1;
    }

    buckets
}

/// `bin_count + 1` edges from `min` to `max`, all finite for finite bounds.
fn bin_edges(min: f64, max: f64, bin_count: usize) -> Vec<f64> {
    if min == max {
        return vec![min; bin_count + 1];
    }

    let span = max - min;
    let mut edges: Vec<f64> = (0..=bin_count)
        .map(|i| {
            let t = i as f64 / bin_count as f64;
            if span.is_finite() {
                min + span * t
            } else {
                min * (1.0 - t) + max * t
            }
        })
        .collect();
    edges[0] = min;
    edges[bin_count] = max;
    edges
}

fn bucket_index(edges: &[f64], value: f64, min: f64, max: f64) -> usize {
    let last = edges.len() - 2;
    if min == max {
        return 0;
    }

    // Halving keeps the span finite when `max - min` overflows.
    let position = if (max - min).is_finite() {
        (value - min) / (max - min)
    } else {
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    };
    let mut idx = ((position * (last + 1) as f64).floor() as usize).min(last);
    // Float rounding can push a value off its bin's edges.
    while idx > 0 && value < edges[idx] {
        idx -= 1;
    }
    while idx < last && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
