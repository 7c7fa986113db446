//! Plain-text rendering for the terminal UI.

use std::fmt::Write;

use crate::reviews::{HistogramBucket, ReviewRecord, ReviewView};

const MAX_CELL_WIDTH: usize = 40;
const BAR_WIDTH: usize = 40;

/// Render rows as an aligned table, truncating long cells.
pub fn render_table(headers: &[String], records: &[&ReviewRecord], limit: Option<usize>) -> String {
    let shown = limit.map_or(records.len(), |n| n.min(records.len()));
    let rows: Vec<Vec<String>> = records[..shown]
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| truncate(&record.field(h).unwrap_or_default()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if shown < records.len() {
        let _ = writeln!(out, "... {} more rows", records.len() - shown);
    }
    out
}

/// Render buckets as horizontal bars scaled to the fullest bucket.
pub fn render_histogram(buckets: &[HistogramBucket]) -> String {
    if buckets.is_empty() {
        return "(no data)\n".to_string();
    }

    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let last = buckets.len() - 1;
    let mut out = String::new();
    for (i, bucket) in buckets.iter().enumerate() {
        let closing = if i == last { ']' } else { ')' };
        let bar_len = bucket.count * BAR_WIDTH / max_count;
        let _ = writeln!(
            out,
            "[{:>7.3}, {:>7.3}{} {:<width$} {}",
            bucket.range_low,
            bucket.range_high,
            closing,
            "#".repeat(bar_len),
            bucket.count,
            width = BAR_WIDTH
        );
    }
    out
}

/// Table plus histogram for one filtered view.
pub fn render_view(view: &ReviewView<'_>, row_limit: Option<usize>) -> String {
    format!(
        "Reviews for {}\n{}\nSentiment Score Distribution for {}\n{}",
        view.filter,
        render_table(&view.headers, &view.records, row_limit),
        view.filter,
        render_histogram(&view.histogram)
    )
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

fn truncate(value: &str) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_CELL_WIDTH {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_columns() {
        let a = ReviewRecord::new("Headphones", "Great", 0.9);
        let b = ReviewRecord::new("Mouse", "A rather long summary", -0.25);
        let headers = vec![
            "PRODUCT".to_string(),
            "SUMMARY".to_string(),
            "SENTIMENT_SCORE".to_string(),
        ];

        let table = render_table(&headers, &[&a, &b], None);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "PRODUCT    | SUMMARY               | SENTIMENT_SCORE");
        assert_eq!(lines[2], "Headphones | Great                 | 0.9");
        assert_eq!(lines[3], "Mouse      | A rather long summary | -0.25");
    }

    #[test]
    fn table_limit_reports_hidden_rows() {
        let a = ReviewRecord::new("A", "x", 0.0);
        let headers = vec!["PRODUCT".to_string()];
        let table = render_table(&headers, &[&a, &a, &a], Some(1));
        assert!(table.ends_with("... 2 more rows\n"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(100);
        let cell = truncate(&long);
        assert_eq!(cell.chars().count(), MAX_CELL_WIDTH);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn histogram_bars_scale_to_largest_bucket() {
        let buckets = vec![
            HistogramBucket {
                range_low: 0.0,
                range_high: 0.5,
                count: 2,
            },
            HistogramBucket {
                range_low: 0.5,
                range_high: 1.0,
                count: 1,
            },
        ];
        let rendered = render_histogram(&buckets);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0].matches('#').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('#').count(), BAR_WIDTH / 2);
        assert!(lines[0].contains(')'));
        assert!(lines[1].contains(']'));
        assert_eq!(render_histogram(&[]), "(no data)\n");
    }
}
