//! Loading customer reviews from CSV.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::core::PipelineError;

pub const PRODUCT_COLUMN: &str = "PRODUCT";
pub const SUMMARY_COLUMN: &str = "SUMMARY";
pub const SENTIMENT_SCORE_COLUMN: &str = "SENTIMENT_SCORE";
pub const CLEANED_SUMMARY_COLUMN: &str = "CLEANED_SUMMARY";

/// One review row.
///
/// Columns other than product, summary and score are kept as text in
/// source order in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub product: String,
    pub summary: String,
    pub sentiment_score: f64,
    /// Set by [`crate::reviews::clean_reviews`]; `summary` is never touched.
    pub cleaned_summary: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl ReviewRecord {
    pub fn new(product: impl Into<String>, summary: impl Into<String>, sentiment_score: f64) -> Self {
        Self {
            product: product.into(),
            summary: summary.into(),
            sentiment_score,
            cleaned_summary: None,
            extra: Vec::new(),
        }
    }

    /// Value of a column by header name.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            PRODUCT_COLUMN => Some(Cow::Borrowed(&self.product)),
            SUMMARY_COLUMN => Some(Cow::Borrowed(&self.summary)),
            SENTIMENT_SCORE_COLUMN => Some(Cow::Owned(self.sentiment_score.to_string())),
            CLEANED_SUMMARY_COLUMN => self.cleaned_summary.as_deref().map(Cow::Borrowed),
            _ => self
                .extra
                .iter()
                .find(|(column, _)| column == name)
                .map(|(_, value)| Cow::Borrowed(value.as_str())),
        }
    }
}

/// A loaded review file: header order plus rows in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<ReviewRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether every record carries a cleaned summary.
    pub fn is_cleaned(&self) -> bool {
        !self.records.is_empty() && self.records.iter().all(|r| r.cleaned_summary.is_some())
    }

    /// Headers to show in a table, with the derived column appended once cleaned.
    pub fn display_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if self.is_cleaned() && !headers.iter().any(|h| h == CLEANED_SUMMARY_COLUMN) {
            headers.push(CLEANED_SUMMARY_COLUMN.to_string());
        }
        headers
    }

    fn extra_columns(&self) -> impl Iterator<Item = (usize, &String)> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !is_core_column(h))
    }
}

fn is_core_column(name: &str) -> bool {
    matches!(
        name,
        PRODUCT_COLUMN | SUMMARY_COLUMN | SENTIMENT_SCORE_COLUMN | CLEANED_SUMMARY_COLUMN
    )
}

/// Read a review CSV file.
///
/// A path that does not exist, cannot be opened for reading or is not a
/// regular file is reported as [`PipelineError::NotFound`].
#[tracing::instrument(
    name = "load_dataset",
    skip(path),
    fields(path = %path.as_ref().display()),
    err
)]
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, PipelineError> {
    let path = path.as_ref();
    let not_found = || PipelineError::NotFound {
        path: path.display().to_string(),
    };

    let file = File::open(path).map_err(|e| open_error(e, not_found))?;
    if !file.metadata()?.is_file() {
        return Err(not_found());
    }

    let dataset = from_reader(file)?;
    tracing::info!(records = dataset.len(), "Dataset loaded");
    Ok(dataset)
}

fn open_error(error: io::Error, not_found: impl FnOnce() -> PipelineError) -> PipelineError {
    match error.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => not_found(),
        _ => PipelineError::Io(error),
    }
}

/// Parse review CSV from any reader. The first row must be a header.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    };
    let product_idx = column(PRODUCT_COLUMN)?;
    let summary_idx = column(SUMMARY_COLUMN)?;
    let score_idx = column(SENTIMENT_SCORE_COLUMN)?;

    let mut dataset = Dataset {
        headers,
        records: Vec::new(),
    };
    let extra_columns: Vec<(usize, String)> = dataset
        .extra_columns()
        .map(|(idx, name)| (idx, name.clone()))
        .collect();

    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        // Line the row starts on, header included. Quoted fields may span lines.
        let row_number = row
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok())
            .unwrap_or(i + 2);
        let get = |idx: usize| row.get(idx).unwrap_or_default();

        let raw_score = get(score_idx);
        let sentiment_score = parse_finite(raw_score).ok_or_else(|| PipelineError::InvalidScore {
            row: row_number,
            value: raw_score.to_string(),
        })?;

        dataset.records.push(ReviewRecord {
            product: get(product_idx).to_string(),
            summary: get(summary_idx).to_string(),
            sentiment_score,
            cleaned_summary: None,
            extra: extra_columns
                .iter()
                .map(|(idx, name)| (name.clone(), get(*idx).to_string()))
                .collect(),
        });
    }

    Ok(dataset)
}

pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ID,PRODUCT,SUMMARY,SENTIMENT_SCORE,DATE
1,Headphones,\"Great sound, comfy!\",0.9,2024-01-02
2,Keyboard,Keys stick.,-0.4,2024-01-03
3,Headphones,Broke after a week,-0.8,2024-01-05
";

    #[test]
    fn reads_rows_in_order_with_passthrough_columns() {
        let dataset = from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(
            dataset.headers,
            vec!["ID", "PRODUCT", "SUMMARY", "SENTIMENT_SCORE", "DATE"]
        );
        assert_eq!(dataset.len(), 3);

        let first = &dataset.records[0];
        assert_eq!(first.product, "Headphones");
        assert_eq!(first.summary, "Great sound, comfy!");
        assert_eq!(first.sentiment_score, 0.9);
        assert!(first.cleaned_summary.is_none());
        assert_eq!(
            first.extra,
            vec![
                ("ID".to_string(), "1".to_string()),
                ("DATE".to_string(), "2024-01-02".to_string())
            ]
        );
        assert_eq!(first.field("DATE").as_deref(), Some("2024-01-02"));
        assert_eq!(dataset.records[1].sentiment_score, -0.4);
    }

    #[test]
    fn missing_required_column() {
        let err = from_reader("PRODUCT,SUMMARY\nA,b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(c) if c == SENTIMENT_SCORE_COLUMN));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_scores() {
        let err = from_reader("PRODUCT,SUMMARY,SENTIMENT_SCORE\nA,b,0.1\nA,c,high\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidScore { row: 3, ref value } if value == "high"));

        let err =
            from_reader("PRODUCT,SUMMARY,SENTIMENT_SCORE\nA,b,NaN\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidScore { row: 2, .. }));
    }

    #[test]
    fn invalid_score_row_counts_quoted_line_breaks() {
        let err = from_reader(
            "PRODUCT,SUMMARY,SENTIMENT_SCORE\nA,\"two\nlines\",0.1\nB,c,bad\n".as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidScore { row: 4, ref value } if value == "bad"));
    }

    #[test]
    fn unreadable_file_is_not_found() {
        let not_found = || PipelineError::NotFound {
            path: "reviews.csv".into(),
        };
        assert!(matches!(
            open_error(io::Error::from(io::ErrorKind::PermissionDenied), not_found),
            PipelineError::NotFound { .. }
        ));
        assert!(matches!(
            open_error(io::Error::from(io::ErrorKind::Interrupted), not_found),
            PipelineError::Io(_)
        ));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let dataset = from_reader("PRODUCT,SUMMARY,SENTIMENT_SCORE\n".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(!dataset.is_cleaned());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load("/nonexistent/path.csv").unwrap_err();
        assert!(matches!(err, PipelineError::NotFound { ref path } if path == "/nonexistent/path.csv"));
    }

    #[test]
    fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path()),
            Err(PipelineError::NotFound { .. })
        ));
    }
}
