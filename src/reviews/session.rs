//! The dataset a user is working on, and which steps have run on it.

use std::path::Path;

use super::clean::clean_reviews;
use super::dataset::{self, Dataset, ReviewRecord, SENTIMENT_SCORE_COLUMN};
use super::filter::{ProductFilter, filter_by_product, product_options};
use super::histogram::{DEFAULT_BIN_COUNT, HistogramBucket, histogram};
use crate::core::PipelineError;

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Loaded(Dataset),
    Cleaned(Dataset),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Loaded(_) => "loaded",
            SessionState::Cleaned(_) => "cleaned",
        }
    }
}

/// Records matching a filter together with their score distribution.
#[derive(Debug)]
pub struct ReviewView<'a> {
    pub filter: ProductFilter,
    pub headers: Vec<String>,
    pub records: Vec<&'a ReviewRecord>,
    pub histogram: Vec<HistogramBucket>,
}

/// Owns at most one dataset and guards the ingest -> clean -> view order.
#[derive(Debug)]
pub struct ReviewSession {
    state: SessionState,
    bin_count: usize,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new(DEFAULT_BIN_COUNT)
    }
}

impl ReviewSession {
    pub fn new(bin_count: usize) -> Self {
        Self {
            state: SessionState::Empty,
            bin_count,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Loaded(dataset) | SessionState::Cleaned(dataset) => Some(dataset),
        }
    }

    /// Load a dataset, replacing the current one only if loading succeeds.
    /// Returns the number of records loaded.
    pub fn ingest(&mut self, path: impl AsRef<Path>) -> Result<usize, PipelineError> {
        let dataset = dataset::load(path)?;
        let loaded = dataset.len();
        self.state = SessionState::Loaded(dataset);
        Ok(loaded)
    }

    /// Add cleaned summaries to the loaded dataset. Returns how many rows were cleaned.
    pub fn clean(&mut self) -> Result<usize, PipelineError> {
        let mut dataset = match std::mem::take(&mut self.state) {
            SessionState::Empty => return Err(PipelineError::PreconditionUnmet),
            SessionState::Loaded(dataset) | SessionState::Cleaned(dataset) => dataset,
        };

        clean_reviews(&mut dataset.records);
        let cleaned = dataset.len();
        self.state = SessionState::Cleaned(dataset);
        Ok(cleaned)
    }

    /// Product choices for the filter selector, "all" first.
    pub fn filter_options(&self) -> Result<Vec<ProductFilter>, PipelineError> {
        let dataset = self.dataset().ok_or(PipelineError::PreconditionUnmet)?;
        Ok(std::iter::once(ProductFilter::All)
            .chain(
                product_options(&dataset.records)
                    .into_iter()
                    .map(|p| ProductFilter::Product(p.to_string())),
            )
            .collect())
    }

    /// Filtered rows and the sentiment-score histogram for them.
    pub fn view(&self, filter: &ProductFilter) -> Result<ReviewView<'_>, PipelineError> {
        let dataset = self.dataset().ok_or(PipelineError::PreconditionUnmet)?;
        let records = filter_by_product(&dataset.records, filter);
        let histogram = histogram(
            records.iter().copied(),
            SENTIMENT_SCORE_COLUMN,
            self.bin_count,
        )?;

        Ok(ReviewView {
            filter: filter.clone(),
            headers: dataset.display_headers(),
            records,
            histogram,
        })
    }
}
