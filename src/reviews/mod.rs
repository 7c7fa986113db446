//! Customer review pipeline: load, clean, filter, and bin sentiment scores.
//!
//! The functions here are pure transforms over records. [`ReviewSession`]
//! layers the required ordering on top: nothing can be cleaned or viewed
//! before a dataset has been ingested.

pub mod clean;
pub mod dataset;
pub mod filter;
pub mod histogram;
pub mod session;

pub use clean::{clean, clean_reviews};
pub use dataset::{
    CLEANED_SUMMARY_COLUMN, Dataset, PRODUCT_COLUMN, ReviewRecord, SENTIMENT_SCORE_COLUMN,
    SUMMARY_COLUMN, from_reader, load,
};
pub use filter::{ALL_PRODUCTS_LABEL, ProductFilter, filter_by_product, product_options};
pub use histogram::{DEFAULT_BIN_COUNT, HistogramBucket, histogram};
pub use session::{ReviewSession, ReviewView, SessionState};
