use std::fmt;

use super::dataset::ReviewRecord;

pub const ALL_PRODUCTS_LABEL: &str = "All Products";

/// Which rows to keep when viewing the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Product(String),
}

impl ProductFilter {
    /// Parse a selector value. Blank, `all`, or the "All Products" label mean no filter.
    pub fn from_selection(selection: &str) -> Self {
        let selection = selection.trim();
        if selection.is_empty()
            || selection.eq_ignore_ascii_case(ALL_PRODUCTS_LABEL)
            || selection.eq_ignore_ascii_case("all")
        {
            ProductFilter::All
        } else {
            ProductFilter::Product(selection.to_string())
        }
    }

    pub fn matches(&self, record: &ReviewRecord) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Product(product) => record.product == *product,
        }
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductFilter::All => write!(f, "{ALL_PRODUCTS_LABEL}"),
            ProductFilter::Product(product) => write!(f, "{product}"),
        }
    }
}

/// Keep the records whose product equals the filter exactly, in their original order.
pub fn filter_by_product<'a>(
    records: &'a [ReviewRecord],
    filter: &ProductFilter,
) -> Vec<&'a ReviewRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Distinct product values in order of first appearance.
pub fn product_options(records: &[ReviewRecord]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .map(|r| r.product.as_str())
        .filter(|product| seen.insert(*product))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ReviewRecord> {
        vec![
            ReviewRecord::new("A", "first", 0.1),
            ReviewRecord::new("B", "second", 0.2),
            ReviewRecord::new("A", "third", 0.3),
        ]
    }

    #[test]
    fn all_is_identity() {
        let records = records();
        let filtered = filter_by_product(&records, &ProductFilter::All);
        assert_eq!(filtered.len(), records.len());
        assert!(filtered.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn product_filter_keeps_order() {
        let records = records();
        let filtered = filter_by_product(&records, &ProductFilter::Product("A".into()));
        let summaries: Vec<_> = filtered.iter().map(|r| r.summary.as_str()).collect();
        assert_eq!(summaries, vec!["first", "third"]);
    }

    #[test]
    fn product_match_is_case_sensitive() {
        let records = records();
        assert!(filter_by_product(&records, &ProductFilter::Product("a".into())).is_empty());
        assert!(filter_by_product(&records, &ProductFilter::Product("A ".into())).is_empty());
    }

    #[test]
    fn selection_parsing() {
        assert_eq!(ProductFilter::from_selection("All Products"), ProductFilter::All);
        assert_eq!(ProductFilter::from_selection(" all "), ProductFilter::All);
        assert_eq!(ProductFilter::from_selection(""), ProductFilter::All);
        assert_eq!(
            ProductFilter::from_selection("Headphones"),
            ProductFilter::Product("Headphones".into())
        );
        assert_eq!(ProductFilter::All.to_string(), "All Products");
    }

    #[test]
    fn options_are_unique_in_first_seen_order() {
        assert_eq!(product_options(&records()), vec!["A", "B"]);
    }
}
