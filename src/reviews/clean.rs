use std::sync::LazyLock;

use regex::Regex;

use super::dataset::ReviewRecord;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Normalize review text: lowercase, punctuation removed, outer whitespace trimmed.
///
/// Inner whitespace runs are left as they are. Trimming happens after the
/// punctuation is removed, so `clean(clean(s)) == clean(s)`.
pub fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD.replace_all(&lowered, "").trim().to_string()
}

/// Fill `cleaned_summary` for every record from its `summary`.
pub fn clean_reviews(records: &mut [ReviewRecord]) {
    for record in records {
        record.cleaned_summary = Some(clean(&record.summary));
    }
}
