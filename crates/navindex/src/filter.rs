//! Query filtering over the flattened index.

use fnv::FnvHashSet;

use crate::types::SearchIndexEntry;

/// Filters index entries against a query.
///
/// A blank (empty or all-whitespace) query returns the entries whose label is
/// in `preloaded_labels`, in index order: the curated list shown when the
/// search surface first opens. Otherwise an entry matches when its label or
/// description contains the query, case-insensitively. Matching is plain
/// substring with no scoring; ties keep the flattened order.
///
/// The function is pure: it is re-derived on every keystroke and never
/// mutates the index. Lowercasing is Unicode-naive by contract, with no
/// locale-aware folding.
pub fn filter(
    index: &[SearchIndexEntry],
    query: &str,
    preloaded_labels: &FnvHashSet<String>,
) -> Vec<SearchIndexEntry> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return index
            .iter()
            .filter(|entry| preloaded_labels.contains(&entry.label))
            .cloned()
            .collect();
    }

    let needle = trimmed.to_lowercase();
    index
        .iter()
        .filter(|entry| matches(entry, &needle))
        .cloned()
        .collect()
}

/// Whether `entry` matches an already-lowercased needle.
fn matches(entry: &SearchIndexEntry, needle: &str) -> bool {
    if entry.label.to_lowercase().contains(needle) {
        return true;
    }
    match &entry.description {
        Some(description) => description.to_lowercase().contains(needle),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, href: &str) -> SearchIndexEntry {
        SearchIndexEntry {
            label: label.to_string(),
            href: href.to_string(),
            description: None,
            parent_label: None,
            is_child: false,
        }
    }

    fn described(label: &str, href: &str, description: &str) -> SearchIndexEntry {
        SearchIndexEntry {
            description: Some(description.to_string()),
            ..entry(label, href)
        }
    }

    fn index() -> Vec<SearchIndexEntry> {
        vec![
            entry("Intro", "/intro"),
            entry("Setup", "/setup"),
            described("Caching", "/caching", "Revalidation and invalidation"),
        ]
    }

    fn preloaded(labels: &[&str]) -> FnvHashSet<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn blank_query_returns_preloaded_in_index_order() {
        let results = filter(&index(), "", &preloaded(&["Caching", "Intro"]));
        let labels: Vec<&str> = results.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, vec!["Intro", "Caching"]);
    }

    #[test]
    fn whitespace_query_is_treated_as_blank() {
        let results = filter(&index(), "   ", &preloaded(&["Intro"]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Intro");
    }

    #[test]
    fn match_is_case_insensitive() {
        let results = filter(&index(), "SETUP", &preloaded(&[]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].href, "/setup");
    }

    #[test]
    fn description_is_searched_when_present() {
        let results = filter(&index(), "revalidation", &preloaded(&[]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Caching");
    }

    #[test]
    fn no_false_positives() {
        let needle = "tro";
        let results = filter(&index(), needle, &preloaded(&[]));
        for entry in &results {
            let in_label = entry.label.to_lowercase().contains(needle);
            let in_description = entry
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle));
            assert!(in_label || in_description, "false positive: {}", entry.label);
        }
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn unmatched_query_yields_empty_result() {
        assert!(filter(&index(), "zzz", &preloaded(&["Intro"])).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let idx = index();
        let pre = preloaded(&["Setup"]);
        assert_eq!(filter(&idx, "in", &pre), filter(&idx, "in", &pre));
        assert_eq!(filter(&idx, "", &pre), filter(&idx, "", &pre));
    }

    #[test]
    fn preloaded_labels_absent_from_index_are_ignored() {
        let results = filter(&index(), "", &preloaded(&["Intro", "Gone"]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Intro");
    }
}
