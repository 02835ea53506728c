use crate::model::EnrichedEntry;

/// Whether `entry` matches a non-empty query: case-insensitive substring of
/// the name, or plain substring of the decimal id.
pub fn matches(entry: &EnrichedEntry, query: &str) -> bool {
    entry.name.to_lowercase().contains(&query.to_lowercase())
        || entry.id.to_string().contains(query)
}

/// Filters the full collection by `query`, keeping the collection's order.
///
/// An empty query returns everything. Always call this with the unfiltered
/// collection so results depend on the current query alone.
pub fn filter(collection: &[EnrichedEntry], query: &str) -> Vec<EnrichedEntry> {
    if query.is_empty() {
        return collection.to_vec();
    }

    collection
        .iter()
        .filter(|entry| matches(entry, query))
        .cloned()
        .collect()
}
