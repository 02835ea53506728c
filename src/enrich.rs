//! Builds the browsable collection: list fetch, variant filtering, and a
//! fan-out of detail fetches that attaches type tags to every entry.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;

use crate::client::CatalogSource;
use crate::error::CatalogError;
use crate::model::{CatalogEntry, EnrichedEntry};
use crate::names::is_canonical;

/// How many detail requests may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanOut {
    /// One request per entry, all issued immediately.
    #[default]
    Unbounded,
    Limited(NonZeroUsize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichOptions {
    pub fan_out: FanOut,
    /// Type assigned to entries whose detail fetch failed.
    pub fallback_type: String,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            fan_out: FanOut::Unbounded,
            fallback_type: "normal".to_string(),
        }
    }
}

/// Keeps canonical entries, in list order, dropping repeated ids.
pub fn canonical_entries(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| is_canonical(&entry.name))
        .filter(|entry| seen.insert(entry.id))
        .collect()
}

async fn enrich_entry<S: CatalogSource>(
    source: &S,
    entry: CatalogEntry,
    fallback_type: &str,
) -> EnrichedEntry {
    let types = match source.fetch_detail(entry.id).await {
        Ok(detail) if !detail.types.is_empty() => detail.types,
        Ok(_) => {
            tracing::warn!("Entry {} ({}) has no types, using fallback", entry.id, entry.name);
            vec![fallback_type.to_string()]
        }
        Err(e) => {
            tracing::warn!("Failed to fetch details for {} ({}): {}", entry.name, entry.id, e);
            vec![fallback_type.to_string()]
        }
    };
    EnrichedEntry::new(entry, types)
}

/// Fetches the catalog and enriches every canonical entry with its types.
///
/// A failed list fetch fails the whole build. A failed detail fetch only
/// downgrades that entry to the fallback type, so the result always has one
/// entry per canonical id, in list order.
pub async fn build_collection<S: CatalogSource>(
    source: &S,
    options: &EnrichOptions,
) -> Result<Vec<EnrichedEntry>, CatalogError> {
    let listed = source.fetch_list().await.map_err(|e| {
        tracing::error!("Failed to fetch catalog list: {}", e);
        e
    })?;
    let total = listed.len();
    let entries = canonical_entries(listed);

    tracing::debug!(
        "Enriching {} canonical entries out of {} listed ({:?})",
        entries.len(),
        total,
        options.fan_out
    );

    let fetches: Vec<_> = entries
        .into_iter()
        .map(|entry| enrich_entry(source, entry, &options.fallback_type))
        .collect();

    let collection = match options.fan_out {
        FanOut::Unbounded => join_all(fetches).await,
        FanOut::Limited(limit) => {
            stream::iter(fetches)
                .buffered(limit.get())
                .collect::<Vec<_>>()
                .await
        }
    };

    let fallbacks = collection
        .iter()
        .filter(|entry| entry.types.len() == 1 && entry.types[0] == options.fallback_type)
        .count();
    tracing::info!(
        "Built catalog with {} entries ({} typed as {})",
        collection.len(),
        fallbacks,
        options.fallback_type
    );

    Ok(collection)
}
