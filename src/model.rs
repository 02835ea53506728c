use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::pokemon::NamedAPIResource;

/// Artwork location for an id. No existence check is made; clients fall back
/// to a placeholder when the image fails to load.
pub fn image_url(image_base: &str, id: u32) -> String {
    format!("{}/{}.png", image_base.trim_end_matches('/'), id)
}

/// Extracts the numeric id from the trailing path segment of a resource url,
/// e.g. `https://pokeapi.co/api/v2/pokemon/25/` -> `25`.
pub fn id_from_url(url: &str) -> Result<u32, TransportError> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| TransportError::MalformedReference(url.to_string()))
}

/// A catalog item as listed by the summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub detail_url: String,
    pub image_url: String,
}

impl CatalogEntry {
    pub fn from_resource(
        resource: NamedAPIResource,
        image_base: &str,
    ) -> Result<Self, TransportError> {
        let id = id_from_url(&resource.url)?;
        Ok(Self {
            id,
            name: resource.name,
            detail_url: resource.url,
            image_url: image_url(image_base, id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u8,
}

/// Full record of a single creature, as fetched for the detail view.
///
/// `height` and `weight` are in tenths of a metre and tenths of a kilogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<String>,
    pub stats: Vec<Stat>,
    pub image_url: String,
}

impl CreatureDetail {
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }
}

/// A catalog entry carrying its type tags. This is what the collection holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedEntry {
    pub id: u32,
    pub name: String,
    pub detail_url: String,
    pub image_url: String,
    pub types: Vec<String>,
}

impl EnrichedEntry {
    pub fn new(entry: CatalogEntry, types: Vec<String>) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            detail_url: entry.detail_url,
            image_url: entry.image_url,
            types,
        }
    }
}
