use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::config::PokemonConfig;
use crate::error::{CatalogError, TransportError};
use crate::model::{CatalogEntry, CreatureDetail};
use crate::names::is_canonical;
use crate::pokemon::{NamedAPIResourceList, Pokemon};

/// The two remote reads the catalog is built from.
///
/// [`CatalogClient`] implements it over HTTP; tests provide in-memory sources.
pub trait CatalogSource: Send + Sync {
    /// Fetches the summary list in one bulk request.
    fn fetch_list(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send;

    /// Fetches the full record for a single id.
    fn fetch_detail(
        &self,
        id: u32,
    ) -> impl Future<Output = Result<CreatureDetail, CatalogError>> + Send;
}

/// PokeAPI client.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: PokemonConfig,
}

impl CatalogClient {
    pub fn new(config: PokemonConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout)))
            .build()
            .map_err(|source| TransportError::Request {
                url: config.api_url.clone(),
                source,
            })?;

        Ok(Self { http, config })
    }

    fn list_url(&self) -> String {
        format!(
            "{}/{}?limit={}",
            self.config.api_url.trim_end_matches('/'),
            self.config.resource,
            self.config.list_limit
        )
    }

    fn detail_url(&self, id: u32) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.resource,
            id
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, TransportError> {
        tracing::debug!("Fetching {}", url);
        self.http.get(url).send().await.map_err(|source| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, source);
            TransportError::Request {
                url: url.to_string(),
                source,
            }
        })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, TransportError> {
    response.json::<T>().await.map_err(|e| {
        tracing::error!("Failed to parse JSON response from {}: {}", url, e);
        TransportError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })
}

impl CatalogSource for CatalogClient {
    async fn fetch_list(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let url = self.list_url();
        let response = self.get(&url).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("List request to {} failed with status: {}", url, status);
            return Err(TransportError::Status { url, status }.into());
        }

        let list: NamedAPIResourceList = decode(&url, response).await?;
        let mut entries = Vec::with_capacity(list.results.len());
        for resource in list.results {
            let canonical = is_canonical(&resource.name);
            let name = resource.name.clone();
            match CatalogEntry::from_resource(resource, &self.config.image_url) {
                Ok(entry) => entries.push(entry),
                // variants are filtered out later, so a bad reference on one
                // must not sink the whole list
                Err(e) if !canonical => {
                    tracing::warn!("Skipping variant {} with unusable reference: {}", name, e);
                }
                Err(e) => {
                    tracing::error!("List entry {} has an unusable reference: {}", name, e);
                    return Err(e.into());
                }
            }
        }

        tracing::debug!("Fetched {} catalog entries", entries.len());
        Ok(entries)
    }

    async fn fetch_detail(&self, id: u32) -> Result<CreatureDetail, CatalogError> {
        let url = self.detail_url(id);
        let response = self.get(&url).await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                tracing::debug!("Entry {} not found at {}", id, url);
                return Err(CatalogError::NotFound { id });
            }
            status => {
                tracing::error!("Detail request to {} failed with status: {}", url, status);
                return Err(TransportError::Status { url, status }.into());
            }
        }

        let pokemon: Pokemon = decode(&url, response).await?;
        tracing::debug!("Successfully fetched Pokemon: {} (ID: {})", pokemon.name, pokemon.id);
        Ok(pokemon.into_detail(&self.config.image_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PokemonConfig {
        PokemonConfig {
            api_url: "http://localhost:9000/api/v2/".to_string(),
            resource: "pokemon".to_string(),
            image_url: "http://localhost:9000/img".to_string(),
            list_limit: 151,
            timeout: 5,
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let client = CatalogClient::new(config()).unwrap();

        assert_eq!(
            client.list_url(),
            "http://localhost:9000/api/v2/pokemon?limit=151"
        );
        assert_eq!(client.detail_url(25), "http://localhost:9000/api/v2/pokemon/25");
    }
}
