use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::StatusCode;

use crate::client::CatalogSource;
use crate::error::{CatalogError, TransportError};
use crate::model::{CatalogEntry, CreatureDetail, Stat, image_url};

const IMAGE_BASE: &str = "https://img.example";

/// In-memory catalog with scripted failures and delays.
#[derive(Default)]
pub struct FakeSource {
    entries: Vec<CatalogEntry>,
    types: HashMap<u32, Vec<String>>,
    failing: HashSet<u32>,
    missing: HashSet<u32>,
    delays: HashMap<u32, u64>,
    list_fails: AtomicBool,
    pub detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, id: u32, name: &str, types: &[&str]) -> Self {
        self.entries.push(CatalogEntry {
            id,
            name: name.to_string(),
            detail_url: format!("https://pokeapi.example/pokemon/{id}/"),
            image_url: image_url(IMAGE_BASE, id),
        });
        self.types
            .insert(id, types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn failing_detail(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn missing_detail(mut self, id: u32) -> Self {
        self.missing.insert(id);
        self
    }

    pub fn with_delay(mut self, id: u32, millis: u64) -> Self {
        self.delays.insert(id, millis);
        self
    }

    pub fn failing_list(self) -> Self {
        self.set_list_failing(true);
        self
    }

    pub fn set_list_failing(&self, failing: bool) {
        self.list_fails.store(failing, Ordering::SeqCst);
    }

    fn server_error(id: u32) -> CatalogError {
        TransportError::Status {
            url: format!("https://pokeapi.example/pokemon/{id}"),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
        .into()
    }
}

impl CatalogSource for FakeSource {
    async fn fetch_list(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        if self.list_fails.load(Ordering::SeqCst) {
            return Err(TransportError::Status {
                url: "https://pokeapi.example/pokemon?limit=2000".to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            }
            .into());
        }
        Ok(self.entries.clone())
    }

    async fn fetch_detail(&self, id: u32) -> Result<CreatureDetail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(millis) = self.delays.get(&id) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&id) {
            return Err(Self::server_error(id));
        }
        let (Some(entry), Some(types)) = (
            self.entries.iter().find(|entry| entry.id == id),
            self.types.get(&id),
        ) else {
            return Err(CatalogError::NotFound { id });
        };
        if self.missing.contains(&id) {
            return Err(CatalogError::NotFound { id });
        }

        Ok(CreatureDetail {
            id,
            name: entry.name.clone(),
            height: 7,
            weight: 69,
            types: types.clone(),
            stats: vec![Stat {
                name: "hp".to_string(),
                value: 45,
            }],
            image_url: entry.image_url.clone(),
        })
    }
}
