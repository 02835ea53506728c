use std::sync::Arc;

use axum::{
    Json, Router, debug_handler,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::client::CatalogClient;
use crate::config::Config;
use crate::error::CatalogError;
use crate::format::{DetailDisplay, ShareLink};
use crate::model::{CreatureDetail, EnrichedEntry};
use crate::session::{CatalogSession, DetailSession, LoadState};

pub struct AppState {
    pub client: Arc<CatalogClient>,
    pub catalog: CatalogSession<CatalogClient>,
    pub config: Config,
}

impl AppState {
    /// Builds the client and activates the catalog session, which starts
    /// loading in the background.
    pub fn activate(config: Config) -> Result<Self, CatalogError> {
        let client = Arc::new(CatalogClient::new(config.pokemon.clone())?);
        let catalog = CatalogSession::activate(Arc::clone(&client), config.enrich_options());
        Ok(Self {
            client,
            catalog,
            config,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn load_error<T>(state: &LoadState<T>) -> ApiError {
    match state {
        LoadState::Failed(e) if e.is_not_found() => api_error(StatusCode::NOT_FOUND, e.to_string()),
        LoadState::Failed(e) => api_error(StatusCode::BAD_GATEWAY, e.to_string()),
        LoadState::Idle => api_error(StatusCode::SERVICE_UNAVAILABLE, "catalog is not loaded"),
        _ => api_error(StatusCode::SERVICE_UNAVAILABLE, "catalog is still loading"),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    pub count: usize,
    pub results: Vec<EnrichedEntry>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub detail: CreatureDetail,
    pub display: DetailDisplay,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub share: ShareLink,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pokemon", get(search_handler))
        .route("/pokemon/{id}", get(detail_handler))
        .route("/random", get(random_handler))
        .route("/refresh", post(refresh_handler))
        .with_state(state)
}

#[debug_handler]
async fn search_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let state = app_state.catalog.state();
    let Some(collection) = state.ready() else {
        return Err(load_error(&state));
    };

    let results = crate::search::filter(collection, &params.q);
    tracing::debug!("Query {:?} matched {} of {} entries", params.q, results.len(), collection.len());
    Ok(Json(SearchResponse {
        total: collection.len(),
        count: results.len(),
        results,
    }))
}

#[debug_handler]
async fn detail_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<DetailResponse>, ApiError> {
    let max_id = app_state.config.pokemon.list_limit;
    let session = DetailSession::open(Arc::clone(&app_state.client), id, max_id).await;

    let Some(detail) = session.state().ready() else {
        return Err(load_error(session.state()));
    };

    Ok(Json(DetailResponse {
        display: DetailDisplay::from(detail),
        share: ShareLink::for_detail(detail),
        previous: session.previous_id(),
        next: session.next_id(),
        detail: detail.clone(),
    }))
}

#[debug_handler]
async fn random_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<EnrichedEntry>, ApiError> {
    let state = app_state.catalog.state();
    let Some(collection) = state.ready() else {
        return Err(load_error(&state));
    };
    if collection.is_empty() {
        return Err(api_error(StatusCode::NOT_FOUND, "catalog is empty"));
    }

    let pick = rand::random_range(0..collection.len());
    tracing::debug!("Picked random entry {} ({})", collection[pick].id, collection[pick].name);
    Ok(Json(collection[pick].clone()))
}

#[debug_handler]
async fn refresh_handler(State(app_state): State<Arc<AppState>>) -> StatusCode {
    tracing::info!("Reloading catalog on request");
    app_state.catalog.reload();
    StatusCode::ACCEPTED
}
