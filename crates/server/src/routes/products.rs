//! Catalog route handlers.
//!
//! These feed the buyer-side cart with add-time snapshots. Filtering and
//! sorting are conveniences for listings; the checkout verifier uses the
//! repository directly and never goes through these handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use shoplite_core::{Product, ProductId};

use crate::db::CatalogRepository;
use crate::db::catalog::{CatalogFilter, SortKey};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Search term over name and description.
    pub q: Option<String>,
    /// Sort key: `price_asc`, `price_desc`, `rating`.
    pub sort: Option<String>,
}

impl From<ListQuery> for CatalogFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            category: query.category.filter(|c| !c.is_empty()),
            search: query.q.filter(|q| !q.is_empty()),
            sort: query.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        }
    }
}

/// List catalog products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = CatalogFilter::from(query);
    let products = CatalogRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// Fetch a single product by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    let product = CatalogRepository::new(state.pool())
        .fetch_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}
