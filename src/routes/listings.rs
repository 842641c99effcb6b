//! Listing API routes.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
};

use crate::error::{AppError, AppResult};
use crate::models::{CreateListing, Listing, ListingWithCategory};
use crate::query::ListingQuery;
use crate::routes::helpers::{ItemEnvelope, ListEnvelope};
use crate::state::AppState;

/// Create the listings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/listings", get(list_listings).post(create_listing))
        .route("/api/listings/{id}", get(get_listing))
}

/// GET /api/listings — list with optional filtering and pagination.
async fn list_listings(
    State(state): State<AppState>,
    Query(filters): Query<ListingQuery>,
) -> AppResult<Json<ListEnvelope<ListingWithCategory>>> {
    let sql = filters.build();
    let rows = ListingWithCategory::fetch(state.db(), &sql)
        .await
        .map_err(AppError::store("Failed to fetch listings"))?;

    Ok(Json(ListEnvelope::paginated(
        rows,
        filters.resolved_limit(),
        filters.resolved_offset(),
    )))
}

/// GET /api/listings/{id} — single listing joined with its category.
async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemEnvelope<ListingWithCategory>>> {
    let listing = ListingWithCategory::find_by_id(state.db(), id)
        .await
        .map_err(AppError::store("Failed to fetch listing"))?
        .ok_or(AppError::NotFound("Listing not found"))?;

    Ok(Json(ItemEnvelope::new(listing)))
}

/// POST /api/listings — create a listing.
async fn create_listing(
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<ItemEnvelope<Listing>>)> {
    input.validate().map_err(AppError::Validation)?;

    let listing = Listing::create(state.db(), &input)
        .await
        .map_err(AppError::store("Failed to create listing"))?;

    Ok((
        StatusCode::CREATED,
        Json(ItemEnvelope::created(listing, "Listing created successfully")),
    ))
}
