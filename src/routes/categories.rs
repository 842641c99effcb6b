//! Category API routes.

use axum::routing::get;
use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::error::{AppError, AppResult};
use crate::models::Category;
use crate::routes::helpers::{ItemEnvelope, ListEnvelope};
use crate::state::AppState;

/// Create the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{slug}", get(get_category))
}

/// GET /api/categories — all categories with listing counts, by name.
async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ListEnvelope<Category>>> {
    let categories = Category::list(state.db())
        .await
        .map_err(AppError::store("Failed to fetch categories"))?;

    Ok(Json(ListEnvelope::new(categories)))
}

/// GET /api/categories/{slug} — single category with its listing count.
async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ItemEnvelope<Category>>> {
    let category = Category::find_by_slug(state.db(), &slug)
        .await
        .map_err(AppError::store("Failed to fetch category"))?
        .ok_or(AppError::NotFound("Category not found"))?;

    Ok(Json(ItemEnvelope::new(category)))
}
