//! HTML fragment routes for partial-page updates.
//!
//! Failures never surface as HTTP errors here; the client swaps whatever
//! fragment comes back, so errors degrade to a localized message instead.

use axum::routing::get;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
};
use tracing::error;

use crate::models::ListingWithCategory;
use crate::query::ListingQuery;
use crate::state::AppState;

/// Create the HTML fragment router.
pub fn router() -> Router<AppState> {
    Router::new().route("/html/listings", get(listing_cards))
}

/// GET /html/listings — active listing cards, featured first.
async fn listing_cards(
    State(state): State<AppState>,
    Query(filters): Query<ListingQuery>,
) -> Html<String> {
    let sql = filters.active_only().build();

    let rows = match ListingWithCategory::fetch(state.db(), &sql).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "failed to fetch listings for fragment");
            return Html(state.theme().error_fragment());
        }
    };

    match state.theme().render_listing_cards(&rows) {
        Ok(html) => Html(html),
        Err(e) => {
            error!(error = %e, "failed to render listing fragment");
            Html(state.theme().error_fragment())
        }
    }
}
