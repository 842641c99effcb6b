//! Category model with aggregated listing counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A category with its derived listing count.
///
/// `listing_count` is computed by the aggregation join, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,

    pub name: String,

    /// URL-safe unique identifier.
    pub slug: String,

    pub icon: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Number of listings referencing this category.
    pub listing_count: i64,
}

impl Category {
    /// List all categories with counts, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT c.*, COUNT(l.id) AS listing_count
            FROM categories c
            LEFT JOIN listings l ON l.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Find a category by slug, with its count.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT c.*, COUNT(l.id) AS listing_count
            FROM categories c
            LEFT JOIN listings l ON l.category_id = c.id
            WHERE c.slug = $1
            GROUP BY c.id
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }
}
