//! Listing model: marketplace ads with an optional category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A marketplace listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i32,

    pub title: String,

    pub description: String,

    /// Monthly price; NULL means the listing is free.
    pub price: Option<f64>,

    /// Optional category reference; NULL renders as "Okategoriserad".
    pub category_id: Option<i32>,

    pub image_url: Option<String>,

    pub tags: Option<Vec<String>>,

    pub featured: bool,

    /// Visibility status; only `active` listings appear in fragments.
    pub status: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A listing joined with its category's name and slug.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ListingWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: Listing,

    pub category_name: Option<String>,

    pub category_slug: Option<String>,
}

/// Input for creating a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CreateListing {
    /// Check required fields; returns the client-facing message on failure.
    ///
    /// Title and description must be present and non-empty. Everything else
    /// is accepted as-is; a dangling `category_id` surfaces as a store
    /// failure from the insert.
    pub fn validate(&self) -> Result<(), String> {
        let title_ok = self.title.as_deref().is_some_and(|t| !t.trim().is_empty());
        let description_ok = self
            .description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());

        if title_ok && description_ok {
            Ok(())
        } else {
            Err("Title and description are required".to_string())
        }
    }
}

impl ListingWithCategory {
    /// Execute a built listing statement, returning the matched rows.
    pub async fn fetch(pool: &PgPool, sql: &str) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(sql).fetch_all(pool).await
    }

    /// Find a single listing by id, joined with its category.
    pub async fn find_by_id(pool: &PgPool, id: i32) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT l.*, c.name AS category_name, c.slug AS category_slug
            FROM listings l
            LEFT JOIN categories c ON l.category_id = c.id
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

impl Listing {
    /// Insert a new listing and return the created row.
    ///
    /// The input must already have passed [`CreateListing::validate`].
    pub async fn create(pool: &PgPool, input: &CreateListing) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO listings (title, description, price, category_id, image_url, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.title.as_deref().unwrap_or_default())
        .bind(input.description.as_deref().unwrap_or_default())
        .bind(input.price)
        .bind(input.category_id)
        .bind(input.image_url.as_deref())
        .bind(input.tags.as_deref())
        .fetch_one(pool)
        .await
    }
}
