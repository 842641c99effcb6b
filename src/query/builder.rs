//! Listing query builder using SeaQuery.
//!
//! Generates the listing SELECT from request-supplied filters with support
//! for:
//! - Category slug and free-text search filters
//! - Sort-field allow-listing
//! - Pagination with a clamped page size
//!
//! All values arrive as raw query-string text; anything unparseable
//! degrades to its default rather than failing.

use sea_query::extension::postgres::PgExpr;
use sea_query::{
    Alias, Asterisk, Cond, Expr, ExprTrait, Iden, Order, PostgresQueryBuilder, Query,
    SelectStatement,
};
use serde::Deserialize;

/// Maximum rows a single page may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default page size when the request omits `limit`.
const DEFAULT_PAGE_SIZE: u64 = 50;

/// `listings` table identifiers.
#[derive(Iden, Clone, Copy)]
pub enum Listings {
    Table,
    Id,
    Title,
    Description,
    Price,
    CategoryId,
    ImageUrl,
    Tags,
    Featured,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// `categories` table identifiers.
#[derive(Iden, Clone, Copy)]
pub enum Categories {
    Table,
    Id,
    Name,
    Slug,
}

/// Request-supplied listing filters.
///
/// Deserialized straight from the query string; every field is optional
/// and tolerated as free text.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListingQuery {
    /// Category slug; the sentinel `"all"` means no filter.
    pub category: Option<String>,

    /// Case-insensitive substring matched against title and description.
    pub search: Option<String>,

    /// Only applied when the literal string `"true"`.
    pub featured: Option<String>,

    /// Sort field; must be in the allow-list or falls back to `created_at`.
    pub sort: Option<String>,

    /// Sort direction; `ASC` (case-insensitive) or the default `DESC`.
    pub order: Option<String>,

    pub limit: Option<String>,
    pub offset: Option<String>,

    /// Restrict to `status = 'active'` and sort featured rows first.
    /// Set by the fragment path, never from the query string.
    #[serde(skip)]
    pub active_only: bool,
}

impl ListingQuery {
    /// Switch to fragment-path mode: active listings only, featured first.
    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// Resolved page size: defaults to 50, clamped to [`MAX_PAGE_SIZE`].
    pub fn resolved_limit(&self) -> u64 {
        let requested = self
            .limit
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if requested > MAX_PAGE_SIZE {
            tracing::warn!(requested, capped = MAX_PAGE_SIZE, "limit exceeds maximum, capping");
            MAX_PAGE_SIZE
        } else {
            requested
        }
    }

    /// Resolved offset: defaults to 0.
    pub fn resolved_offset(&self) -> u64 {
        self.offset
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
    }

    /// Build the listing SELECT with category join, filters, sorting, and
    /// pagination.
    pub fn build(&self) -> String {
        let mut query = Query::select();

        query
            .column((Listings::Table, Asterisk))
            .expr_as(
                Expr::col((Categories::Table, Categories::Name)),
                Alias::new("category_name"),
            )
            .expr_as(
                Expr::col((Categories::Table, Categories::Slug)),
                Alias::new("category_slug"),
            )
            .from(Listings::Table)
            .left_join(
                Categories::Table,
                Expr::col((Listings::Table, Listings::CategoryId))
                    .equals((Categories::Table, Categories::Id)),
            );

        self.add_filters(&mut query);
        self.add_sorts(&mut query);

        query.limit(self.resolved_limit());
        query.offset(self.resolved_offset());

        query.to_string(PostgresQueryBuilder)
    }

    /// Add WHERE conditions from the present filters.
    fn add_filters(&self, query: &mut SelectStatement) {
        if self.active_only {
            query.and_where(Expr::col((Listings::Table, Listings::Status)).eq("active"));
        }

        if let Some(category) = self.category.as_deref()
            && !category.is_empty()
            && category != "all"
        {
            query.and_where(Expr::col((Categories::Table, Categories::Slug)).eq(category));
        }

        if let Some(search) = self.search.as_deref()
            && !search.is_empty()
        {
            // Literal % and _ in the needle act as wildcards; kept as-is to
            // match the behaviour the browser client relies on.
            let pattern = format!("%{search}%");
            let cond = Cond::any()
                .add(Expr::col((Listings::Table, Listings::Title)).ilike(pattern.clone()))
                .add(Expr::col((Listings::Table, Listings::Description)).ilike(pattern));
            query.cond_where(cond);
        }

        if self.featured.as_deref() == Some("true") {
            query.and_where(Expr::col((Listings::Table, Listings::Featured)).eq(true));
        }
    }

    /// Add ORDER BY clauses.
    fn add_sorts(&self, query: &mut SelectStatement) {
        if self.active_only {
            query.order_by((Listings::Table, Listings::Featured), Order::Desc);
        }

        query.order_by((Listings::Table, self.sort_field()), self.sort_order());
    }

    /// Sort field, restricted to the allow-list to prevent column injection.
    fn sort_field(&self) -> Listings {
        match self.sort.as_deref() {
            Some("title") => Listings::Title,
            Some("price") => Listings::Price,
            Some("updated_at") => Listings::UpdatedAt,
            _ => Listings::CreatedAt,
        }
    }

    /// Sort direction: ASC only when explicitly requested.
    fn sort_order(&self) -> Order {
        match self.order.as_deref() {
            Some(o) if o.eq_ignore_ascii_case("asc") => Order::Asc,
            _ => Order::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_build() {
        let sql = ListingQuery::default().build();

        assert!(sql.contains("FROM \"listings\""));
        assert!(sql.contains("LEFT JOIN \"categories\""));
        assert!(sql.contains("AS \"category_name\""));
        assert!(sql.contains("ORDER BY \"listings\".\"created_at\" DESC"));
        assert!(sql.contains("LIMIT 50"));
        assert!(sql.contains("OFFSET 0"));
        assert!(!sql.contains("WHERE"), "no filters by default: {sql}");
    }

    #[test]
    fn category_filter() {
        let query = ListingQuery {
            category: Some("mobler".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(
            sql.contains("\"categories\".\"slug\" = 'mobler'"),
            "category filter missing: {sql}"
        );
    }

    #[test]
    fn category_sentinel_all_ignored() {
        let query = ListingQuery {
            category: Some("all".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(!sql.contains("slug"), "sentinel should skip filter: {sql}");
    }

    #[test]
    fn search_matches_title_or_description() {
        let query = ListingQuery {
            search: Some("chair".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(sql.contains("ILIKE '%chair%'"), "search missing: {sql}");
        assert!(sql.contains("\"listings\".\"title\""), "title arm: {sql}");
        assert!(
            sql.contains("\"listings\".\"description\""),
            "description arm: {sql}"
        );
        assert!(sql.contains(" OR "), "arms must be OR-ed: {sql}");
    }

    #[test]
    fn empty_search_skipped() {
        let query = ListingQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(!sql.contains("ILIKE"), "empty search skipped: {sql}");
    }

    #[test]
    fn search_values_are_escaped() {
        let query = ListingQuery {
            search: Some("o'brien".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(
            !sql.contains("'%o'brien%'"),
            "quote must not break out of the literal: {sql}"
        );
    }

    #[test]
    fn sort_allow_list() {
        for field in ["title", "price", "updated_at"] {
            let query = ListingQuery {
                sort: Some(field.to_string()),
                ..Default::default()
            };
            let sql = query.build();
            assert!(
                sql.contains(&format!("ORDER BY \"listings\".\"{field}\" DESC")),
                "sort {field} missing: {sql}"
            );
        }
    }

    #[test]
    fn invalid_sort_falls_back_to_created_at() {
        let query = ListingQuery {
            sort: Some("dropcolumn".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(
            sql.contains("ORDER BY \"listings\".\"created_at\" DESC"),
            "fallback missing: {sql}"
        );
        assert!(!sql.contains("dropcolumn"), "raw field must not leak: {sql}");
    }

    #[test]
    fn ascending_order() {
        let query = ListingQuery {
            sort: Some("price".to_string()),
            order: Some("asc".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(
            sql.contains("ORDER BY \"listings\".\"price\" ASC"),
            "asc missing: {sql}"
        );
    }

    #[test]
    fn unknown_order_defaults_to_desc() {
        let query = ListingQuery {
            order: Some("sideways".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(sql.contains("DESC"), "default direction: {sql}");
        assert!(!sql.contains("ASC"), "unknown order is not ASC: {sql}");
    }

    #[test]
    fn pagination_parsing() {
        let query = ListingQuery {
            limit: Some("10".to_string()),
            offset: Some("30".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(sql.contains("LIMIT 10"), "limit: {sql}");
        assert!(sql.contains("OFFSET 30"), "offset: {sql}");
    }

    #[test]
    fn limit_clamped_to_max() {
        let query = ListingQuery {
            limit: Some("5000".to_string()),
            ..Default::default()
        };

        assert_eq!(query.resolved_limit(), MAX_PAGE_SIZE);
        assert!(query.build().contains("LIMIT 100"));
    }

    #[test]
    fn unparseable_pagination_degrades_to_defaults() {
        let query = ListingQuery {
            limit: Some("banana".to_string()),
            offset: Some("-3".to_string()),
            ..Default::default()
        };

        assert_eq!(query.resolved_limit(), 50);
        assert_eq!(query.resolved_offset(), 0);
    }

    #[test]
    fn featured_filter_requires_literal_true() {
        let on = ListingQuery {
            featured: Some("true".to_string()),
            ..Default::default()
        };
        assert!(on.build().contains("\"listings\".\"featured\" = TRUE"));

        let off = ListingQuery {
            featured: Some("yes".to_string()),
            ..Default::default()
        };
        assert!(!off.build().contains("featured\" ="));
    }

    #[test]
    fn active_only_filters_status_and_sorts_featured_first() {
        let sql = ListingQuery::default().active_only().build();

        assert!(
            sql.contains("\"listings\".\"status\" = 'active'"),
            "status gate missing: {sql}"
        );
        assert!(
            sql.contains(
                "ORDER BY \"listings\".\"featured\" DESC, \"listings\".\"created_at\" DESC"
            ),
            "featured-first ordering missing: {sql}"
        );
    }

    #[test]
    fn combined_filters() {
        let query = ListingQuery {
            category: Some("fordon".to_string()),
            search: Some("bike".to_string()),
            limit: Some("5".to_string()),
            ..Default::default()
        };
        let sql = query.build();

        assert!(sql.contains("'fordon'"), "category: {sql}");
        assert!(sql.contains("'%bike%'"), "search: {sql}");
        assert!(sql.contains("LIMIT 5"), "limit: {sql}");
    }
}
