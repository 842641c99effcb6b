//! Application state shared across all handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::Config;
use crate::db;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool; all persistent state lives behind it.
    db: PgPool,

    /// Theme engine for fragment rendering.
    theme: ThemeEngine,

    /// Directory holding static assets and shell pages.
    static_dir: PathBuf,
}

impl AppState {
    /// Initialize state: connect the pool and load templates.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config).await?;

        let theme = ThemeEngine::new(&config.templates_dir)
            .context("failed to initialize theme engine")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db: pool,
                theme,
                static_dir: config.static_dir.clone(),
            }),
        })
    }

    /// Build state from existing parts (used by tests).
    pub fn from_parts(db: PgPool, theme: ThemeEngine, static_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                theme,
                static_dir,
            }),
        }
    }

    /// Access the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Access the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Access the static assets directory.
    pub fn static_dir(&self) -> &Path {
        &self.inner.static_dir
    }

    /// Check PostgreSQL connectivity.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
