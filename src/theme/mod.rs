//! Template rendering for HTML fragment endpoints.

mod engine;

pub use engine::ThemeEngine;
