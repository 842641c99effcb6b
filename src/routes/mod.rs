//! HTTP route handlers.

pub mod categories;
pub mod health;
pub mod helpers;
pub mod html;
pub mod listings;
pub mod static_files;
