//! Database row models and their queries.

mod category;
mod listing;

pub use category::Category;
pub use listing::{CreateListing, Listing, ListingWithCategory};
