//! Listing query construction.

mod builder;

pub use builder::ListingQuery;
