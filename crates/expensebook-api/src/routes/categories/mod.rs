//! Category routes - read-only category listing

pub mod api;

pub use api::categories_list;
