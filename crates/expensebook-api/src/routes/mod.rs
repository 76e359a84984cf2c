//! Route modules for the API server
//!
//! - expenses: list, create, read, update, delete
//! - categories: category listing
//! - reports: PDF expense report
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: endpoint handlers

pub mod categories;
pub mod expenses;
pub mod reports;
