//! Expense routes - CRUD over stored expenses
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{
    expenses_create,
    expenses_delete,
    expenses_get,
    expenses_list,
    expenses_update,
};
