//! Expense persistence
//!
//! The HTTP layer talks to storage through [`ExpenseStore`]; [`SqliteStore`]
//! is the implementation backed by a single SQLite file.

use async_trait::async_trait;
use expensebook_core::{Category, Expense, ExpenseUpdate};
use std::sync::Arc;

pub mod error;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::{SqliteStore, DEFAULT_CATEGORIES};

/// Store reference type
pub type StoreRef = Arc<dyn ExpenseStore>;

// ==================== Store Trait ====================

/// Trait for expense storage backends
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// All expenses in storage order
    async fn list_expenses(&self) -> StoreResult<Vec<Expense>>;

    /// A single expense by id
    async fn get_expense(&self, id: &str) -> StoreResult<Option<Expense>>;

    /// Insert a fully built expense and return it
    async fn create_expense(&self, expense: Expense) -> StoreResult<Expense>;

    /// Merge `update` into the stored expense; `None` if it does not exist
    async fn update_expense(&self, id: &str, update: ExpenseUpdate) -> StoreResult<Option<Expense>>;

    /// Remove an expense; `false` if nothing was deleted
    async fn delete_expense(&self, id: &str) -> StoreResult<bool>;

    /// All categories
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Expenses with `from <= date <= to`, oldest first.
    ///
    /// Bounds compare as ISO date strings.
    async fn expenses_in_range(&self, from: &str, to: &str) -> StoreResult<Vec<Expense>>;
}
