//! SQLite-backed expense store

use async_trait::async_trait;
use expensebook_core::{Category, Expense, ExpenseUpdate};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};
use crate::ExpenseStore;

/// Categories inserted when the category table is empty
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("cat-food", "Food"),
    ("cat-transport", "Transport"),
    ("cat-utilities", "Utilities"),
    ("cat-fun", "Entertainment"),
];

const EXPENSE_COLUMNS: &str = "id, amount, currency, category_id, merchant, note, date";

/// Expense store over one SQLite connection
///
/// Every query runs on tokio's blocking pool while holding the connection
/// lock, so async workers never wait on SQLite.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and initialize the schema
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        log::info!("Opening expense database at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Private in-memory database, mainly for tests
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        initialize(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard)
        })
        .await?
    }
}

// ==================== Schema ====================

/// Create tables, add late columns, and seed categories.
///
/// Safe to run on every start.
pub fn initialize(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )",
        (),
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id TEXT PRIMARY KEY,
            amount REAL NOT NULL,
            currency TEXT NOT NULL,
            category_id TEXT NOT NULL,
            merchant TEXT,
            note TEXT,
            date TEXT NOT NULL,
            FOREIGN KEY (category_id) REFERENCES categories(id)
        )",
        (),
    )?;

    // Databases created before merchants were tracked lack the column
    ensure_column(conn, "expenses", "merchant", "TEXT")?;
    seed_categories(conn)?;
    Ok(())
}

fn ensure_column(conn: &Connection, table: &str, column: &str, definition: &str) -> StoreResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    if !columns.iter().any(|c| c == column) {
        log::info!("Adding missing column {}.{}", table, column);
        conn.execute(
            &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition),
            (),
        )?;
    }
    Ok(())
}

fn seed_categories(conn: &Connection) -> StoreResult<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let mut stmt = conn.prepare("INSERT INTO categories (id, name) VALUES (?1, ?2)")?;
    for (id, name) in DEFAULT_CATEGORIES {
        stmt.execute(params![id, name])?;
    }
    log::info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        currency: row.get(2)?,
        category_id: row.get(3)?,
        merchant: row.get(4)?,
        note: row.get(5)?,
        date: row.get(6)?,
    })
}

fn select_expense(conn: &Connection, id: &str) -> StoreResult<Option<Expense>> {
    let expense = conn
        .query_row(
            &format!("SELECT {} FROM expenses WHERE id = ?1", EXPENSE_COLUMNS),
            params![id],
            map_expense_row,
        )
        .optional()?;
    Ok(expense)
}

// ==================== Store Implementation ====================

#[async_trait]
impl ExpenseStore for SqliteStore {
    async fn list_expenses(&self) -> StoreResult<Vec<Expense>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM expenses", EXPENSE_COLUMNS))?;
            let expenses = stmt
                .query_map([], map_expense_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(expenses)
        })
        .await
    }

    async fn get_expense(&self, id: &str) -> StoreResult<Option<Expense>> {
        let id = id.to_string();
        self.with_conn(move |conn| select_expense(conn, &id)).await
    }

    async fn create_expense(&self, expense: Expense) -> StoreResult<Expense> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO expenses (id, amount, currency, category_id, merchant, note, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    expense.id,
                    expense.amount,
                    expense.currency,
                    expense.category_id,
                    expense.merchant,
                    expense.note,
                    expense.date,
                ],
            )?;
            log::debug!("Created expense {}", expense.id);
            Ok(expense)
        })
        .await
    }

    async fn update_expense(&self, id: &str, update: ExpenseUpdate) -> StoreResult<Option<Expense>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let mut expense = match select_expense(conn, &id)? {
                Some(expense) => expense,
                None => return Ok(None),
            };
            update.apply_to(&mut expense);

            conn.execute(
                "UPDATE expenses
                 SET amount = ?1, currency = ?2, category_id = ?3, merchant = ?4, note = ?5, date = ?6
                 WHERE id = ?7",
                params![
                    expense.amount,
                    expense.currency,
                    expense.category_id,
                    expense.merchant,
                    expense.note,
                    expense.date,
                    id,
                ],
            )?;
            log::debug!("Updated expense {}", id);
            Ok(Some(expense))
        })
        .await
    }

    async fn delete_expense(&self, id: &str) -> StoreResult<bool> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let deleted = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM categories")?;
            let categories = stmt
                .query_map([], |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(categories)
        })
        .await
    }

    async fn expenses_in_range(&self, from: &str, to: &str) -> StoreResult<Vec<Expense>> {
        let (from, to) = (from.to_string(), to.to_string());
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM expenses WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC",
                EXPENSE_COLUMNS
            ))?;
            let expenses = stmt
                .query_map(params![from, to], map_expense_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(expenses)
        })
        .await
    }
}
