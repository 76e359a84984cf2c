//! Expense model and PDF report generation
//!
//! The report pipeline runs in two steps: [`report::build_report_lines`]
//! lays out the text, [`pdf::build_pdf_bytes`] serializes it. Both are pure
//! and synchronous; callers hand in expenses already filtered to the query
//! range and sorted by date.

pub mod error;
pub mod models;
pub mod pdf;
pub mod query;
pub mod report;
pub mod time;
pub mod types;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{Category, Expense, ExpenseUpdate, NewExpense};
pub use pdf::build_pdf_bytes;
pub use query::ReportQuery;
pub use report::{build_report_lines, build_report_lines_at, summarize_buckets, Bucket};
pub use types::GroupBy;

// ==================== Report Rendering ====================

/// Lay out and serialize an expense report in one call
pub fn render_expense_report(expenses: &[Expense], query: &ReportQuery) -> CoreResult<Vec<u8>> {
    let lines = build_report_lines(expenses, query);
    log::debug!(
        "Rendering report {}..{} ({}) with {} expenses, {} lines",
        query.from(),
        query.to(),
        query.group_by(),
        expenses.len(),
        lines.len()
    );
    build_pdf_bytes(&lines)
}
