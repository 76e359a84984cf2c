//! Reports API endpoint - expense report as a PDF download

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use expensebook_core::{
    render_expense_report, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger, ReportQuery,
};
use std::collections::HashMap;

const PDF_FILENAME: &str = "expenses.pdf";

/// Render the expense report for `from`..=`to`, optionally grouped by
/// `groupBy` (`week` or `month`)
pub async fn expenses_report_pdf(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let from = params.get("from").map(String::as_str);
    let to = params.get("to").map(String::as_str);
    let group_by = params.get("groupBy").map(String::as_str);

    let context = ErrorContext::new("expenses_report_pdf")
        .with_data("from", serde_json::json!(from))
        .with_data("to", serde_json::json!(to))
        .with_data("groupBy", serde_json::json!(group_by));
    let report_error = |error: CoreError| {
        DefaultErrorLogger.log_error(&error, &context);
        ApiError::from(error)
    };

    let query = ReportQuery::parse(from, to, group_by).map_err(report_error)?;
    let expenses = state.store.expenses_in_range(query.from(), query.to()).await?;
    let pdf = render_expense_report(&expenses, &query).map_err(report_error)?;

    log::info!(
        "Generated report {} to {} ({}): {} expenses, {} bytes",
        query.from(),
        query.to(),
        query.group_by(),
        expenses.len(),
        pdf.len()
    );

    let headers = [
        (CONTENT_TYPE, "application/pdf".to_string()),
        (CACHE_CONTROL, "no-store".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", PDF_FILENAME),
        ),
    ];
    Ok((headers, pdf).into_response())
}
