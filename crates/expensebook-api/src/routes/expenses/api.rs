//! Expenses API endpoints
//!
//! Endpoints:
//! - expenses_list: All expenses (JSON)
//! - expenses_create: Create from a JSON payload
//! - expenses_get: Single expense (JSON)
//! - expenses_update: Partial update from a JSON payload
//! - expenses_delete: Remove an expense

use crate::{ApiError, AppState};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use expensebook_core::{CoreError, Expense, ExpenseUpdate, NewExpense};
use expensebook_utils::generate_id;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a request body into `T`.
///
/// Empty bodies, malformed JSON and JSON that is not an object all count
/// as an empty payload. An object whose fields have the wrong types is
/// rejected.
fn parse_payload<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            log::debug!("Ignoring non-object request body");
            return Ok(T::default());
        }
        Err(e) => {
            log::debug!("Ignoring unparseable request body: {}", e);
            return Ok(T::default());
        }
    };
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest {
        message: format!("Invalid request body: {}", e),
    })
}

/// List all expenses (JSON API)
pub async fn expenses_list(State(state): State<AppState>) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = state.store.list_expenses().await?;
    Ok(Json(expenses))
}

/// Create an expense (JSON API)
pub async fn expenses_create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let payload: NewExpense = parse_payload(&body)?;
    let expense = payload.into_expense(generate_id())?;
    let expense = state.store.create_expense(expense).await?;
    log::info!("Created expense {} dated {}", expense.id, expense.date);
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Get a single expense (JSON API)
pub async fn expenses_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    state
        .store
        .get_expense(&id)
        .await?
        .map(Json)
        .ok_or_else(|| CoreError::expense_not_found(&id).into())
}

/// Update fields of an expense (JSON API)
pub async fn expenses_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Expense>, ApiError> {
    let update: ExpenseUpdate = parse_payload(&body)?;
    state
        .store
        .update_expense(&id, update)
        .await?
        .map(Json)
        .ok_or_else(|| CoreError::expense_not_found(&id).into())
}

/// Delete an expense
pub async fn expenses_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_expense(&id).await? {
        log::info!("Deleted expense {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::expense_not_found(&id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_falls_back_to_empty() {
        let bodies: [&[u8]; 5] = [b"", b"not json", b"null", b"[1, 2]", b"\"text\""];
        for body in bodies {
            let update: ExpenseUpdate = parse_payload(body).unwrap();
            assert_eq!(update, ExpenseUpdate::default());
        }
    }

    #[test]
    fn test_parse_payload_keeps_every_field() {
        let update: ExpenseUpdate = parse_payload(br#"{"note": "Train", "amount": 12.5}"#).unwrap();
        assert_eq!(update.note, Some(Some("Train".to_string())));
        assert_eq!(update.amount, Some(12.5));
    }

    #[test]
    fn test_parse_payload_rejects_mistyped_field() {
        let result = parse_payload::<ExpenseUpdate>(br#"{"note": "Train", "amount": "12.50"}"#);
        match result {
            Err(ApiError::BadRequest { message }) => {
                assert!(message.starts_with("Invalid request body"), "{}", message)
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }

        let result = parse_payload::<NewExpense>(br#"{"amount": "3", "currency": "USD"}"#);
        assert!(matches!(result, Err(ApiError::BadRequest { .. })));
    }
}
