//! Categories API endpoints

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use expensebook_core::Category;

/// List all categories (JSON API)
pub async fn categories_list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(categories))
}
