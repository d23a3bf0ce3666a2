// SPDX-License-Identifier: AGPL-3.0-or-later

//! Category endpoints.

use axum::{extract::State, Json};

use crate::{error::ApiError, models::Category, state::AppState, store::CategoryRepository};

/// List all categories with their product counts.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "All categories", body = [Category]),
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = CategoryRepository::list_with_counts(&state.pool).await?;
    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    #[tokio::test]
    async fn lists_empty_catalog() {
        let state = AppState::new(store::testing::pool().await);
        let Json(categories) = list_categories(State(state)).await.unwrap();
        assert!(categories.is_empty());
    }
}
