// SPDX-License-Identifier: AGPL-3.0-or-later

//! Category repository.

use sqlx::SqlitePool;

use super::StoreResult;
use crate::models::Category;

pub struct CategoryRepository;

impl CategoryRepository {
    /// All categories with their product counts, ordered by name.
    pub async fn list_with_counts(pool: &SqlitePool) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name, c.slug, c.description, COUNT(p.id) AS product_count \
             FROM categories c \
             LEFT JOIN products p ON p.category_id = c.id \
             GROUP BY c.id \
             ORDER BY c.name ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }
}
