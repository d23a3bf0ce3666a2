// SPDX-License-Identifier: AGPL-3.0-or-later

//! Product repository.

use sqlx::SqlitePool;

use super::StoreResult;
use crate::models::Product;

pub struct ProductRepository;

impl ProductRepository {
    /// All products, oldest first.
    pub async fn list(pool: &SqlitePool) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, sku, description, price, category_id, created_by, created_at \
             FROM products ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(products)
    }

    /// Insert a new product.
    pub async fn insert(pool: &SqlitePool, product: &Product) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, sku, description, price, category_id, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category_id)
        .bind(&product.created_by)
        .bind(product.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::{testing, UserRepository};
    use chrono::Utc;

    fn product(id: &str, name: &str, sku: Option<&str>) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            sku: sku.map(String::from),
            description: None,
            price: 4500,
            category_id: None,
            created_by: "admin1".into(),
            created_at: Utc::now(),
        }
    }

    async fn pool_with_admin() -> SqlitePool {
        let pool = testing::pool().await;
        UserRepository::create(&pool, "admin1", "admin@shop.com", None, "hash", Role::Admin)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn insert_and_list_roundtrip() {
        let pool = pool_with_admin().await;
        ProductRepository::insert(&pool, &product("p1", "CBD Oil", Some("CBD-OIL-001")))
            .await
            .unwrap();
        ProductRepository::insert(&pool, &product("p2", "Gummies", None))
            .await
            .unwrap();

        let listed = ProductRepository::list(&pool).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "CBD Oil");
        assert_eq!(listed[0].sku.as_deref(), Some("CBD-OIL-001"));
        assert_eq!(listed[1].price, 4500);
    }

    #[tokio::test]
    async fn duplicate_sku_is_unique_violation() {
        let pool = pool_with_admin().await;
        ProductRepository::insert(&pool, &product("p1", "First", Some("SKU-1")))
            .await
            .unwrap();

        let err = ProductRepository::insert(&pool, &product("p2", "Second", Some("SKU-1")))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn missing_sku_is_not_unique_constrained() {
        let pool = pool_with_admin().await;
        ProductRepository::insert(&pool, &product("p1", "First", None)).await.unwrap();
        ProductRepository::insert(&pool, &product("p2", "Second", None)).await.unwrap();
        assert_eq!(ProductRepository::list(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_category_is_foreign_key_violation() {
        let pool = pool_with_admin().await;
        let mut bad = product("p1", "Orphan", None);
        bad.category_id = Some("no-such-category".into());

        let err = ProductRepository::insert(&pool, &bad).await.unwrap_err();
        assert!(err.is_foreign_key_violation());
    }
}
