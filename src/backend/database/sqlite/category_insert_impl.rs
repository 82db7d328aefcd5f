use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::category_insert::CategoryInserter;
use super::category_read_impl::category_from_row;
use crate::error::{AppError, AppResult};
use crate::models::Category;

/// SQLite-specific implementation of CategoryInserter
pub struct SqliteCategoryInserter {
    pool: SqlitePool,
}

impl SqliteCategoryInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryInserter for SqliteCategoryInserter {
    async fn execute_category_insert(&self, category_type: &str) -> AppResult<Category> {
        let row = sqlx::query("INSERT INTO categories (type) VALUES (?1) RETURNING id, type")
            .bind(category_type)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create category: {}", e)))?;

        category_from_row(&row)
    }
}
