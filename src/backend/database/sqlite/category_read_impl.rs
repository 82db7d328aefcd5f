use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::super::category_read::CategoryReader;
use crate::error::{AppError, AppResult};
use crate::models::Category;

pub(super) fn category_from_row(row: &SqliteRow) -> AppResult<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        category_type: row.try_get("type")?,
    })
}

/// SQLite-specific implementation of CategoryReader
pub struct SqliteCategoryReader {
    pool: SqlitePool,
}

impl SqliteCategoryReader {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryReader for SqliteCategoryReader {
    async fn find_category_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find category: {}", e)))?;

        row.as_ref().map(category_from_row).transpose()
    }

    async fn find_all_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list categories: {}", e)))?;

        rows.iter().map(category_from_row).collect()
    }

    async fn question_ids_for_category(&self, category_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar("SELECT id FROM questions WHERE category_id = ?1 ORDER BY id")
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to list category question ids: {}", e))
            })
    }

    async fn count_categories(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count categories: {}", e)))
    }
}
