use crate::error::{AppError, AppResult};
use sqlx::PgPool;

/// Initialize the trivia schema for PostgreSQL
///
/// Ids are BIGSERIAL so they decode straight into `i64`.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let categories_sql = r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
    "#;

    sqlx::query(categories_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create categories table: {}", e)))?;

    let questions_sql = r#"
        CREATE TABLE IF NOT EXISTS questions (
            id BIGSERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5),
            category_id BIGINT NOT NULL REFERENCES categories (id) ON DELETE CASCADE
        )
    "#;

    sqlx::query(questions_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create questions table: {}", e)))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category_id ON questions (category_id)")
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;

    Ok(())
}

/// Drop the trivia schema (for cleanup/testing)
pub async fn drop_schema(pool: &PgPool) -> AppResult<()> {
    for table in ["questions", "categories"] {
        let sql = format!("DROP TABLE IF EXISTS {} CASCADE", table);
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to drop table {}: {}", table, e)))?;
    }

    Ok(())
}
