use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Initialize the trivia schema for SQLite
///
/// Creates the categories and questions tables with the foreign key that
/// removes a category's questions together with it. `question_folded` holds
/// the question text lower-cased in Rust, since SQLite's LIKE only folds
/// ASCII.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let categories_sql = r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL
        )
    "#;

    sqlx::query(categories_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create categories table: {}", e)))?;

    let questions_sql = r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            question_folded TEXT NOT NULL,
            answer TEXT NOT NULL,
            difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5),
            category_id INTEGER NOT NULL,
            FOREIGN KEY (category_id) REFERENCES categories (id) ON DELETE CASCADE
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
pub async fn drop_schema(pool: &SqlitePool) -> AppResult<()> {
    // Questions first because of the foreign key
    for table in ["questions", "categories"] {
        let sql = format!("DROP TABLE IF EXISTS {}", table);
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to drop table {}: {}", table, e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_schema_creation() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();
        // Idempotent
        init_schema(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);

        drop_schema(&pool).await.unwrap();

        let missing = sqlx::query("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_difficulty_check_constraint() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO categories (type) VALUES ('Science')")
            .execute(&pool)
            .await
            .unwrap();

        let result = sqlx::query(
            "INSERT INTO questions (question, question_folded, answer, difficulty, category_id) VALUES ('Q', 'q', 'A', 9, 1)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
