use async_trait::async_trait;
use sqlx::PgPool;

use super::super::question_delete::QuestionDeleter;
use super::question_read_impl::{question_from_row, QUESTION_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::Question;

/// PostgreSQL-specific implementation of QuestionDeleter
pub struct PostgresQuestionDeleter {
    pool: PgPool,
}

impl PostgresQuestionDeleter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionDeleter for PostgresQuestionDeleter {
    async fn execute_question_delete(&self, id: i64) -> AppResult<Option<Question>> {
        let sql = format!("DELETE FROM questions WHERE id = $1 RETURNING {}", QUESTION_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete question: {}", e)))?;

        row.as_ref().map(question_from_row).transpose()
    }
}
