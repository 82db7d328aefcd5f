use async_trait::async_trait;
use sqlx::PgPool;

use super::super::question_update::{QuestionUpdateProcessor, QuestionUpdater};
use super::question_insert_impl::map_database_error;
use super::question_read_impl::{question_from_row, QUESTION_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::{NewQuestion, Question, QuestionPatch};

/// PostgreSQL-specific implementation of QuestionUpdater
pub struct PostgresQuestionUpdater {
    pool: PgPool,
}

impl PostgresQuestionUpdater {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn update_sql() -> String {
        format!(
            "UPDATE questions SET question = $1, answer = $2, difficulty = $3, category_id = $4 WHERE id = $5 RETURNING {}",
            QUESTION_COLUMNS
        )
    }
}

#[async_trait]
impl QuestionUpdater for PostgresQuestionUpdater {
    async fn execute_question_update(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> AppResult<Option<Question>> {
        let row = sqlx::query(&Self::update_sql())
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.difficulty)
            .bind(question.category)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "question"))?;

        row.as_ref().map(question_from_row).transpose()
    }

    async fn execute_question_patch(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> AppResult<Option<Question>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to start transaction: {}", e)))?;

        // Lock the row so concurrent patches merge against the latest version
        let select_sql = format!(
            "SELECT {} FROM questions WHERE id = $1 FOR UPDATE",
            QUESTION_COLUMNS
        );
        let existing = sqlx::query(&select_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Failed to load question: {}", e)))?;

        let existing = match existing {
            Some(row) => question_from_row(&row)?,
            None => return Ok(None),
        };

        let merged = QuestionUpdateProcessor::apply_patch(&existing, patch);

        let row = sqlx::query(&Self::update_sql())
            .bind(&merged.question)
            .bind(&merged.answer)
            .bind(merged.difficulty)
            .bind(merged.category)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_database_error(e, "question"))?;
        let updated = question_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(Some(updated))
    }
}
