use async_trait::async_trait;
use sqlx::PgPool;

use super::super::question_insert::QuestionInserter;
use super::question_read_impl::{question_from_row, QUESTION_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::{NewQuestion, Question};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// PostgreSQL-specific implementation of QuestionInserter
pub struct PostgresQuestionInserter {
    pool: PgPool,
}

impl PostgresQuestionInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionInserter for PostgresQuestionInserter {
    async fn execute_question_insert(&self, question: &NewQuestion) -> AppResult<Question> {
        let sql = format!(
            "INSERT INTO questions (question, answer, difficulty, category_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.difficulty)
            .bind(question.category)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "question"))?;

        question_from_row(&row)
    }
}

/// Map constraint violations (by SQLSTATE) to client errors
pub fn map_database_error(error: sqlx::Error, resource_type: &str) -> AppError {
    let code = error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(FOREIGN_KEY_VIOLATION) => AppError::BadRequest("category does not exist".to_string()),
        Some(CHECK_VIOLATION) => AppError::BadRequest("difficulty is out of range".to_string()),
        _ => AppError::Database(format!("Failed to write {}: {}", resource_type, error)),
    }
}
