use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::question_insert::QuestionInserter;
use super::question_read_impl::{fold_case, question_from_row, QUESTION_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::{NewQuestion, Question};

/// SQLite-specific implementation of QuestionInserter
pub struct SqliteQuestionInserter {
    pool: SqlitePool,
}

impl SqliteQuestionInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionInserter for SqliteQuestionInserter {
    async fn execute_question_insert(&self, question: &NewQuestion) -> AppResult<Question> {
        let sql = format!(
            "INSERT INTO questions (question, question_folded, answer, difficulty, category_id) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
            QUESTION_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&question.question)
            .bind(fold_case(&question.question))
            .bind(&question.answer)
            .bind(question.difficulty)
            .bind(question.category)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "question"))?;

        question_from_row(&row)
    }
}

/// Map constraint violations to client errors, everything else to a database error
pub fn map_database_error(error: sqlx::Error, resource_type: &str) -> AppError {
    let error_str = error.to_string();
    if error_str.contains("FOREIGN KEY constraint") {
        AppError::BadRequest("category does not exist".to_string())
    } else if error_str.contains("CHECK constraint") {
        AppError::BadRequest("difficulty is out of range".to_string())
    } else {
        AppError::Database(format!("Failed to write {}: {}", resource_type, error_str))
    }
}
