use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use super::super::question_read::{QuestionQuery, QuestionReader};
use crate::error::{AppError, AppResult};
use crate::models::{PageRequest, Question, QuestionPage};

pub(super) const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category_id";

pub(super) fn question_from_row(row: &PgRow) -> AppResult<Question> {
    Ok(Question {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        difficulty: row.try_get("difficulty")?,
        category: row.try_get("category_id")?,
    })
}

/// PostgreSQL-specific implementation of QuestionReader
pub struct PostgresQuestionReader {
    pool: PgPool,
}

impl PostgresQuestionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &QuestionQuery) {
        let mut has_where = false;

        if let Some(category_id) = query.category_id {
            builder.push(" WHERE category_id = ").push_bind(category_id);
            has_where = true;
        }

        if let Some(pattern) = &query.pattern {
            builder
                .push(if has_where { " AND " } else { " WHERE " })
                .push("question ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
    }
}

#[async_trait]
impl QuestionReader for PostgresQuestionReader {
    async fn find_question_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find question: {}", e)))?;

        row.as_ref().map(question_from_row).transpose()
    }

    async fn find_questions_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        let sql = format!(
            "SELECT {} FROM questions WHERE id = ANY($1) ORDER BY id",
            QUESTION_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find questions by id: {}", e)))?;

        rows.iter().map(question_from_row).collect()
    }

    async fn find_questions(
        &self,
        query: &QuestionQuery,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM questions", QUESTION_COLUMNS));
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY id");

        if let Some(page) = page {
            builder
                .push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list questions: {}", e)))?;
        let questions = rows
            .iter()
            .map(question_from_row)
            .collect::<AppResult<Vec<Question>>>()?;

        let total = match page {
            None => questions.len() as i64,
            Some(_) => {
                let mut count_builder =
                    QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM questions");
                Self::push_filters(&mut count_builder, query);
                count_builder
                    .build_query_scalar::<i64>()
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to count questions: {}", e)))?
            }
        };

        Ok(QuestionPage { questions, total })
    }
}
