use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::super::question_read::{QuestionQuery, QuestionReader};
use crate::error::{AppError, AppResult};
use crate::models::{PageRequest, Question, QuestionPage};

pub(super) const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category_id";

/// Case folding applied to stored question text and to search patterns
pub(super) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Map a `questions` row onto the API model
pub(super) fn question_from_row(row: &SqliteRow) -> AppResult<Question> {
    Ok(Question {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        difficulty: row.try_get("difficulty")?,
        category: row.try_get("category_id")?,
    })
}

/// SQLite-specific implementation of QuestionReader
pub struct SqliteQuestionReader {
    pool: SqlitePool,
}

impl SqliteQuestionReader {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append the WHERE clause for a listing
    ///
    /// Searches run against `question_folded` with a folded pattern so
    /// non-ASCII letters match regardless of case.
    fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &QuestionQuery) {
        let mut has_where = false;

        if let Some(category_id) = query.category_id {
            builder.push(" WHERE category_id = ").push_bind(category_id);
            has_where = true;
        }

        if let Some(pattern) = &query.pattern {
            builder
                .push(if has_where { " AND " } else { " WHERE " })
                .push("question_folded LIKE ")
                .push_bind(fold_case(pattern))
                .push(" ESCAPE '\\'");
        }
    }
}

#[async_trait]
impl QuestionReader for SqliteQuestionReader {
    async fn find_question_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let sql = format!("SELECT {} FROM questions WHERE id = ?1", QUESTION_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find question: {}", e)))?;

        row.as_ref().map(question_from_row).transpose()
    }

    async fn find_questions_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM questions WHERE id IN (",
            QUESTION_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        let rows = builder
            .build()
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
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM questions", QUESTION_COLUMNS));
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
                    QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM questions");
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
