use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Question;

/// Database-specific adapter for question DELETE operations
#[async_trait]
pub trait QuestionDeleter: Send + Sync {
    /// Delete the question and return the removed row, if there was one
    async fn execute_question_delete(&self, id: i64) -> AppResult<Option<Question>>;
}

/// Unified question DELETE operations using the adapter pattern
pub struct UnifiedQuestionDeleteOps<T: QuestionDeleter> {
    deleter: T,
}

impl<T: QuestionDeleter> UnifiedQuestionDeleteOps<T> {
    pub fn new(deleter: T) -> Self {
        Self { deleter }
    }

    pub async fn delete_question(&self, id: i64) -> AppResult<Option<Question>> {
        // Ids are assigned from 1 upwards
        if id <= 0 {
            return Ok(None);
        }
        self.deleter.execute_question_delete(id).await
    }
}
