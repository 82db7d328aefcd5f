use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{NewQuestion, Question};
use crate::validation::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Database-specific adapter for question INSERT operations
#[async_trait]
pub trait QuestionInserter: Send + Sync {
    /// Insert the question and return the stored row
    async fn execute_question_insert(&self, question: &NewQuestion) -> AppResult<Question>;
}

/// Shared business logic for question INSERT operations
pub struct QuestionInsertProcessor;

impl QuestionInsertProcessor {
    /// Check the invariants the schema relies on before touching the database
    pub fn validate_new_question(question: &NewQuestion) -> AppResult<()> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&question.difficulty) {
            return Err(AppError::BadRequest(format!(
                "difficulty must be between {} and {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY
            )));
        }
        if question.category <= 0 {
            return Err(AppError::BadRequest(
                "category id must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unified question INSERT operations using the adapter pattern
pub struct UnifiedQuestionInsertOps<T: QuestionInserter> {
    inserter: T,
}

impl<T: QuestionInserter> UnifiedQuestionInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    pub async fn create_question(&self, question: &NewQuestion) -> AppResult<Question> {
        QuestionInsertProcessor::validate_new_question(question)?;
        self.inserter.execute_question_insert(question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(difficulty: i32, category: i64) -> NewQuestion {
        NewQuestion {
            question: "Who are you?".to_string(),
            answer: "Someone".to_string(),
            difficulty,
            category,
        }
    }

    #[test]
    fn test_validate_new_question() {
        assert!(QuestionInsertProcessor::validate_new_question(&new_question(1, 1)).is_ok());
        assert!(QuestionInsertProcessor::validate_new_question(&new_question(5, 6)).is_ok());
        assert!(QuestionInsertProcessor::validate_new_question(&new_question(0, 1)).is_err());
        assert!(QuestionInsertProcessor::validate_new_question(&new_question(6, 1)).is_err());
        assert!(QuestionInsertProcessor::validate_new_question(&new_question(3, 0)).is_err());
    }
}
