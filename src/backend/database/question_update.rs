use async_trait::async_trait;

use super::question_insert::QuestionInsertProcessor;
use crate::error::{AppError, AppResult};
use crate::models::{NewQuestion, Question, QuestionPatch};
use crate::validation::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Database-specific adapter for question UPDATE operations
///
/// Both methods return `None` when no question has the given id.
#[async_trait]
pub trait QuestionUpdater: Send + Sync {
    /// Overwrite every column of the question
    async fn execute_question_update(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> AppResult<Option<Question>>;

    /// Overwrite only the columns present in the patch
    async fn execute_question_patch(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> AppResult<Option<Question>>;
}

/// Shared business logic for question UPDATE operations
pub struct QuestionUpdateProcessor;

impl QuestionUpdateProcessor {
    pub fn validate_patch(patch: &QuestionPatch) -> AppResult<()> {
        if let Some(difficulty) = patch.difficulty {
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
                return Err(AppError::BadRequest(format!(
                    "difficulty must be between {} and {}",
                    MIN_DIFFICULTY, MAX_DIFFICULTY
                )));
            }
        }
        if matches!(patch.category, Some(category) if category <= 0) {
            return Err(AppError::BadRequest(
                "category id must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge a patch over an existing question
    pub fn apply_patch(existing: &Question, patch: &QuestionPatch) -> Question {
        Question {
            id: existing.id,
            question: patch
                .question
                .clone()
                .unwrap_or_else(|| existing.question.clone()),
            answer: patch
                .answer
                .clone()
                .unwrap_or_else(|| existing.answer.clone()),
            difficulty: patch.difficulty.unwrap_or(existing.difficulty),
            category: patch.category.unwrap_or(existing.category),
        }
    }
}

/// Unified question UPDATE operations using the adapter pattern
pub struct UnifiedQuestionUpdateOps<T: QuestionUpdater> {
    updater: T,
}

impl<T: QuestionUpdater> UnifiedQuestionUpdateOps<T> {
    pub fn new(updater: T) -> Self {
        Self { updater }
    }

    pub async fn update_question(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> AppResult<Option<Question>> {
        if id <= 0 {
            return Ok(None);
        }
        QuestionInsertProcessor::validate_new_question(question)?;
        self.updater.execute_question_update(id, question).await
    }

    pub async fn patch_question(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> AppResult<Option<Question>> {
        if id <= 0 {
            return Ok(None);
        }
        QuestionUpdateProcessor::validate_patch(patch)?;
        self.updater.execute_question_patch(id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Question {
        Question {
            id: 3,
            question: "The Taj Mahal is located in which Indian city?".to_string(),
            answer: "Agra".to_string(),
            difficulty: 2,
            category: 3,
        }
    }

    #[test]
    fn test_apply_patch_keeps_absent_fields() {
        let patch = QuestionPatch {
            answer: Some("Agra, Uttar Pradesh".to_string()),
            difficulty: Some(3),
            ..Default::default()
        };

        let merged = QuestionUpdateProcessor::apply_patch(&existing(), &patch);

        assert_eq!(merged.id, 3);
        assert_eq!(merged.question, existing().question);
        assert_eq!(merged.answer, "Agra, Uttar Pradesh");
        assert_eq!(merged.difficulty, 3);
        assert_eq!(merged.category, 3);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let merged = QuestionUpdateProcessor::apply_patch(&existing(), &QuestionPatch::default());
        assert_eq!(merged, existing());
    }

    #[test]
    fn test_validate_patch() {
        assert!(QuestionUpdateProcessor::validate_patch(&QuestionPatch::default()).is_ok());
        assert!(QuestionUpdateProcessor::validate_patch(&QuestionPatch {
            difficulty: Some(7),
            ..Default::default()
        })
        .is_err());
        assert!(QuestionUpdateProcessor::validate_patch(&QuestionPatch {
            category: Some(-2),
            ..Default::default()
        })
        .is_err());
    }
}
