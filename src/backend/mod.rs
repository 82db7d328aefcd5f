use crate::error::AppResult;
use crate::models::{Category, NewQuestion, PageRequest, Question, QuestionPage, QuestionPatch};
use async_trait::async_trait;
use std::sync::Arc;

pub mod database;

/// Supported database backend types
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
}

/// Core backend abstraction for the question bank
///
/// Every storage implementation (SQLite, PostgreSQL) implements this trait
/// together with the resource-specific traits below.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect and initialize the storage backend
    async fn connect(config: &crate::backend::database::DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Check if the storage backend is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create the categories and questions tables if needed
    async fn init_schema(&self) -> AppResult<()>;

    /// Clean up resources when storage is no longer needed
    async fn cleanup(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Question-specific backend operations
///
/// Every list operation orders by question id and returns the total number
/// of matches alongside the requested page.
#[async_trait]
pub trait QuestionBackend: Backend {
    /// Insert a question and return it with its assigned id
    async fn create_question(&self, question: &NewQuestion) -> AppResult<Question>;

    async fn find_question_by_id(&self, id: i64) -> AppResult<Option<Question>>;

    /// Find the questions for a set of ids; unknown ids are skipped
    async fn find_questions_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>>;

    /// All questions, optionally paginated
    async fn find_questions(&self, page: Option<PageRequest>) -> AppResult<QuestionPage>;

    /// Questions whose text contains `term`, case-insensitively
    async fn search_questions(
        &self,
        term: &str,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage>;

    /// Questions belonging to a category
    async fn find_questions_by_category(
        &self,
        category_id: i64,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage>;

    /// Questions in a category whose text contains `term`, case-insensitively
    async fn search_questions_in_category(
        &self,
        category_id: i64,
        term: &str,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage>;

    /// Replace every field of an existing question
    async fn update_question(&self, id: i64, question: &NewQuestion)
        -> AppResult<Option<Question>>;

    /// Apply a partial edit to an existing question
    async fn patch_question(&self, id: i64, patch: &QuestionPatch) -> AppResult<Option<Question>>;

    /// Delete a question, returning the removed row
    async fn delete_question(&self, id: i64) -> AppResult<Option<Question>>;
}

/// Category-specific backend operations
#[async_trait]
pub trait CategoryBackend: Backend {
    /// Insert a category and return it with its assigned id
    async fn create_category(&self, category_type: &str) -> AppResult<Category>;

    async fn find_category_by_id(&self, id: i64) -> AppResult<Option<Category>>;

    /// All categories ordered by id
    async fn find_all_categories(&self) -> AppResult<Vec<Category>>;

    /// Ids of the questions owned by a category, ordered by id
    async fn question_ids_for_category(&self, category_id: i64) -> AppResult<Vec<i64>>;

    async fn count_categories(&self) -> AppResult<i64>;
}

/// Combined backend interface for questions and categories
pub trait TriviaBackend: QuestionBackend + CategoryBackend {}

/// Automatic implementation for any type that implements both traits
impl<T> TriviaBackend for T where T: QuestionBackend + CategoryBackend {}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend based on configuration
    pub async fn create(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Arc<dyn TriviaBackend>> {
        let backend = Self::create_backend(config).await?;
        Ok(Arc::from(backend))
    }

    /// Create a backend based on configuration (returns Box)
    pub async fn create_backend(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Box<dyn TriviaBackend>> {
        match config.database_type {
            DatabaseType::PostgreSQL => {
                let backend =
                    crate::backend::database::postgres::PostgresBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
            DatabaseType::SQLite => {
                let backend =
                    crate::backend::database::sqlite::SqliteBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
        }
    }
}
