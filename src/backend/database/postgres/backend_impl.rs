use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{
    PostgresCategoryInserter, PostgresCategoryReader, PostgresQuestionDeleter,
    PostgresQuestionInserter, PostgresQuestionReader, PostgresQuestionUpdater,
};
use crate::backend::database::{
    UnifiedCategoryInsertOps, UnifiedCategoryReadOps, UnifiedQuestionDeleteOps,
    UnifiedQuestionInsertOps, UnifiedQuestionReadOps, UnifiedQuestionUpdateOps,
};
use crate::backend::{Backend, CategoryBackend, QuestionBackend};
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewQuestion, PageRequest, Question, QuestionPage, QuestionPatch};

/// PostgreSQL database backend implementation
pub struct PostgresBackend {
    pool: PgPool,
    question_insert_ops: UnifiedQuestionInsertOps<PostgresQuestionInserter>,
    question_update_ops: UnifiedQuestionUpdateOps<PostgresQuestionUpdater>,
    question_delete_ops: UnifiedQuestionDeleteOps<PostgresQuestionDeleter>,
    question_read_ops: UnifiedQuestionReadOps<PostgresQuestionReader>,
    category_insert_ops: UnifiedCategoryInsertOps<PostgresCategoryInserter>,
    category_read_ops: UnifiedCategoryReadOps<PostgresCategoryReader>,
}

impl PostgresBackend {
    /// Create a new PostgreSQL backend instance
    pub fn new(pool: PgPool) -> Self {
        // Create database-specific adapters
        let question_inserter = PostgresQuestionInserter::new(pool.clone());
        let question_updater = PostgresQuestionUpdater::new(pool.clone());
        let question_deleter = PostgresQuestionDeleter::new(pool.clone());
        let question_reader = PostgresQuestionReader::new(pool.clone());
        let category_inserter = PostgresCategoryInserter::new(pool.clone());
        let category_reader = PostgresCategoryReader::new(pool.clone());

        Self {
            pool,
            question_insert_ops: UnifiedQuestionInsertOps::new(question_inserter),
            question_update_ops: UnifiedQuestionUpdateOps::new(question_updater),
            question_delete_ops: UnifiedQuestionDeleteOps::new(question_deleter),
            question_read_ops: UnifiedQuestionReadOps::new(question_reader),
            category_insert_ops: UnifiedCategoryInsertOps::new(category_inserter),
            category_read_ops: UnifiedCategoryReadOps::new(category_reader),
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

        tracing::debug!(
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Health check failed: {}", e)))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }

    async fn cleanup(&self) -> AppResult<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl QuestionBackend for PostgresBackend {
    async fn create_question(&self, question: &NewQuestion) -> AppResult<Question> {
        self.question_insert_ops.create_question(question).await
    }

    async fn find_question_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        self.question_read_ops.find_question_by_id(id).await
    }

    async fn find_questions_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        self.question_read_ops.find_questions_by_ids(ids).await
    }

    async fn find_questions(&self, page: Option<PageRequest>) -> AppResult<QuestionPage> {
        self.question_read_ops.find_questions(page).await
    }

    async fn search_questions(
        &self,
        term: &str,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        self.question_read_ops.search_questions(term, page).await
    }

    async fn find_questions_by_category(
        &self,
        category_id: i64,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        self.question_read_ops
            .find_questions_by_category(category_id, page)
            .await
    }

    async fn search_questions_in_category(
        &self,
        category_id: i64,
        term: &str,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        self.question_read_ops
            .search_questions_in_category(category_id, term, page)
            .await
    }

    async fn update_question(
        &self,
        id: i64,
        question: &NewQuestion,
    ) -> AppResult<Option<Question>> {
        self.question_update_ops.update_question(id, question).await
    }

    async fn patch_question(&self, id: i64, patch: &QuestionPatch) -> AppResult<Option<Question>> {
        self.question_update_ops.patch_question(id, patch).await
    }

    async fn delete_question(&self, id: i64) -> AppResult<Option<Question>> {
        self.question_delete_ops.delete_question(id).await
    }
}

#[async_trait]
impl CategoryBackend for PostgresBackend {
    async fn create_category(&self, category_type: &str) -> AppResult<Category> {
        self.category_insert_ops.create_category(category_type).await
    }

    async fn find_category_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        self.category_read_ops.find_category_by_id(id).await
    }

    async fn find_all_categories(&self) -> AppResult<Vec<Category>> {
        self.category_read_ops.find_all_categories().await
    }

    async fn question_ids_for_category(&self, category_id: i64) -> AppResult<Vec<i64>> {
        self.category_read_ops
            .question_ids_for_category(category_id)
            .await
    }

    async fn count_categories(&self) -> AppResult<i64> {
        self.category_read_ops.count_categories().await
    }
}
