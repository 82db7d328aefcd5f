use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{
    SqliteCategoryInserter, SqliteCategoryReader, SqliteQuestionDeleter, SqliteQuestionInserter,
    SqliteQuestionReader, SqliteQuestionUpdater,
};
use crate::backend::database::{
    UnifiedCategoryInsertOps, UnifiedCategoryReadOps, UnifiedQuestionDeleteOps,
    UnifiedQuestionInsertOps, UnifiedQuestionReadOps, UnifiedQuestionUpdateOps,
};
use crate::backend::{Backend, CategoryBackend, QuestionBackend};
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewQuestion, PageRequest, Question, QuestionPage, QuestionPatch};

/// SQLite database backend implementation
///
/// Used for development, tests and small single-node deployments. An
/// in-memory database lives exactly as long as its one pooled connection.
pub struct SqliteBackend {
    pool: SqlitePool,
    question_insert_ops: UnifiedQuestionInsertOps<SqliteQuestionInserter>,
    question_update_ops: UnifiedQuestionUpdateOps<SqliteQuestionUpdater>,
    question_delete_ops: UnifiedQuestionDeleteOps<SqliteQuestionDeleter>,
    question_read_ops: UnifiedQuestionReadOps<SqliteQuestionReader>,
    category_insert_ops: UnifiedCategoryInsertOps<SqliteCategoryInserter>,
    category_read_ops: UnifiedCategoryReadOps<SqliteCategoryReader>,
}

impl SqliteBackend {
    /// Create a new SQLite backend instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            question_insert_ops: UnifiedQuestionInsertOps::new(SqliteQuestionInserter::new(
                pool.clone(),
            )),
            question_update_ops: UnifiedQuestionUpdateOps::new(SqliteQuestionUpdater::new(
                pool.clone(),
            )),
            question_delete_ops: UnifiedQuestionDeleteOps::new(SqliteQuestionDeleter::new(
                pool.clone(),
            )),
            question_read_ops: UnifiedQuestionReadOps::new(SqliteQuestionReader::new(pool.clone())),
            category_insert_ops: UnifiedCategoryInsertOps::new(SqliteCategoryInserter::new(
                pool.clone(),
            )),
            category_read_ops: UnifiedCategoryReadOps::new(SqliteCategoryReader::new(pool.clone())),
            pool,
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let options = SqliteConnectOptions::from_str(&config.connection_url)
            .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // An in-memory database disappears with its last connection, so keep
        // one connection open for the lifetime of the pool
        pool_options = if config.is_memory_database() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        tracing::debug!(url = %config.connection_url, "Connected to SQLite");

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
impl QuestionBackend for SqliteBackend {
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
impl CategoryBackend for SqliteBackend {
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
