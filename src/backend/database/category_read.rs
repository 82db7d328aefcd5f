//! Category read operations

use crate::error::AppResult;
use crate::models::Category;
use async_trait::async_trait;

/// Database-specific adapter for category reads
#[async_trait]
pub trait CategoryReader: Send + Sync {
    async fn find_category_by_id(&self, id: i64) -> AppResult<Option<Category>>;

    /// All categories ordered by id
    async fn find_all_categories(&self) -> AppResult<Vec<Category>>;

    /// Ids of the questions in a category, ordered by id
    async fn question_ids_for_category(&self, category_id: i64) -> AppResult<Vec<i64>>;

    async fn count_categories(&self) -> AppResult<i64>;
}

/// Unified category read operations
pub struct UnifiedCategoryReadOps<T: CategoryReader> {
    reader: T,
}

impl<T: CategoryReader> UnifiedCategoryReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_category_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        if id <= 0 {
            return Ok(None);
        }
        self.reader.find_category_by_id(id).await
    }

    pub async fn find_all_categories(&self) -> AppResult<Vec<Category>> {
        self.reader.find_all_categories().await
    }

    pub async fn question_ids_for_category(&self, category_id: i64) -> AppResult<Vec<i64>> {
        if category_id <= 0 {
            return Ok(Vec::new());
        }
        self.reader.question_ids_for_category(category_id).await
    }

    pub async fn count_categories(&self) -> AppResult<i64> {
        self.reader.count_categories().await
    }
}
