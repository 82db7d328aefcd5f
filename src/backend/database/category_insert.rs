use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::Category;

/// Database-specific adapter for category INSERT operations
#[async_trait]
pub trait CategoryInserter: Send + Sync {
    async fn execute_category_insert(&self, category_type: &str) -> AppResult<Category>;
}

/// Shared business logic for category INSERT operations
pub struct CategoryInsertProcessor;

impl CategoryInsertProcessor {
    /// Trim the category name and reject blank ones
    pub fn prepare_category_type(category_type: &str) -> AppResult<String> {
        let trimmed = category_type.trim();
        if trimmed.is_empty() {
            return Err(AppError::BadRequest(
                "Category type cannot be empty".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Unified category INSERT operations using the adapter pattern
pub struct UnifiedCategoryInsertOps<T: CategoryInserter> {
    inserter: T,
}

impl<T: CategoryInserter> UnifiedCategoryInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    pub async fn create_category(&self, category_type: &str) -> AppResult<Category> {
        let category_type = CategoryInsertProcessor::prepare_category_type(category_type)?;
        self.inserter.execute_category_insert(&category_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_category_type() {
        assert_eq!(
            CategoryInsertProcessor::prepare_category_type("  Science ").unwrap(),
            "Science"
        );
        assert!(CategoryInsertProcessor::prepare_category_type("").is_err());
        assert!(CategoryInsertProcessor::prepare_category_type("   ").is_err());
    }
}
