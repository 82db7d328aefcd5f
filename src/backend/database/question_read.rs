//! Question read operations
//!
//! Every listing endpoint (plain list, search, per-category list, per-category
//! search) is the same query with a different set of filters, so the
//! database adapters implement a single filtered read and this module maps
//! each endpoint onto it.

use crate::error::AppResult;
use crate::models::{PageRequest, Question, QuestionPage};
use async_trait::async_trait;

/// Filters applied to a question listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuery {
    /// Restrict to a single category
    pub category_id: Option<i64>,
    /// Escaped LIKE pattern matched case-insensitively against the question text
    pub pattern: Option<String>,
}

/// Database-specific adapter for question reads
#[async_trait]
pub trait QuestionReader: Send + Sync {
    async fn find_question_by_id(&self, id: i64) -> AppResult<Option<Question>>;

    /// Fetch the questions with the given ids, ordered by id
    async fn find_questions_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>>;

    /// Fetch a filtered, optionally paginated listing ordered by id
    async fn find_questions(
        &self,
        query: &QuestionQuery,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage>;
}

/// Shared logic for question reads
pub struct QuestionReadProcessor;

impl QuestionReadProcessor {
    /// Character used in `LIKE ... ESCAPE` clauses
    pub const LIKE_ESCAPE: char = '\\';

    /// Build a LIKE pattern matching `term` anywhere in the text.
    ///
    /// Wildcards in the term are escaped so it matches literally.
    pub fn search_pattern(term: &str) -> String {
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if c == '%' || c == '_' || c == Self::LIKE_ESCAPE {
                pattern.push(Self::LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Sort and deduplicate ids, dropping ones that can never exist
    pub fn normalize_ids(ids: &[i64]) -> Vec<i64> {
        let mut ids: Vec<i64> = ids.iter().copied().filter(|id| *id > 0).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Unified question read operations
pub struct UnifiedQuestionReadOps<T: QuestionReader> {
    reader: T,
}

impl<T: QuestionReader> UnifiedQuestionReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_question_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        if id <= 0 {
            return Ok(None);
        }
        self.reader.find_question_by_id(id).await
    }

    pub async fn find_questions_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        let ids = QuestionReadProcessor::normalize_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.reader.find_questions_by_ids(&ids).await
    }

    pub async fn find_questions(&self, page: Option<PageRequest>) -> AppResult<QuestionPage> {
        self.reader
            .find_questions(&QuestionQuery::default(), page)
            .await
    }

    pub async fn search_questions(
        &self,
        term: &str,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        let query = QuestionQuery {
            category_id: None,
            pattern: Some(QuestionReadProcessor::search_pattern(term)),
        };
        self.reader.find_questions(&query, page).await
    }

    pub async fn find_questions_by_category(
        &self,
        category_id: i64,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        let query = QuestionQuery {
            category_id: Some(category_id),
            pattern: None,
        };
        self.reader.find_questions(&query, page).await
    }

    pub async fn search_questions_in_category(
        &self,
        category_id: i64,
        term: &str,
        page: Option<PageRequest>,
    ) -> AppResult<QuestionPage> {
        let query = QuestionQuery {
            category_id: Some(category_id),
            pattern: Some(QuestionReadProcessor::search_pattern(term)),
        };
        self.reader.find_questions(&query, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern() {
        assert_eq!(QuestionReadProcessor::search_pattern("what"), "%what%");
        assert_eq!(QuestionReadProcessor::search_pattern(""), "%%");
        assert_eq!(QuestionReadProcessor::search_pattern("100%"), "%100\\%%");
        assert_eq!(QuestionReadProcessor::search_pattern("a_b"), "%a\\_b%");
        assert_eq!(QuestionReadProcessor::search_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_normalize_ids() {
        assert_eq!(
            QuestionReadProcessor::normalize_ids(&[5, 2, 5, -1, 0, 3]),
            vec![2, 3, 5]
        );
        assert!(QuestionReadProcessor::normalize_ids(&[]).is_empty());
    }
}
