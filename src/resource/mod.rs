//! HTTP handlers for the trivia resources

pub mod category;
pub mod fallback;
pub mod question;
pub mod quiz;

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::TriviaBackend;
use crate::error::{AppError, AppResult};
use crate::models::PageRequest;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn TriviaBackend>,
    pub questions_per_page: i64,
}

impl AppState {
    pub fn new(backend: Arc<dyn TriviaBackend>, questions_per_page: i64) -> Self {
        Self {
            backend,
            questions_per_page,
        }
    }

    /// Read the optional one-indexed `page` query parameter
    pub fn page_request(&self, params: &HashMap<String, String>) -> AppResult<Option<PageRequest>> {
        let Some(raw) = params.get("page") else {
            return Ok(None);
        };

        let page = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("page must be an integer".to_string()))?;

        if page < 1 {
            return Err(AppError::BadRequest("pages are one indexed".to_string()));
        }

        Ok(Some(PageRequest::new(page, self.questions_per_page)))
    }
}

/// Parse an `{id}` path segment
///
/// Only plain ASCII digits name a resource. Anything else, signs included,
/// gets the same answer as an unknown route.
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    let not_found = || AppError::NotFound(fallback::URL_NOT_FOUND.to_string());

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse::<i64>().map_err(|_| not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::database::{DatabaseBackendConfig, SqliteBackend};
    use crate::backend::Backend;

    async fn state() -> AppState {
        let backend = SqliteBackend::connect(&DatabaseBackendConfig::memory_sqlite())
            .await
            .unwrap();
        AppState::new(Arc::new(backend), 10)
    }

    fn params(page: &str) -> HashMap<String, String> {
        HashMap::from([("page".to_string(), page.to_string())])
    }

    #[tokio::test]
    async fn test_page_request() {
        let state = state().await;

        assert_eq!(state.page_request(&HashMap::new()).unwrap(), None);
        assert_eq!(
            state.page_request(&params("2")).unwrap(),
            Some(PageRequest::new(2, 10))
        );

        match state.page_request(&params("0")) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "pages are one indexed"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert!(state.page_request(&params("-3")).is_err());
        assert!(state.page_request(&params("two")).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("007").unwrap(), 7);
        for raw in ["abc", "-1", "+1", "", " 1", "1.0", "99999999999999999999"] {
            assert!(matches!(parse_id(raw), Err(AppError::NotFound(_))), "{raw:?}");
        }
    }
}
