use axum::{extract::State, Json};
use rand::seq::SliceRandom;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::TriviaJson;
use crate::models::Question;
use crate::validation::{self, INVALID_QUIZ};

/// POST /quizzes
///
/// Picks one question the player has not seen yet, uniformly at random from
/// the requested category or from every category when none is given.
pub async fn play_quiz(
    State(state): State<AppState>,
    TriviaJson(body): TriviaJson,
) -> AppResult<Json<Value>> {
    let request = validation::parse_quiz_request(&body)?;
    let invalid = || AppError::BadRequest(INVALID_QUIZ.to_string());

    let seen: BTreeSet<i64> = request.previous_questions.iter().copied().collect();
    let seen_ids: Vec<i64> = seen.iter().copied().collect();
    let previous = state.backend.find_questions_by_ids(&seen_ids).await?;
    if previous.len() != seen.len() {
        return Err(invalid());
    }

    let in_scope = match request.quiz_category {
        Some(category_id) => {
            state
                .backend
                .find_category_by_id(category_id)
                .await?
                .ok_or_else(invalid)?;

            if previous.iter().any(|q| q.category != category_id) {
                return Err(AppError::BadRequest(
                    "a question does not belong to category".to_string(),
                ));
            }

            state
                .backend
                .find_questions_by_category(category_id, None)
                .await?
        }
        None => state.backend.find_questions(None).await?,
    };

    let pool: Vec<Question> = in_scope
        .questions
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .collect();

    let mut response = Map::new();
    response.insert("success".to_string(), json!(true));
    if let Some(question) = pool.choose(&mut rand::thread_rng()) {
        response.insert("question".to_string(), serde_json::to_value(question)?);
    }
    response.insert("total_questions".to_string(), json!(pool.len()));
    if let Some(category_id) = request.quiz_category {
        response.insert("category".to_string(), json!(category_id));
    }

    Ok(Json(Value::Object(response)))
}
