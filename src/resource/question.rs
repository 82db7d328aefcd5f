use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use super::{parse_id, AppState};
use crate::error::{AppError, AppResult};
use crate::extractors::{TriviaJson, TriviaJsonRejection};
use crate::validation::{self, INVALID_QUESTION};

fn missing_question(id: i64) -> AppError {
    AppError::Unprocessable(format!("no question found with id {}", id))
}

/// Questions must point at a category that exists
async fn ensure_category_exists(state: &AppState, category_id: i64) -> AppResult<()> {
    match state.backend.find_category_by_id(category_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(INVALID_QUESTION.to_string())),
    }
}

/// Make sure the question exists before the body is looked at
async fn ensure_question_exists(state: &AppState, id: i64) -> AppResult<()> {
    match state.backend.find_question_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(missing_question(id)),
    }
}

/// GET /questions
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Value>> {
    let page = state.page_request(&params)?;
    let result = state.backend.find_questions(page).await?;

    if result.questions.is_empty() {
        return Err(AppError::NotFound("no questions found".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "questions": result.questions,
        "total_questions": result.total
    })))
}

/// GET /questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;

    let question = state
        .backend
        .find_question_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no question found with id {}", id)))?;

    Ok(Json(json!({
        "success": true,
        "question": question
    })))
}

/// POST /questions
///
/// A body carrying `search_term` is a search, anything else is a create.
pub async fn post_questions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    TriviaJson(body): TriviaJson,
) -> AppResult<Json<Value>> {
    match validation::search_term(&body)? {
        Some(term) => search_questions(&state, &params, term).await,
        None => create_question(&state, &body).await,
    }
}

async fn search_questions(
    state: &AppState,
    params: &HashMap<String, String>,
    term: String,
) -> AppResult<Json<Value>> {
    let page = state.page_request(params)?;
    let result = state.backend.search_questions(&term, page).await?;

    if result.questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "no questions with search term '{}' found",
            term
        )));
    }

    Ok(Json(json!({
        "success": true,
        "search_term": term,
        "questions": result.questions,
        "total_questions": result.total
    })))
}

async fn create_question(state: &AppState, body: &Value) -> AppResult<Json<Value>> {
    let new_question = validation::parse_new_question(body)?;
    ensure_category_exists(state, new_question.category).await?;

    let question = state.backend.create_question(&new_question).await?;
    tracing::info!(id = question.id, category = question.category, "Question created");

    Ok(Json(json!({
        "success": true,
        "question": question
    })))
}

/// PUT /questions/{id}
pub async fn replace_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<TriviaJson, TriviaJsonRejection>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;
    ensure_question_exists(&state, id).await?;

    let TriviaJson(body) = body?;
    let replacement = validation::parse_new_question(&body)?;
    ensure_category_exists(&state, replacement.category).await?;

    let question = state
        .backend
        .update_question(id, &replacement)
        .await?
        .ok_or_else(|| missing_question(id))?;

    Ok(Json(json!({
        "success": true,
        "question": question
    })))
}

/// PATCH /questions/{id}
pub async fn patch_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<TriviaJson, TriviaJsonRejection>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;
    ensure_question_exists(&state, id).await?;

    let TriviaJson(body) = body?;
    let patch = validation::parse_question_patch(&body)?;
    if let Some(category_id) = patch.category {
        ensure_category_exists(&state, category_id).await?;
    }

    let question = state
        .backend
        .patch_question(id, &patch)
        .await?
        .ok_or_else(|| missing_question(id))?;

    Ok(Json(json!({
        "success": true,
        "question": question
    })))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;

    let question = state
        .backend
        .delete_question(id)
        .await?
        .ok_or_else(|| missing_question(id))?;
    tracing::info!(id = question.id, "Question deleted");

    Ok(Json(json!({
        "success": true,
        "question": question
    })))
}
