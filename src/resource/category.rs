use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use super::{parse_id, AppState};
use crate::error::{AppError, AppResult};
use crate::extractors::{TriviaJson, TriviaJsonRejection};
use crate::models::{Category, CategoryResponse};
use crate::validation;

async fn with_question_ids(state: &AppState, category: Category) -> AppResult<CategoryResponse> {
    let ids = state.backend.question_ids_for_category(category.id).await?;
    Ok(CategoryResponse::new(category, ids))
}

async fn load_category(state: &AppState, id: i64) -> AppResult<CategoryResponse> {
    let category = state
        .backend
        .find_category_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no category found with id {}", id)))?;

    with_question_ids(state, category).await
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let categories = state.backend.find_all_categories().await?;

    if categories.is_empty() {
        return Err(AppError::NotFound("no categories found".to_string()));
    }

    let mut responses = Vec::with_capacity(categories.len());
    for category in categories {
        responses.push(with_question_ids(&state, category).await?);
    }

    Ok(Json(json!({
        "success": true,
        "categories": responses
    })))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let category = load_category(&state, parse_id(&id)?).await?;

    Ok(Json(json!({
        "success": true,
        "category": category
    })))
}

/// GET /categories/{id}/questions
pub async fn list_category_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;
    let category = load_category(&state, id).await?;

    let page = state.page_request(&params)?;
    let result = state.backend.find_questions_by_category(id, page).await?;

    if result.questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "no questions found in category {}",
            id
        )));
    }

    Ok(Json(json!({
        "success": true,
        "category": category,
        "questions": result.questions,
        "total_questions": result.total
    })))
}

/// POST /categories/{id}/questions
pub async fn search_category_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Result<TriviaJson, TriviaJsonRejection>,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;
    let category = load_category(&state, id).await?;

    let TriviaJson(body) = body?;
    let term = validation::search_term(&body)?
        .ok_or_else(|| AppError::BadRequest("no search term found".to_string()))?;

    let page = state.page_request(&params)?;
    let result = state
        .backend
        .search_questions_in_category(id, &term, page)
        .await?;

    if result.questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "no questions with search term '{}' found in category {}",
            term, id
        )));
    }

    Ok(Json(json!({
        "success": true,
        "category": category,
        "questions": result.questions,
        "total_questions": result.total,
        "search_term": term
    })))
}
