//! Shape validation for request bodies
//!
//! These checks only look at the JSON itself. Anything that needs the
//! database (does the category exist, does the question exist) is checked by
//! the handlers afterwards and reported with the same messages.

use crate::error::{AppError, AppResult};
use crate::models::{NewQuestion, QuestionPatch, QuizRequest};
use serde_json::{Map, Value};

pub const INVALID_QUESTION: &str = "input question was bad or not formatted correctly";
pub const INVALID_QUIZ: &str = "quiz input was bad or not formatted correctly";

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

const QUESTION_FIELDS: [&str; 4] = ["question", "answer", "difficulty", "category"];
const QUIZ_FIELDS: [&str; 2] = ["previous_questions", "quiz_category"];

/// Coerce a JSON value into an integer.
///
/// Accepts integers, integral floats and strings holding an integer
/// (`"3"`, `" 4 "`). Booleans and fractional numbers are rejected.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn as_object<'a>(body: &'a Value, message: &str) -> AppResult<&'a Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

fn reject_unknown_fields(
    obj: &Map<String, Value>,
    allowed: &[&str],
    message: &str,
) -> AppResult<()> {
    if obj.keys().any(|key| !allowed.contains(&key.as_str())) {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(())
}

fn string_field(value: &Value) -> AppResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(INVALID_QUESTION.to_string()))
}

fn difficulty_field(value: &Value) -> AppResult<i32> {
    coerce_int(value)
        .filter(|d| (MIN_DIFFICULTY as i64..=MAX_DIFFICULTY as i64).contains(d))
        .map(|d| d as i32)
        .ok_or_else(|| AppError::BadRequest(INVALID_QUESTION.to_string()))
}

fn category_field(value: &Value) -> AppResult<i64> {
    coerce_int(value).ok_or_else(|| AppError::BadRequest(INVALID_QUESTION.to_string()))
}

/// Validate the body of a create or full replace
pub fn parse_new_question(body: &Value) -> AppResult<NewQuestion> {
    let obj = as_object(body, INVALID_QUESTION)?;
    reject_unknown_fields(obj, &QUESTION_FIELDS, INVALID_QUESTION)?;

    let field = |name: &str| {
        obj.get(name)
            .ok_or_else(|| AppError::BadRequest(INVALID_QUESTION.to_string()))
    };

    Ok(NewQuestion {
        question: string_field(field("question")?)?,
        answer: string_field(field("answer")?)?,
        difficulty: difficulty_field(field("difficulty")?)?,
        category: category_field(field("category")?)?,
    })
}

/// Validate the body of a partial edit
pub fn parse_question_patch(body: &Value) -> AppResult<QuestionPatch> {
    let obj = as_object(body, INVALID_QUESTION)?;
    reject_unknown_fields(obj, &QUESTION_FIELDS, INVALID_QUESTION)?;

    Ok(QuestionPatch {
        question: obj.get("question").map(string_field).transpose()?,
        answer: obj.get("answer").map(string_field).transpose()?,
        difficulty: obj.get("difficulty").map(difficulty_field).transpose()?,
        category: obj.get("category").map(category_field).transpose()?,
    })
}

/// Validate the body of a quiz request
///
/// A `null` category is treated as "all categories".
pub fn parse_quiz_request(body: &Value) -> AppResult<QuizRequest> {
    let invalid = || AppError::BadRequest(INVALID_QUIZ.to_string());

    let obj = as_object(body, INVALID_QUIZ)?;
    reject_unknown_fields(obj, &QUIZ_FIELDS, INVALID_QUIZ)?;

    let previous_questions = obj
        .get("previous_questions")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?
        .iter()
        .map(|v| coerce_int(v).ok_or_else(invalid))
        .collect::<AppResult<Vec<i64>>>()?;

    let quiz_category = match obj.get("quiz_category") {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_int(v).ok_or_else(invalid)?),
    };

    Ok(QuizRequest {
        previous_questions,
        quiz_category,
    })
}

/// Pull `search_term` out of a search body.
///
/// Returns `Ok(None)` when the key is absent; non-string terms are rejected.
pub fn search_term(body: &Value) -> AppResult<Option<String>> {
    match body.get("search_term") {
        None => Ok(None),
        Some(Value::String(term)) => Ok(Some(term.clone())),
        Some(_) => Err(AppError::BadRequest(
            "search term must be a string".to_string(),
        )),
    }
}
