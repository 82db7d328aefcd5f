use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::AppError;

pub const NO_JSON_BODY: &str = "no json body was found";

/// JSON body extractor that rejects missing and empty bodies.
///
/// A body counts as missing when the Content-Type is not JSON, when the
/// payload does not parse, or when it is a falsy JSON value: `null`, `false`,
/// zero, or an empty object, array or string. All of these are reported as the same 400 so clients
/// see one consistent message.
pub struct TriviaJson(pub Value);

fn is_json_content_type(req: &Request) -> bool {
    let Some(content_type) = req.headers().get(header::CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };

    // Drop parameters such as charset before comparing
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    media_type == "application/json" || media_type.ends_with("+json")
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

impl<S> FromRequest<S> for TriviaJson
where
    S: Send + Sync,
{
    type Rejection = TriviaJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(&req) {
            return Err(TriviaJsonRejection::MissingBody);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| TriviaJsonRejection::MissingBody)?;

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|_| TriviaJsonRejection::MissingBody)?;

        if is_empty_json(&value) {
            return Err(TriviaJsonRejection::MissingBody);
        }

        Ok(TriviaJson(value))
    }
}

#[derive(Debug)]
pub enum TriviaJsonRejection {
    MissingBody,
}

impl From<TriviaJsonRejection> for AppError {
    fn from(rejection: TriviaJsonRejection) -> Self {
        match rejection {
            TriviaJsonRejection::MissingBody => AppError::BadRequest(NO_JSON_BODY.to_string()),
        }
    }
}

impl IntoResponse for TriviaJsonRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
