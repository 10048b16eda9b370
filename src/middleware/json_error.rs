use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    response::{JsonApiResponse, log_app_error},
};

// Longer rejection bodies fall back to the status reason phrase.
const REJECTION_BODY_LIMIT: usize = 16 * 1024;

/// Wraps axum's plain-text rejections (body parse errors, path parse errors,
/// 405s) in the same envelope handlers produce. Responses that are already
/// JSON pass through untouched.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error())
        || content_type_is_json(response.headers().get(header::CONTENT_TYPE))
    {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let text = to_bytes(body, REJECTION_BODY_LIMIT)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let error = classify(status, rejection_message(status, text));
    if status.is_server_error() {
        log_app_error(&error, status);
    }

    let mut envelope = JsonApiResponse::from_error(&error);
    envelope.status = status.as_u16();
    let mut wrapped = envelope.into_response();

    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);
    wrapped.headers_mut().extend(parts.headers);
    wrapped
}

fn content_type_is_json(value: Option<&HeaderValue>) -> bool {
    let Some(value) = value.and_then(|value| value.to_str().ok()) else {
        return false;
    };
    let value = value.to_ascii_lowercase();
    value.starts_with("application/json") || value.contains("+json")
}

fn rejection_message(status: StatusCode, text: String) -> String {
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

fn classify(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        status if status.is_client_error() => AppError::bad_request(message),
        _ => AppError::internal(message),
    }
}
