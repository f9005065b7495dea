use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_FIELDS: [&str; 6] = [
    "password",
    "accessToken",
    "access_token",
    "token",
    "secret",
    "authorization",
];

const SENSITIVE_HEADERS: [header::HeaderName; 3] =
    [header::AUTHORIZATION, header::COOKIE, header::SET_COOKIE];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/") || path.starts_with("/swagger-ui")
}

/// Replaces sensitive JSON fields at any depth.
fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SENSITIVE_FIELDS.iter().any(|s| s.eq_ignore_ascii_case(key)) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact_json(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {}
    }
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    for name in SENSITIVE_HEADERS {
        if filtered.contains_key(&name) {
            filtered.insert(name, HeaderValue::from_static(REDACTED));
        }
    }
    filtered
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false)
}

fn json_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut json) => {
            redact_json(&mut json);
            json
        }
        Err(_) => Value::Null,
    }
}

/// Logs one line per request. Only JSON bodies are logged, and only for
/// writes; roster uploads and workbook downloads are never buffered for logging.
pub async fn http_logger(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();

    if should_ignore_path(&path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let is_write = matches!(method, Method::POST | Method::PUT | Method::PATCH);

    let (req, req_body) = if is_write && is_json(&req_headers) {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let logged = json_body(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), logged)
    } else {
        (req, Value::Null)
    };

    let mut response = next.run(req).await;
    let latency = start_time.elapsed();
    let status = response.status();

    let res_body = if is_write && is_json(response.headers()) {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let logged = json_body(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        logged
    } else {
        Value::Null
    };

    tracing::info!(
        method = %method,
        path = %path,
        query = uri.query().unwrap_or(""),
        x_request_id = %x_request_id,
        req_headers = ?redact_headers(&req_headers),
        req_body = %req_body,
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        res_body = %res_body,
        app_env = %APP_CONFIG.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            format!("failed to read {direction} body: {err}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passwords_and_tokens_are_redacted() {
        let mut body = json!({
            "username": "admin",
            "password": "hunter22",
            "nested": { "accessToken": "abc" },
            "items": [{ "token": "xyz" }]
        });
        redact_json(&mut body);
        assert_eq!(
            body,
            json!({
                "username": "admin",
                "password": REDACTED,
                "nested": { "accessToken": REDACTED },
                "items": [{ "token": REDACTED }]
            })
        );
    }

    #[test]
    fn test_authorization_header_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));

        let filtered = redact_headers(&headers);
        assert_eq!(filtered[header::AUTHORIZATION], REDACTED);
        assert_eq!(filtered[header::ACCEPT], "*/*");
    }
}
