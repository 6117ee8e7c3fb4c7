use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

/// Request-id middleware: preserve an inbound `x-request-id` or generate one,
/// expose it to handlers through extensions and echo it on the response.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let header_name = HeaderName::from_static("x-request-id");

    let req_id_value = req
        .headers()
        .get(&header_name)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap());

    req.extensions_mut().insert(req_id_value.clone());

    let mut res = next.run(req).await;

    res.headers_mut().insert(header_name, req_id_value);

    res
}

/// Content negotiation: accept JSON for Accept, and require a JSON
/// Content-Type on POST/PUT bodies.
pub async fn content_negotiation(req: Request<Body>, next: Next) -> Response {
    let accepts_hdr = req.headers().get("accept").and_then(|v| v.to_str().ok());
    let accept_ok = accepts_hdr
        .map(|v| {
            let v = v.to_ascii_lowercase();
            v.contains("application/json") || v.contains("*/*")
        })
        .unwrap_or(true); // if missing, treat as ok per HTTP defaults

    if !accept_ok {
        return error_response(
            StatusCode::NOT_ACCEPTABLE,
            "Only application/json is supported in Accept",
        );
    }

    let method = req.method().clone();
    let needs_body_type = method == axum::http::Method::POST || method == axum::http::Method::PUT;

    if needs_body_type {
        let content_length = req
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        if content_length > 0 {
            let content_ok = req
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_ascii_lowercase().starts_with("application/json"))
                .unwrap_or(false);

            if !content_ok {
                return error_response(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "Request bodies must be application/json",
                );
            }
        }
    }

    next.run(req).await
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": {
            "code": "unsupported_media_type",
            "message": message,
        }
    });
    (status, axum::Json(body)).into_response()
}
