//! Cross-origin resource sharing
//!
//! Only origins from an explicit list are echoed back. Credentials are allowed,
//! so a wildcard origin is never sent.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE_SECS: &str = "600";

/// The set of origins allowed to call the api from a browser.
#[derive(Clone, Debug)]
pub struct AllowedOrigins(Arc<[String]>);

impl AllowedOrigins {
    /// Create the set from a list of origins such as `http://localhost:3000`.
    pub fn new(origins: impl IntoIterator<Item = String>) -> Self {
        Self(origins.into_iter().collect())
    }

    /// Whether `origin` matches one of the allowed origins exactly.
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

/// Middleware answering preflights and decorating responses for allowed origins.
///
/// Requests without an `Origin` header pass through untouched. A preflight from
/// an allowed origin gets a `204` with every method and the requested headers
/// allowed; a preflight from any other origin is refused with a `400`.
pub async fn cors(
    State(origins): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    let Some(origin) = request.headers().get(header::ORIGIN).cloned() else {
        return next.run(request).await;
    };
    let allowed = origins.allows(&origin);

    if is_preflight(&request) {
        if !allowed {
            log::warn!("refusing preflight from origin {origin:?}");
            let body = Json(serde_json::json!({ "error": "Disallowed CORS origin" }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        insert_origin_headers(headers, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        if let Some(requested) = request
            .headers()
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
        }
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECS),
        );
        return response;
    }

    let mut response = next.run(request).await;
    if allowed {
        insert_origin_headers(response.headers_mut(), origin);
    }
    response
}

fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

fn insert_origin_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
}
