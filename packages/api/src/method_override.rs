//! Lets HTML forms, which can only send GET and POST, reach the PUT and DELETE
//! routes: `POST /fruits/{id}?_method=DELETE` is routed as `DELETE /fruits/{id}`.

use axum::{
    extract::{Query, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct OverrideParams {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Rewrite the method of a `POST` request whose query names `PUT`, `PATCH` or
/// `DELETE` in `_method`. Must run before routing.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(method) = requested_method(&request) {
            debug!(%method, path = %request.uri().path(), "Overriding request method");
            *request.method_mut() = method;
        }
    }

    next.run(request).await
}

fn requested_method(request: &Request) -> Option<Method> {
    let Query(params) = Query::<OverrideParams>::try_from_uri(request.uri()).ok()?;
    match params.method?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
