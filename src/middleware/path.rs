//! Id path parameter extractor.
//!
//! Works like `axum::extract::Path<String>`, but reports rejections as
//! `ApiError` so an undecodable id segment is rendered like any other
//! malformed id.

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use crate::error::ApiError;

/// The single id segment of a route such as `/api/products/:product_id`
pub struct PathId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => Ok(PathId(raw)),
            Err(PathRejection::FailedToDeserializePathParams(rejection)) => {
                debug!(reason = %rejection.body_text(), "id path segment rejected");
                Err(ApiError::MalformedId)
            }
            Err(rejection) => Err(ApiError::unknown(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn handler(PathId(raw): PathId) -> String {
        raw
    }

    async fn send(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let app = Router::new().route("/items/:id", get(handler));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, bytes.to_vec())
    }

    #[tokio::test]
    async fn passes_the_decoded_segment_through() {
        let (status, _, body) = send("/items/abc%2Ddef").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"abc-def");
    }

    #[tokio::test]
    async fn undecodable_segment_is_a_malformed_id() {
        let (status, content_type, body) = send("/items/%FF").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({ "message": "Error: Invalid user id or user id does not exist" })
        );
    }
}
