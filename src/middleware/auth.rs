use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::validate_jwt;
use crate::error::ApiError;
use crate::types::RecordId;

/// Authenticated caller extracted from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caller {
    pub id: RecordId,
}

/// JWT authentication middleware that validates tokens and injects the `Caller`
pub async fn jwt_auth_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(|msg| {
        tracing::warn!("Rejected request: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let claims = validate_jwt(&token).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        ApiError::unauthorized(e.to_string())
    })?;

    let id = RecordId::parse(&claims.sub).ok_or_else(|| {
        tracing::warn!("Rejected token with malformed subject '{}'", claims.sub);
        ApiError::unauthorized("Token subject is not a valid user id")
    })?;

    request.extensions_mut().insert(Caller { id });

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
