//! JWT bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Registered claims carried by service tokens. Only expiry is enforced;
/// identity and permissions live with the external identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
}

/// Signs a new HS256 token valid for `ttl`.
///
/// Issuance normally happens at the external identity provider; this
/// exists for operational tooling and tests.
///
/// # Errors
///
/// Returns [`AppError::Store`] if signing fails.
pub fn issue_token(secret: &str, ttl: Duration) -> Result<String, AppError> {
    let claims = Claims {
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::store("Failed to sign token", json!({ "cause": e.to_string() })))
}

/// Validates an HS256 token against the configured secret, including its
/// expiry claim.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] for a malformed, mis-signed, or
/// expired token.
pub fn validate_token(token: &str, secret: &str) -> Result<(), AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|_| ())
    .map_err(|e| {
        AppError::unauthorized("JWT token is invalid", json!({ "reason": e.to_string() }))
    })
}

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, the token format is
/// invalid, or validation fails.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let req = Request::from_parts(parts, body);

    validate_token(&token, &st.jwt_secret)?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_validates() {
        let token = issue_token("secret", Duration::hours(1)).unwrap();
        assert!(validate_token(&token, "secret").is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("secret", Duration::hours(1)).unwrap();
        let err = validate_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token("secret", Duration::hours(-1)).unwrap();
        assert!(validate_token(&token, "secret").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(validate_token("not-a-jwt", "secret").is_err());
    }
}
