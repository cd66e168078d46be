use super::jwt::{AuthUser, JwtAuth};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// Bearer authentication middleware.
///
/// Validates the JWT from the Authorization header or cookie, then inserts
/// an [`AuthUser`] (user id + role name) into request extensions. Requests
/// without a verifiable credential are rejected with 401 before the handler
/// runs.
///
/// # Example
///
/// ```ignore
/// use axum_helpers::{JwtAuth, bearer_auth_middleware};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", get(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         bearer_auth_middleware
///     ));
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header or cookie");
            return Err(AppError::Unauthorized("No token provided".to_string()).into_response());
        }
    };

    // Verify JWT signature and decode claims
    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()).into_response());
        }
    };

    // The subject must be a user id
    let user = match AuthUser::try_from(&claims) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!("JWT subject is not a valid user id: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()).into_response());
        }
    };

    // Token is valid - insert the caller identity into request extensions
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
