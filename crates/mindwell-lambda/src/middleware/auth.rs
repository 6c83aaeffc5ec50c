use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use mindwell_auth::jwt::bearer_token;

use crate::error::ApiError;
use crate::state::AppState;

/// Admin gate for the dashboard routes.
///
/// Validates the `Authorization: Bearer <token>` header and requires the
/// admin group. On success, inserts [`AdminUser`] into request extensions.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let verifier = state
        .verifier
        .as_ref()
        .ok_or_else(|| ApiError::Unauthorized("admin access is not configured".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;
    let claims = verifier.authorize_admin(token)?;

    req.extensions_mut().insert(AdminUser { sub: claims.sub });

    Ok(next.run(req).await)
}

/// Authenticated administrator extracted from JWT claims.
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub sub: String,
}
