use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::Client as S3Client;
use mindwell_auth::jwt::TokenVerifier;
use mindwell_chat::session::ChatConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub bucket: String,
    /// `None` disables the admin routes.
    pub verifier: Option<Arc<TokenVerifier>>,
    pub chat: ChatConfig,
    pub media_url_ttl: Duration,
}
