use std::env;
use std::time::Duration;

use mindwell_auth::jwt::TokenVerifier;
use mindwell_chat::session::{ChatConfig, MAX_REPLY_DELAY_MS};

const DEFAULT_BUCKET: &str = "mindwell";
const DEFAULT_MEDIA_URL_TTL_SECS: u64 = 900;

/// Runtime configuration read from the Lambda environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bucket: String,
    pub jwt_issuer: Option<String>,
    /// PEM public key (RS256). Takes precedence over `jwt_secret`.
    pub jwt_public_key: Option<String>,
    /// Shared secret (HS256), for local and staging deployments.
    pub jwt_secret: Option<String>,
    pub jwt_audience: Option<String>,
    pub chat: ChatConfig,
    pub media_url_ttl: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut chat = ChatConfig::default();
        if let Some(raw) = var("MINDWELL_CHAT_REPLY_DELAY_MS") {
            let delay_ms: u64 = raw
                .parse()
                .map_err(|e| eyre::eyre!("MINDWELL_CHAT_REPLY_DELAY_MS={raw}: {e}"))?;
            if delay_ms > MAX_REPLY_DELAY_MS {
                eyre::bail!(
                    "MINDWELL_CHAT_REPLY_DELAY_MS={delay_ms} exceeds {MAX_REPLY_DELAY_MS} ms"
                );
            }
            chat.reply_delay_ms = delay_ms;
        }
        chat.breathing_audio_url = var("MINDWELL_BREATHING_AUDIO_URL");

        let media_url_ttl = match var("MINDWELL_MEDIA_URL_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| eyre::eyre!("MINDWELL_MEDIA_URL_TTL_SECS={raw}: {e}"))?,
            None => DEFAULT_MEDIA_URL_TTL_SECS,
        };

        Ok(Self {
            bucket: var("MINDWELL_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            jwt_issuer: var("MINDWELL_JWT_ISSUER"),
            jwt_public_key: var("MINDWELL_JWT_PUBLIC_KEY"),
            jwt_secret: var("MINDWELL_JWT_SECRET"),
            jwt_audience: var("MINDWELL_JWT_AUDIENCE"),
            chat,
            media_url_ttl: Duration::from_secs(media_url_ttl),
        })
    }

    /// Build the admin token verifier. `None` when no issuer or key is
    /// configured, in which case every admin request is refused.
    pub fn token_verifier(&self) -> eyre::Result<Option<TokenVerifier>> {
        let Some(issuer) = self.jwt_issuer.as_deref() else {
            return Ok(None);
        };
        let audience = self.jwt_audience.as_deref();

        if let Some(pem) = &self.jwt_public_key {
            let verifier = TokenVerifier::rsa_pem(pem.as_bytes(), issuer, audience)?;
            return Ok(Some(verifier));
        }
        Ok(self
            .jwt_secret
            .as_ref()
            .map(|secret| TokenVerifier::shared_secret(secret.as_bytes(), issuer, audience)))
    }
}
