use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Group an identity must belong to for dashboard access.
pub const ADMIN_GROUP: &str = "admin";

/// Claims read from an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    /// Group memberships. Cognito issues these as `cognito:groups`.
    #[serde(default, alias = "cognito:groups")]
    pub groups: Vec<String>,
}

impl Claims {
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// Verifies tokens against one key, issuer and (optionally) audience.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// RS256 verification with a PEM-encoded public key.
    pub fn rsa_pem(pem: &[u8], issuer: &str, audience: Option<&str>) -> Result<Self, AuthError> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| AuthError::Config(format!("bad RSA public key: {e}")))?;
        Ok(Self::new(key, Algorithm::RS256, issuer, audience))
    }

    /// HS256 verification with a shared secret.
    pub fn shared_secret(secret: &[u8], issuer: &str, audience: Option<&str>) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256, issuer, audience)
    }

    fn new(key: DecodingKey, algorithm: Algorithm, issuer: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.validate_exp = true;
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        Self { key, validation }
    }

    /// Validate signature, expiry, issuer and audience.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::from(e),
            }
        })?;
        Ok(token_data.claims)
    }

    /// Validate the token and require membership in [`ADMIN_GROUP`].
    pub fn authorize_admin(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token)?;
        if !claims.in_group(ADMIN_GROUP) {
            debug!(sub = %claims.sub, "token lacks admin group");
            return Err(AuthError::Forbidden {
                sub: claims.sub,
                group: ADMIN_GROUP.to_string(),
            });
        }
        Ok(claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::MissingToken)?;
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
