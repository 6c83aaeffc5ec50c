use jsonwebtoken::{EncodingKey, Header, encode};
use mindwell_auth::error::AuthError;
use mindwell_auth::jwt::{Claims, TokenVerifier, bearer_token};
use serde_json::json;

const SECRET: &[u8] = b"test-signing-secret";
const ISSUER: &str = "https://auth.mindwell.test";

fn now() -> u64 {
    jiff::Timestamp::now().as_second() as u64
}

fn token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

fn admin_claims() -> serde_json::Value {
    json!({
        "sub": "counselor-1",
        "iss": ISSUER,
        "iat": now(),
        "exp": now() + 600,
        "cognito:groups": ["admin"],
    })
}

#[test]
fn admin_token_is_accepted() {
    let verifier = TokenVerifier::shared_secret(SECRET, ISSUER, None);
    let claims: Claims = verifier.authorize_admin(&token(admin_claims())).unwrap();
    assert_eq!(claims.sub, "counselor-1");
    assert!(claims.in_group("admin"));
}

#[test]
fn non_admin_is_forbidden() {
    let verifier = TokenVerifier::shared_secret(SECRET, ISSUER, None);
    let mut claims = admin_claims();
    claims["cognito:groups"] = json!(["students"]);

    let t = token(claims);
    assert!(verifier.validate_token(&t).is_ok());
    assert!(matches!(
        verifier.authorize_admin(&t),
        Err(AuthError::Forbidden { .. })
    ));
}

#[test]
fn expired_token_is_rejected() {
    let verifier = TokenVerifier::shared_secret(SECRET, ISSUER, None);
    let mut claims = admin_claims();
    claims["iat"] = json!(now() - 7200);
    claims["exp"] = json!(now() - 3600);

    assert!(matches!(
        verifier.validate_token(&token(claims)),
        Err(AuthError::TokenExpired)
    ));
}

#[test]
fn wrong_issuer_is_rejected() {
    let verifier = TokenVerifier::shared_secret(SECRET, "https://someone-else", None);
    assert!(matches!(
        verifier.validate_token(&token(admin_claims())),
        Err(AuthError::Jwt(_))
    ));
}

#[test]
fn wrong_secret_is_rejected() {
    let verifier = TokenVerifier::shared_secret(b"other-secret", ISSUER, None);
    assert!(verifier.validate_token(&token(admin_claims())).is_err());
}

#[test]
fn audience_is_enforced_when_configured() {
    let verifier = TokenVerifier::shared_secret(SECRET, ISSUER, Some("dashboard"));
    assert!(verifier.validate_token(&token(admin_claims())).is_err());

    let mut claims = admin_claims();
    claims["aud"] = json!("dashboard");
    assert!(verifier.validate_token(&token(claims)).is_ok());
}

#[test]
fn bearer_header_parsing() {
    assert_eq!(bearer_token(Some("Bearer abc.def")).unwrap(), "abc.def");
    assert!(matches!(bearer_token(None), Err(AuthError::MissingToken)));
    assert!(matches!(
        bearer_token(Some("Basic abc")),
        Err(AuthError::MissingToken)
    ));
    assert!(matches!(
        bearer_token(Some("Bearer ")),
        Err(AuthError::MissingToken)
    ));
}

#[test]
fn malformed_pem_is_a_config_error() {
    assert!(matches!(
        TokenVerifier::rsa_pem(b"not a pem", ISSUER, None),
        Err(AuthError::Config(_))
    ));
}
