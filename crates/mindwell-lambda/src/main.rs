use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let verifier = config.token_verifier()?;
    if verifier.is_none() {
        tracing::warn!("no JWT issuer/key configured, admin routes will refuse all requests");
    }

    let s3 = mindwell_storage::client::build_client().await;

    let state = AppState {
        s3,
        bucket: config.bucket,
        verifier: verifier.map(Arc::new),
        chat: config.chat,
        media_url_ttl: config.media_url_ttl,
    };

    lambda_http::run(app(state)).await.map_err(|e| eyre::eyre!(e))
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Counselor dashboard (admin JWT)
    let admin = Router::new()
        .route("/bookings", get(routes::bookings::list_bookings))
        .route("/analytics", get(routes::analytics::get_analytics))
        .route("/analytics/export", get(routes::analytics::export_analytics))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth, public question data)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        // Student-facing routes (anonymous)
        .route("/assessments", post(routes::assessments::create_assessment))
        .route(
            "/assessments/{id}",
            get(routes::assessments::get_assessment),
        )
        .route("/chat/reply", post(routes::chat::reply))
        .route(
            "/chat/interactions",
            post(routes::chat::record_interaction),
        )
        .route("/resources", get(routes::resources::list_resources))
        .route(
            "/resources/categories",
            get(routes::resources::list_categories),
        )
        .route(
            "/resources/{id}/view",
            post(routes::resources::record_view),
        )
        .route(
            "/resources/{id}/feedback",
            post(routes::resources::submit_feedback),
        )
        .route("/resources/{id}/media", get(routes::resources::media_url))
        .route(
            "/forums/categories",
            get(routes::forums::list_categories),
        )
        .route("/forums/posts", get(routes::forums::list_forum_posts))
        .route("/forums/posts", post(routes::forums::create_post))
        .route(
            "/forums/posts/{id}/upvote",
            post(routes::forums::upvote_post),
        )
        .route("/bookings/slots", get(routes::bookings::list_slots))
        .route("/bookings", post(routes::bookings::create_booking))
        .merge(admin)
        .layer(axum_mw::from_fn(middleware::audit::request_log))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use mindwell_auth::jwt::TokenVerifier;
    use mindwell_chat::session::ChatConfig;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    const SECRET: &[u8] = b"lambda-test-secret";
    const ISSUER: &str = "https://auth.mindwell.test";

    fn offline_s3() -> aws_sdk_s3::Client {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .build();
        aws_sdk_s3::Client::from_conf(conf)
    }

    fn test_app() -> Router {
        app(AppState {
            s3: offline_s3(),
            bucket: "mindwell-test".to_string(),
            verifier: Some(Arc::new(TokenVerifier::shared_secret(SECRET, ISSUER, None))),
            chat: ChatConfig::default(),
            media_url_ttl: Duration::from_secs(60),
        })
    }

    fn token(groups: &[&str]) -> String {
        let now = jiff::Timestamp::now().as_second() as u64;
        let claims = json!({
            "sub": "counselor-7",
            "iss": ISSUER,
            "iat": now,
            "exp": now + 300,
            "cognito:groups": groups,
        });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn instruments_are_listed_and_described() {
        let req = Request::builder().uri("/instruments").body(Body::empty()).unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        let list = json_body(resp).await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let req = Request::builder()
            .uri("/instruments/anxiety")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let detail = json_body(resp).await;
        assert_eq!(detail["id"], "gad7");
        assert_eq!(detail["questions"].as_array().unwrap().len(), 7);
        assert_eq!(detail["max_score"], 21);
        assert_eq!(detail["options"][3]["label"], "Nearly every day");
    }

    #[tokio::test]
    async fn unknown_instrument_is_not_found() {
        let req = Request::builder()
            .uri("/instruments/bdi")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_reply_selects_topic() {
        let req = post_json("/chat/reply", json!({ "message": "I'm anxious about exams" }));
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["topic"], "anxiety");
        assert_eq!(body["reply"]["role"], "assistant");
        assert!(body.get("crisis").is_none());
    }

    #[tokio::test]
    async fn chat_reply_flags_crisis() {
        let req = post_json("/chat/reply", json!({ "message": "I want to end it all" }));
        let resp = test_app().oneshot(req).await.unwrap();
        let body = json_body(resp).await;
        assert_eq!(body["topic"], "general");
        assert_eq!(body["crisis"]["helpline"], "1-800-273-8255");
    }

    #[tokio::test]
    async fn blank_chat_message_is_rejected() {
        let req = post_json("/chat/reply", json!({ "message": "  " }));
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        for uri in ["/analytics", "/analytics/export", "/bookings"] {
            let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let resp = test_app().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn admin_routes_require_admin_group() {
        let req = Request::builder()
            .uri("/analytics?range=7d")
            .header("authorization", format!("Bearer {}", token(&["students"])))
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_routes_refuse_when_unconfigured() {
        let app = app(AppState {
            s3: offline_s3(),
            bucket: "mindwell-test".to_string(),
            verifier: None,
            chat: ChatConfig::default(),
            media_url_ttl: Duration::from_secs(60),
        });
        let req = Request::builder()
            .uri("/bookings")
            .header("authorization", format!("Bearer {}", token(&["admin"])))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
