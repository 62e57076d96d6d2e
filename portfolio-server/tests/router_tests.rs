use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use portfolio_core::{BlogConfig, CmsConfig, GatewayConfig};
use portfolio_server::{create_router, AppState};
use reqwest::Client;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_for(blog_uri: &str, cms: CmsConfig) -> AppState {
    let config = GatewayConfig {
        blog: BlogConfig {
            api_url: blog_uri.to_owned(),
            ..BlogConfig::default()
        },
        cms,
    };
    AppState::new(Client::new(), &config, None)
}

async fn call(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
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
async fn projects_without_cms_serve_fallback_envelope() {
    let state = state_for("http://127.0.0.1:9", CmsConfig::default());

    let (status, body) = call(state.clone(), get("/api/projects")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 6);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["state"], "unconfigured");
    assert_eq!(body["projects"][0]["slug"], "lms-platform");
    assert_eq!(body["projects"][0]["caseStudy"].as_str().map(|s| !s.is_empty()), Some(true));

    let (_, featured) = call(state, get("/api/projects?featured=true")).await;
    assert_eq!(featured["featured"], true);
    assert_eq!(featured["count"], 3);
}

#[tokio::test]
async fn missing_project_is_404_with_null_project() {
    let state = state_for("http://127.0.0.1:9", CmsConfig::default());
    let (status, body) = call(state, get("/api/projects/lms-platform")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Project not found", "project": null }));
}

#[tokio::test]
async fn posts_failure_returns_empty_list_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = call(state_for(&server.uri(), CmsConfig::default()), get("/api/posts")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["posts"], json!([]));
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn posts_page_passes_query_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "first": 3, "after": "abc" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "publication": { "posts": {
                "edges": [],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(
        state_for(&server.uri(), CmsConfig::default()),
        get("/api/posts?first=3&after=abc"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "posts": [], "hasNextPage": false }));
}

#[tokio::test]
async fn unknown_post_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "publication": { "post": null } } })),
        )
        .mount(&server)
        .await;

    let state = state_for(&server.uri(), CmsConfig::default());
    let (status, body) = call(state.clone(), get("/api/posts/no-such-post")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["post"], Value::Null);

    let (status, body) = call(state, get("/api/posts/4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["source"], "fallback");
}

#[tokio::test]
async fn contact_validates_before_delivery() {
    let state = state_for("http://127.0.0.1:9", CmsConfig::default());

    let (status, body) = call(
        state.clone(),
        post_json("/api/contact", json!({ "name": "Ada", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let (status, body) = call(
        state.clone(),
        post_json(
            "/api/contact",
            json!({ "name": "Ada", "email": "not-an-email", "subject": "Hi", "message": "Hello" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");

    let (status, body) = call(
        state,
        post_json(
            "/api/contact",
            json!({ "name": "Ada", "email": "ada@example.com", "subject": "Hi", "message": "Hello" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn contact_null_field_is_reported_as_missing() {
    let state = state_for("http://127.0.0.1:9", CmsConfig::default());

    let (status, body) = call(
        state,
        post_json(
            "/api/contact",
            json!({ "name": null, "email": "ada@example.com", "subject": "Hi", "message": "Hello" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "All fields are required" }));
}

#[tokio::test]
async fn contact_unparseable_body_keeps_envelope() {
    let state = state_for("http://127.0.0.1:9", CmsConfig::default());

    let (status, body) = call(state.clone(), post_raw("/api/contact", "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));

    let (status, body) = call(state, post_raw("/api/contact", r#"{"name": 42}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn bad_page_size_keeps_posts_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let state = state_for(&server.uri(), CmsConfig::default());

    let (status, body) = call(state, get("/api/posts?first=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["posts"], json!([]));
    assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));
}
