use super::*;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

#[tokio::test]
async fn healthz_answers_ok() {
    let resp = api_routes(None)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_without_backend_is_unavailable() {
    let resp = api_routes(None)
        .oneshot(Request::builder().uri("/api/v1/jobs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], false);
}

#[tokio::test]
async fn api_with_dead_backend_is_bad_gateway() {
    let proxy = Proxy::new("http://127.0.0.1:9", std::time::Duration::from_secs(2)).unwrap();
    let resp = api_routes(Some(proxy))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/sign-in")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"a@b.co","password":"secret"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
