use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{spawn_app, spawn_app_with_origins};

const FRONTEND: &str = "http://localhost:5173";

async fn preflight(url: &str, origin: &str) -> reqwest::Response {
    reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, url)
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("failed to execute request.")
}

#[tokio::test]
async fn preflight_from_an_allowed_origin_is_accepted() {
    let app = spawn_app_with_origins(vec![FRONTEND.into()]).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let resp = preflight(&app.send_email_url(), FRONTEND).await;

    assert!(resp.status().is_success(), "status {}", resp.status());
    assert_eq!(
        resp.headers().get("Access-Control-Allow-Origin").unwrap(),
        FRONTEND
    );
    let methods = resp
        .headers()
        .get("Access-Control-Allow-Methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn preflight_from_another_origin_gets_no_allow_header() {
    let app = spawn_app_with_origins(vec![FRONTEND.into()]).await;

    let resp = preflight(&app.send_email_url(), "http://evil.example").await;

    assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
}

#[tokio::test]
async fn without_allowed_origins_a_preflight_is_a_405() {
    let app = spawn_app().await;

    let resp = preflight(&app.send_email_url(), FRONTEND).await;

    assert_eq!(405, resp.status().as_u16());
    assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
}

#[tokio::test]
async fn a_cross_origin_post_carries_the_allow_header() {
    let app = spawn_app_with_origins(vec![FRONTEND.into()]).await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "1" })),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let resp = app
        .api_client
        .post(&app.send_email_url())
        .header("Origin", FRONTEND)
        .json(&serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hi",
            "message": "Hello",
        }))
        .send()
        .await
        .expect("failed to execute request.");

    assert_eq!(200, resp.status().as_u16());
    assert_eq!(
        resp.headers().get("Access-Control-Allow-Origin").unwrap(),
        FRONTEND
    );
}
