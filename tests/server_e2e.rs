use serde_json::{json, Value};
use stagger::{stagger_service, InMemoryModel, SharedModel};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_over_tcp() {
    // 1. Setup server
    let model: SharedModel = Arc::new(
        InMemoryModel::from_data(json!({"repos": {"acme": {"name": "Acme"}}})).unwrap(),
    );
    let app = stagger_service(model);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // 2. Read the seeded repo
    let client = reqwest::Client::new();
    let url = format!("http://{}/api/repos/acme", addr);

    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let etag = response
        .headers()
        .get("etag")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body: Value = serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
    assert_eq!(body["name"], "Acme");

    // 3. Revalidate
    let response = client
        .get(&url)
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 304);

    // 4. Update and revalidate again
    let response = client
        .put(&url)
        .body(r#"{"name": "Acme Corp"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK\n");

    let response = client
        .get(&url)
        .header("If-None-Match", &etag)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_ne!(response.headers()["etag"], etag.as_str());
}
