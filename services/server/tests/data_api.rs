use roster_server::{api, state::AppState, store::FileStore};
use tokio::net::TcpListener;

const TEST_PIN: &str = "4321";

struct ApiFixture {
    base_url: String,
    _data_dir: tempfile::TempDir,
}

async fn start_api() -> ApiFixture {
    let data_dir = tempfile::tempdir().expect("failed to create temp data dir");
    let store = FileStore::new(data_dir.path(), None).unwrap();
    let state = AppState::new(store, TEST_PIN);
    let app = api::create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiFixture {
        base_url,
        _data_dir: data_dir,
    }
}

fn sample_document() -> serde_json::Value {
    serde_json::json!({
        "comps": {
            "District 1": [
                { "brothers": ["Bob"], "families": ["Smith"] }
            ],
            "District 2": []
        },
        "masterBros": ["Alice", "Bob"],
        "masterFams": ["Jones", "Smith"],
    })
}

#[tokio::test]
async fn missing_or_wrong_pin_is_unauthorized() {
    let fixture = start_api().await;
    let base_url = fixture.base_url;
    let client = reqwest::Client::new();

    for path in ["/api/verify", "/api/data"] {
        let resp = client.get(format!("{base_url}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), 401, "no pin on {path}");

        let resp = client
            .get(format!("{base_url}{path}"))
            .header("X-Pin", "0000")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 401, "wrong pin on {path}");
    }

    let resp = client
        .post(format!("{base_url}/api/data"))
        .json(&sample_document())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401, "no pin on POST /api/data");
}

#[tokio::test]
async fn verify_succeeds_with_the_right_pin() {
    let fixture = start_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/verify", fixture.base_url))
        .header("X-Pin", TEST_PIN)
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn empty_store_returns_empty_structures() {
    let fixture = start_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/data", fixture.base_url))
        .header("X-Pin", TEST_PIN)
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["comps"], serde_json::json!({}));
    assert_eq!(body["masterBros"], serde_json::json!([]));
    assert_eq!(body["masterFams"], serde_json::json!([]));
}

#[tokio::test]
async fn posted_document_comes_back_whole() {
    let fixture = start_api().await;
    let base_url = fixture.base_url;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base_url}/api/data"))
        .header("X-Pin", TEST_PIN)
        .json(&sample_document())
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let resp = client
        .get(format!("{base_url}/api/data"))
        .header("X-Pin", TEST_PIN)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, sample_document());
}

#[tokio::test]
async fn legacy_body_without_wrapper_is_accepted() {
    let fixture = start_api().await;
    let base_url = fixture.base_url;
    let client = reqwest::Client::new();

    let legacy = serde_json::json!({
        "District 1": [{ "brothers": ["Bob"], "families": [] }],
    });

    let resp = client
        .post(format!("{base_url}/api/data"))
        .header("X-Pin", TEST_PIN)
        .json(&legacy)
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let resp = client
        .get(format!("{base_url}/api/data"))
        .header("X-Pin", TEST_PIN)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["comps"], legacy);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let fixture = start_api().await;
    let client = reqwest::Client::new();

    // An array can be neither a wrapped document nor a district map.
    let resp = client
        .post(format!("{}/api/data", fixture.base_url))
        .header("X-Pin", TEST_PIN)
        .json(&serde_json::json!([1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "invalid_document");
}

#[tokio::test]
async fn health_endpoints_need_no_pin() {
    let fixture = start_api().await;
    let client = reqwest::Client::new();

    for path in ["/healthz", "/livez"] {
        let resp = client
            .get(format!("{}{path}", fixture.base_url))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success(), "{path} should be open");
    }
}
