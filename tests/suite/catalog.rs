//! Catalog reconciliation against a mock provider

use std::time::Duration;

use playground_core::CatalogCache;
use playground_types::{Catalog, STATIC_MODELS};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TEST_KEY, client_for, mount_models, mount_models_failure};

const HOUR: Duration = Duration::from_secs(3600);

#[tokio::test]
async fn failed_listing_yields_exact_static_defaults() {
    let server = MockServer::start().await;
    mount_models_failure(&server, 500).await;

    let mut cache = CatalogCache::new(HOUR);
    let catalog = cache.get(&client_for(&server)).await;

    assert_eq!(*catalog, Catalog::static_defaults());
    let pairs: Vec<(&str, &str)> = catalog
        .iter()
        .map(|entry| (entry.display_name(), entry.model_id()))
        .collect();
    assert_eq!(pairs, STATIC_MODELS);
}

#[tokio::test]
async fn unreachable_provider_yields_static_defaults() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let mut cache = CatalogCache::new(HOUR);
    let catalog = cache.get(&client).await;
    assert_eq!(catalog.len(), 6);
}

#[tokio::test]
async fn live_id_overrides_static_entry() {
    let server = MockServer::start().await;
    mount_models(&server, &["llama-3.3-70b-versatile"]).await;

    let mut cache = CatalogCache::new(HOUR);
    let catalog = cache.get(&client_for(&server)).await;

    assert_eq!(catalog.len(), 6);
    let entry = catalog.get("Llama 3.3 70B").unwrap();
    assert_eq!(entry.model_id(), "llama-3.3-70b-versatile");
    assert_eq!(catalog.first().unwrap().display_name(), "Llama 3.3 70B");
}

#[tokio::test]
async fn live_listing_is_filtered_named_and_appended() {
    let server = MockServer::start().await;
    mount_models(
        &server,
        &[
            "whisper-large-v3",
            "playai-tts",
            "meta-llama/llama-guard-4-12b",
            "openai/gpt-oss-safeguard-20b",
            "meta-llama/llama-4-scout-17b-16e-instruct",
            "llama-3.1-8b-instant",
            "moonshotai/kimi-k2-instruct",
            "deepseek-r1-distill-llama-70b",
        ],
    )
    .await;

    let mut cache = CatalogCache::new(HOUR);
    let catalog = cache.get(&client_for(&server)).await;

    for excluded in [
        "whisper-large-v3",
        "playai-tts",
        "meta-llama/llama-guard-4-12b",
        "openai/gpt-oss-safeguard-20b",
    ] {
        assert!(catalog.by_model_id(excluded).is_none(), "{excluded}");
    }

    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(
        &names[6..],
        ["Llama 4 Scout 17B", "Kimi K2", "Deepseek R1 Distill Llama 70B"]
    );
    assert_eq!(names[2], "Llama 3.1 8B");
    assert!(catalog.get("Llama 4 Scout 17B").unwrap().icon().starts_with("🦙"));
}

#[tokio::test]
async fn listing_sends_bearer_key_once_per_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "qwen/qwen3-32b"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut cache = CatalogCache::new(HOUR);
    let first = cache.get(&client).await;
    let second = cache.get(&client).await;
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    cache.invalidate();
    let third = cache.get(&client).await;
    assert!(third.contains("Qwen 3 32B"));
}
