//! Config file and environment flowing into a working client and session

use std::fs;

use playground_config::{API_KEY_ENV, BASE_URL_ENV, PlaygroundConfig};
use playground_core::{CatalogCache, SessionState};
use playground_providers::{ApiConfig, Client};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn config_file_and_env_key_drive_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer gsk_from_env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "mixtral-8x7b-32768"}, {"id": "gemma2-9b-it"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[app]
model = "Mixtral 8x7B"

[api]
base_url = "{}"
key = "gsk_from_file"

[session]
temperature = 1.24
max_tokens = 700

[catalog]
ttl_secs = 60
"#,
            server.uri()
        ),
    )
    .unwrap();

    let config = PlaygroundConfig::load_from(&config_path).unwrap();
    let settings = config.resolve_with(|name| {
        (name == API_KEY_ENV).then(|| "gsk_from_env".to_string())
    });
    assert_eq!(settings.base_url.as_deref(), Some(server.uri().as_str()));
    assert_eq!(settings.catalog_ttl.as_secs(), 60);

    let api_key = settings.api_key.clone().unwrap();
    let mut api = ApiConfig::new(api_key).with_timeout(settings.timeout);
    if let Some(base_url) = &settings.base_url {
        api = api.with_base_url(base_url.as_str());
    }
    let client = Client::new(api).unwrap();

    let mut cache = CatalogCache::new(settings.catalog_ttl);
    let catalog = cache.get(&client).await;
    assert_eq!(catalog.len(), 7);
    assert!(catalog.contains("Gemma2 9B It"));

    let session = SessionState::from_settings(&catalog, &settings);
    assert_eq!(session.selected_model(), Some("Mixtral 8x7B"));
    assert!((session.temperature() - 1.2).abs() < f64::EPSILON);
    assert_eq!(session.max_tokens(), 768);
}

#[test]
fn missing_file_and_blank_env_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlaygroundConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    let settings = config.resolve_with(|name| {
        (name == API_KEY_ENV || name == BASE_URL_ENV).then(|| "   ".to_string())
    });

    assert!(settings.api_key.is_none());
    assert!(settings.base_url.is_none());
    assert!(settings.model.is_none());
    assert_eq!(settings.max_tokens, playground_config::DEFAULT_MAX_TOKENS);

    let catalog = playground_types::Catalog::static_defaults();
    let session = SessionState::from_settings(&catalog, &settings);
    assert_eq!(session.selected_model(), Some("Llama 3.3 70B"));
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[session\ntemperature = ").unwrap();

    let err = PlaygroundConfig::load_from(&config_path).unwrap_err();
    assert_eq!(err.path(), config_path.as_path());
}
