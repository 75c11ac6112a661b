//! Submission flow end to end: session, controller and HTTP client together

use playground_core::{
    FailureKind, Notice, Reselection, SessionContext, SessionState, SubmitOutcome, Submission,
    load_attachment, submit,
};
use playground_providers::Client;
use playground_types::{Catalog, Message, NonEmptyString};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{chat_bodies, client_for, completion, mount_chat_error, mount_chat_reply};

fn prompt(text: &str) -> Submission {
    Submission::text(NonEmptyString::new(text).unwrap())
}

async fn send(
    client: &Client,
    catalog: &Catalog,
    session: &mut SessionState,
    submission: Submission,
) -> SubmitOutcome {
    submit(
        SessionContext {
            backend: client,
            catalog,
            session,
        },
        submission,
    )
    .await
    .expect("a model is selected")
}

#[tokio::test]
async fn decommissioned_model_is_disabled_and_replaced() {
    let server = MockServer::start().await;
    mount_chat_error(
        &server,
        400,
        "model_decommissioned",
        "The model `llama-3.1-8b-instant` has been decommissioned and is no longer supported.",
    )
    .await;

    let catalog = Catalog::static_defaults();
    let mut session = SessionState::new(&catalog, Some("Llama 3.1 8B"));
    let client = client_for(&server);

    let outcome = send(&client, &catalog, &mut session, prompt("hello")).await;

    match outcome {
        SubmitOutcome::ModelDisabled {
            model,
            kind,
            reselection,
            ..
        } => {
            assert_eq!(model, "Llama 3.1 8B");
            assert_eq!(kind, FailureKind::Decommissioned);
            assert_eq!(
                reselection,
                Reselection::Switched {
                    to: "Llama 3.3 70B".into()
                }
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(session.is_disabled("Llama 3.1 8B"));
    assert!(session.transcript().is_empty());
    assert_eq!(session.selected_model(), Some("Llama 3.3 70B"));
    assert!(
        session
            .available_models(&catalog)
            .all(|entry| entry.display_name() != "Llama 3.1 8B")
    );
}

#[tokio::test]
async fn resubmission_goes_to_reselected_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "llama-3.3-70b-versatile"})))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "Rate limit reached for model `llama-3.3-70b-versatile` on tokens per day (TPD)",
                "type": "tokens",
                "code": "rate_limit_exceeded"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "llama-3.1-70b-versatile"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hi there!")))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = Catalog::static_defaults();
    let mut session = SessionState::new(&catalog, None);
    let client = client_for(&server);

    let first = send(&client, &catalog, &mut session, prompt("hello")).await;
    assert!(matches!(
        first,
        SubmitOutcome::ModelDisabled {
            kind: FailureKind::RateLimited,
            ..
        }
    ));

    let second = send(&client, &catalog, &mut session, prompt("hello")).await;
    let SubmitOutcome::Answered { reply, .. } = second else {
        panic!("expected an answer");
    };
    assert_eq!(reply.model_used(), "Llama 3.1 70B");
    assert_eq!(session.transcript().len(), 2);
}

#[tokio::test]
async fn terms_and_chat_unsupported_also_disable() {
    for (code, message, expected) in [
        (
            "model_terms_required",
            "The model `qwen/qwen3-32b` requires terms acceptance.",
            FailureKind::TermsRequired,
        ),
        (
            "model_not_found",
            "The model `playai-tts` does not support chat completions",
            FailureKind::ChatUnsupported,
        ),
    ] {
        let server = MockServer::start().await;
        mount_chat_error(&server, 400, code, message).await;

        let catalog = Catalog::static_defaults();
        let mut session = SessionState::new(&catalog, None);
        let outcome = send(&client_for(&server), &catalog, &mut session, prompt("hi")).await;

        assert!(
            matches!(outcome, SubmitOutcome::ModelDisabled { kind, .. } if kind == expected),
            "{code}"
        );
        assert!(session.is_disabled("Llama 3.3 70B"));
    }
}

#[tokio::test]
async fn unclassified_failure_keeps_model() {
    let server = MockServer::start().await;
    mount_chat_error(&server, 500, "internal_error", "Internal server error").await;

    let catalog = Catalog::static_defaults();
    let mut session = SessionState::new(&catalog, None);
    let outcome = send(&client_for(&server), &catalog, &mut session, prompt("hi")).await;

    match outcome {
        SubmitOutcome::Failed { model, error, .. } => {
            assert_eq!(model, "Llama 3.3 70B");
            assert_eq!(error, "API error 500: Internal server error");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(session.disabled_models().count(), 0);
    assert_eq!(session.selected_model(), Some("Llama 3.3 70B"));
}

#[tokio::test]
async fn han_reply_is_flagged_and_kept_raw() {
    let server = MockServer::start().await;
    mount_chat_reply(&server, "안녕하세요 你好").await;

    let catalog = Catalog::static_defaults();
    let mut session = SessionState::new(&catalog, None);
    let outcome = send(&client_for(&server), &catalog, &mut session, prompt("인사")).await;

    assert_eq!(
        outcome.notices(),
        [Notice::ScriptFlagged {
            offending: vec!['你', '好']
        }]
    );
    match session.transcript().last() {
        Some(Message::Assistant(reply)) => {
            assert!(reply.script_flag());
            assert_eq!(
                playground_types::scan_script(reply.content()).text,
                "안녕하세요 ??"
            );
        }
        other => panic!("unexpected last message: {other:?}"),
    }
}

#[tokio::test]
async fn vision_request_carries_png_data_url() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.jpg");
    image::RgbImage::from_pixel(4, 4, image::Rgb([10, 200, 30]))
        .save_with_format(&image_path, image::ImageFormat::Jpeg)
        .unwrap();
    let attachment = load_attachment(&image_path).unwrap();

    let server = MockServer::start().await;
    mount_chat_reply(&server, "A green square.").await;

    let catalog = Catalog::static_defaults();
    let mut session = SessionState::new(&catalog, Some("Llama 3.2 90B Vision"));
    send(
        &client_for(&server),
        &catalog,
        &mut session,
        prompt("describe").with_image(attachment),
    )
    .await;

    let bodies = chat_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["model"], "llama-3.2-90b-vision-preview");
    assert_eq!(body["messages"][0]["role"], "system");
    let parts = body["messages"][1]["content"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], json!({"type": "text", "text": "describe"}));
    assert_eq!(parts[1]["type"], "image_url");
    assert!(
        parts[1]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
}

#[tokio::test]
async fn text_model_request_never_carries_image_data() {
    let server = MockServer::start().await;
    mount_chat_reply(&server, "ok").await;

    let catalog = Catalog::static_defaults();
    let mut session = SessionState::new(&catalog, Some("Mixtral 8x7B"));
    session.set_temperature(1.0).unwrap();
    session.set_max_tokens(512).unwrap();
    send(&client_for(&server), &catalog, &mut session, prompt("plain")).await;

    let body = &chat_bodies(&server).await[0];
    assert_eq!(body["model"], "mixtral-8x7b-32768");
    assert_eq!(body["messages"][1], json!({"role": "user", "content": "plain"}));
    assert_eq!(body["temperature"], 1.0);
    assert_eq!(body["max_tokens"], 512);
    assert!(!body.to_string().contains("image_url"));
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("You are Mixtral 8x7B model.")
    );
}
