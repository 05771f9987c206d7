//! Troubleshooter behaviour against mock generators.

use std::sync::Arc;

use assistant_core::{
    ChatSource, DiagnosisSource, FallbackCategory, IssueReport, Role, Troubleshooter,
    TROUBLESHOOT_SYSTEM_PROMPT,
};
use mock_assistant::{CannedGenerator, DelayedGenerator, FailingGenerator};

#[tokio::test]
async fn test_well_formed_completion_is_returned() {
    let generator = Arc::new(CannedGenerator::diagnosis(
        "Swollen battery",
        &["Stop using the device", "Book a battery replacement"],
    ));
    let troubleshooter = Troubleshooter::new(generator.clone());

    let report = IssueReport::new("the case is bulging").device("Phone", "Pixel 6");
    let outcome = troubleshooter.diagnose(&report).await;

    assert_eq!(outcome.source, DiagnosisSource::Model);
    assert_eq!(outcome.diagnosis.diagnosis, "Swollen battery");
    assert_eq!(outcome.diagnosis.steps.len(), 2);

    let requests = generator.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert_eq!(requests[0].messages[0].content, TROUBLESHOOT_SYSTEM_PROMPT);
    assert!(requests[0]
        .last_user_text()
        .unwrap()
        .contains("Device model: Pixel 6"));
}

#[tokio::test]
async fn test_fenced_completion_is_accepted() {
    let fenced = "```json\n{\"diagnosis\": \"Loose ribbon cable\", \"steps\": [\"Reseat it\"]}\n```";
    let troubleshooter = Troubleshooter::new(Arc::new(CannedGenerator::new(fenced)));

    let outcome = troubleshooter.diagnose(&IssueReport::new("screen flickers")).await;
    assert_eq!(outcome.source, DiagnosisSource::Model);
    assert_eq!(outcome.diagnosis.diagnosis, "Loose ribbon cable");
}

#[tokio::test]
async fn test_malformed_completion_uses_keyword_script() {
    let troubleshooter = Troubleshooter::new(Arc::new(CannedGenerator::new(
        "{\"answer\": \"try turning it off and on\"}",
    )));

    let outcome = troubleshooter
        .diagnose(&IssueReport::new("Blue screen every time I open Chrome"))
        .await;
    assert_eq!(
        outcome.source,
        DiagnosisSource::Fallback(Some(FallbackCategory::BlueScreen))
    );
    assert_eq!(outcome.diagnosis, FallbackCategory::BlueScreen.diagnosis());
}

#[tokio::test]
async fn test_network_failure_uses_generic_script() {
    let troubleshooter = Troubleshooter::new(Arc::new(FailingGenerator::network()));

    let outcome = troubleshooter
        .diagnose(&IssueReport::new("it beeps three times").device("Desktop", ""))
        .await;
    assert_eq!(outcome.source, DiagnosisSource::Fallback(None));
    assert!(outcome.diagnosis.diagnosis.contains("Desktop"));
    assert!(!outcome.diagnosis.steps.is_empty());
}

#[tokio::test]
async fn test_api_error_chat_falls_back() {
    let troubleshooter = Troubleshooter::new(Arc::new(FailingGenerator::api(500)));

    let reply = troubleshooter.chat("How much does a screen repair cost?").await;
    assert!(matches!(reply.source, ChatSource::Fallback(Some(_))));
    assert!(!reply.text.is_empty());
}

#[tokio::test]
async fn test_chat_uses_model_text() {
    let generator = DelayedGenerator::with_millis(CannedGenerator::new("  We can help!  "), 10);
    let troubleshooter = Troubleshooter::new(Arc::new(generator));

    let reply = troubleshooter.chat("Can you fix my tablet?").await;
    assert_eq!(reply.source, ChatSource::Model);
    assert_eq!(reply.text, "We can help!");
    assert_eq!(troubleshooter.generator_name(), Some("DelayedGenerator"));
}
