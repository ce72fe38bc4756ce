use milky_core::{AssistantClient, AssistantConfig, OFFLINE_FALLBACK};

#[tokio::test]
async fn unreachable_endpoint_resolves_to_the_offline_line() {
    let client = AssistantClient::new(AssistantConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..AssistantConfig::default()
    });

    let reply = client.ask("hello?", "").await;
    assert_eq!(reply, OFFLINE_FALLBACK);
}

#[tokio::test]
async fn failure_never_panics_with_context_attached() {
    let client = AssistantClient::new(AssistantConfig {
        base_url: "http://127.0.0.1:1/".to_string(),
        model: "anything".to_string(),
    });

    let reply = client
        .ask("Break this down.", "The user is staring at a blank page.")
        .await;
    assert_eq!(reply, OFFLINE_FALLBACK);
}
