mod common;

use anyhow::Result;
use serde_json::json;

use common::{serve, test_app, MockWetro, VALID_KEY};
use wetro_playground::playground::{ChatSaga, PlaygroundClient, PlaygroundError};
use wetro_playground::upstream::ResourceType;

async fn logged_in_client(upstream: std::sync::Arc<MockWetro>) -> Result<PlaygroundClient> {
    let base_url = serve(test_app(upstream)).await?;
    let mut client = PlaygroundClient::new(&base_url)?;
    client.set_api_key(VALID_KEY).await?;
    Ok(client)
}

#[tokio::test]
async fn login_flips_check_auth() -> Result<()> {
    let base_url = serve(test_app(MockWetro::new())).await?;
    let mut client = PlaygroundClient::new(&base_url)?;

    assert!(!client.check_auth().await?);
    client.set_api_key(VALID_KEY).await?;
    assert!(client.check_auth().await?);
    Ok(())
}

#[tokio::test]
async fn calls_without_a_key_need_authentication() -> Result<()> {
    let base_url = serve(test_app(MockWetro::new())).await?;
    let client = PlaygroundClient::new(&base_url)?;

    let err = client.generate_markdown("https://example.com").await.unwrap_err();
    assert!(matches!(err, PlaygroundError::AuthenticationRequired));
    Ok(())
}

#[tokio::test]
async fn markdown_and_transcript_unwrap_their_payloads() -> Result<()> {
    let upstream = MockWetro::new();
    upstream.respond(
        "markdown_converter",
        Ok(json!({ "success": true, "tokens": 12, "response": "# Example" })),
    );
    upstream.respond(
        "transcript",
        Ok(json!({ "response": { "data": [{ "text": "hello" }] } })),
    );
    let client = logged_in_client(upstream).await?;

    assert_eq!(client.generate_markdown("https://example.com").await?, "# Example");
    assert_eq!(
        client.fetch_youtube_transcript("https://youtu.be/dQw4w9WgXcQ").await?,
        r#"[{"text":"hello"}]"#
    );
    Ok(())
}

#[tokio::test]
async fn server_errors_reach_the_caller() -> Result<()> {
    let upstream = MockWetro::new();
    upstream.respond("extract", Ok(json!({ "data": {} })));
    let client = logged_in_client(upstream).await?;

    let err = client
        .extract_structured_data("https://example.com", &json!({ "title": "string" }))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No \"json\" field found in extraction response");
    Ok(())
}

#[tokio::test]
async fn chat_saga_keeps_the_collection_on_success() -> Result<()> {
    let upstream = MockWetro::new();
    upstream.respond("query_collection", Ok(json!({ "response": "A demo page.", "tokens": 7 })));
    let client = logged_in_client(upstream.clone()).await?;
    let saga = ChatSaga::new(&client);

    let session = saga
        .start("https://example.com", ResourceType::Web, "What is this?")
        .await?;
    assert_eq!(session.collection_id.len(), 60);
    assert_eq!(session.answer.response, "A demo page.");
    assert_eq!(session.answer.metadata, json!({ "tokens": 7 }));

    let follow_up = saga.ask(&session, "Anything else?").await?;
    assert_eq!(follow_up.collection_id, session.collection_id);

    assert_eq!(
        upstream.operations(),
        vec!["create_collection", "insert_resource", "query_collection", "query_collection"]
    );
    assert!(upstream.calls().iter().all(|c| c.args[0] == session.collection_id));
    Ok(())
}

#[tokio::test]
async fn chat_saga_deletes_the_collection_when_insert_fails() -> Result<()> {
    let upstream = MockWetro::new();
    upstream.fail("insert_resource", 422, "Could not fetch the page");
    let client = logged_in_client(upstream.clone()).await?;

    let err = ChatSaga::new(&client)
        .start("https://example.com", ResourceType::Web, "What is this?")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Could not fetch the page");

    let calls = upstream.calls();
    assert_eq!(
        upstream.operations(),
        vec!["create_collection", "insert_resource", "delete_collection"]
    );
    assert_eq!(calls[2].args[0], calls[0].args[0]);
    Ok(())
}

#[tokio::test]
async fn chat_saga_deletes_the_collection_when_query_fails() -> Result<()> {
    let upstream = MockWetro::new();
    upstream.fail("query_collection", 500, "Model overloaded");
    let client = logged_in_client(upstream.clone()).await?;

    let err = ChatSaga::new(&client)
        .start("https://youtu.be/dQw4w9WgXcQ", ResourceType::Youtube, "Summarise")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Model overloaded");
    assert_eq!(
        upstream.operations(),
        vec!["create_collection", "insert_resource", "query_collection", "delete_collection"]
    );
    Ok(())
}

#[tokio::test]
async fn chat_saga_has_nothing_to_undo_when_create_fails() -> Result<()> {
    let upstream = MockWetro::new();
    upstream.fail("create_collection", 500, "boom");
    let client = logged_in_client(upstream.clone()).await?;

    let err = ChatSaga::new(&client)
        .start("https://example.com", ResourceType::Web, "What is this?")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to create collection");
    assert_eq!(upstream.operations(), vec!["create_collection"]);
    Ok(())
}

#[tokio::test]
async fn chat_saga_validates_before_creating_anything() -> Result<()> {
    let upstream = MockWetro::new();
    let client = logged_in_client(upstream.clone()).await?;

    let err = ChatSaga::new(&client)
        .start("https://example.com/watch", ResourceType::Youtube, "Summarise")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid YouTube URL");
    assert_eq!(upstream.call_count(), 0);
    Ok(())
}
