mod common;

use std::time::Duration;

use serde_json::json;
use web_agent_interface::error::AppError;
use web_agent_interface::services::conversation::submit;
use web_agent_interface::services::session_manager::{
    ConversationStage, MessageRole, SessionManager,
};
use web_agent_interface::services::webhook::{NO_CONTENT, WebhookClient};

fn manager() -> SessionManager {
    SessionManager::new(Duration::from_secs(60), "default_user")
}

#[tokio::test]
async fn first_submission_is_treated_as_url() {
    let fake = common::spawn_webhook(json!([{"output": "Resumo"}])).await;
    let webhook = WebhookClient::new(&fake.url, "");
    let sessions = manager();
    let sid = sessions.create_session().await;

    let exchange = submit(&sessions, &webhook, &sid, "  https://example.com  ").await.unwrap();

    assert_eq!(exchange.reply, "Resumo");
    assert_eq!(exchange.stage, ConversationStage::AwaitingFollowup);
    assert_eq!(exchange.messages[0].role, MessageRole::User);
    assert_eq!(exchange.messages[0].content, "🔗 https://example.com");
    assert_eq!(exchange.messages[1].role, MessageRole::Assistant);
    assert_eq!(fake.requests()[0].1["query"], "https://example.com");
}

#[tokio::test]
async fn followups_keep_the_stage() {
    let fake = common::spawn_webhook(json!([])).await;
    let webhook = WebhookClient::new(&fake.url, "");
    let sessions = manager();
    let sid = sessions.create_session().await;

    submit(&sessions, &webhook, &sid, "https://example.com").await.unwrap();
    let second = submit(&sessions, &webhook, &sid, "Who wrote it?").await.unwrap();
    let third = submit(&sessions, &webhook, &sid, "When?").await.unwrap();

    assert_eq!(second.reply, NO_CONTENT);
    assert_eq!(third.stage, ConversationStage::AwaitingFollowup);
    let contents: Vec<&str> = third.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(
        contents,
        [
            "🔗 https://example.com",
            NO_CONTENT,
            "❓ Who wrote it?",
            NO_CONTENT,
            "❓ When?",
            NO_CONTENT,
        ]
    );
}

#[tokio::test]
async fn blank_input_changes_nothing() {
    let webhook = WebhookClient::new(common::closed_url().await, "");
    let sessions = manager();
    let sid = sessions.create_session().await;

    let err = submit(&sessions, &webhook, &sid, " \n ").await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let session = sessions.snapshot(&sid).await.unwrap();
    assert!(session.messages.is_empty());
    assert_eq!(session.stage, ConversationStage::AwaitingUrl);
}

#[tokio::test]
async fn unknown_session_is_an_error() {
    let webhook = WebhookClient::new(common::closed_url().await, "");
    let sessions = manager();

    let err = submit(&sessions, &webhook, "nope", "hi").await.unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound(id) if id == "nope"));
    assert_eq!(sessions.len().await, 0);
}

#[tokio::test]
async fn session_closed_during_call_stays_closed() {
    let fake =
        common::spawn_slow_webhook(json!([{"output": "late reply"}]), Duration::from_millis(200))
            .await;
    let webhook = WebhookClient::new(&fake.url, "");
    let sessions = manager();
    let sid = sessions.create_session().await;

    let closer = {
        let sessions = sessions.clone();
        let sid = sid.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            sessions.remove_session(&sid).await
        })
    };

    let result = submit(&sessions, &webhook, &sid, "https://example.com").await;

    assert!(closer.await.unwrap(), "session should be removed mid-call");
    assert!(matches!(result, Err(AppError::SessionNotFound(_))));
    assert!(sessions.snapshot(&sid).await.is_none());
    assert_eq!(sessions.len().await, 0);
}

#[tokio::test]
async fn second_submission_waits_for_the_first() {
    let fake =
        common::spawn_slow_webhook(json!([{"output": "done"}]), Duration::from_millis(200)).await;
    let webhook = WebhookClient::new(&fake.url, "");
    let sessions = manager();
    let sid = sessions.create_session().await;

    let (first, second) = tokio::join!(
        submit(&sessions, &webhook, &sid, "https://example.com"),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            submit(&sessions, &webhook, &sid, "https://example.com").await
        }
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Busy(_))));
    assert_eq!(fake.requests().len(), 1);

    let session = sessions.snapshot(&sid).await.unwrap();
    let roles: Vec<MessageRole> = session.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, [MessageRole::User, MessageRole::Assistant]);
    assert!(!session.awaiting_reply);

    // The session accepts the next question once the reply is in.
    let next = submit(&sessions, &webhook, &sid, "What's new?").await.unwrap();
    assert_eq!(next.messages[2].content, "❓ What's new?");
}
