//! Tests for the command dispatcher with recording transports.

use async_trait::async_trait;
use bangbot_interface::{ContentService, InMemoryContentService};
use bangbot_social::{
    CommandDispatcher, DiscordError, DiscordErrorKind, DiscordResult, EventAuthor,
    IncomingInteraction, IncomingMessage, InteractionResponder, MessageReply, MessageSink,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const CHANNEL: u64 = 42;

/// Records every message; optionally fails the first `failures` sends.
#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(u64, String)>>,
    attempts: AtomicUsize,
    failures: usize,
}

impl RecordingSink {
    fn failing(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<(u64, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_message(&self, channel_id: u64, content: &str) -> DiscordResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(DiscordError::new(DiscordErrorKind::MessageSendFailed(
                "rate limited".to_string(),
            )));
        }
        self.sent.lock().push((channel_id, content.to_string()));
        Ok(())
    }
}

/// Records interaction responses; optionally fails every one.
#[derive(Default)]
struct RecordingResponder {
    responses: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn respond(&self, content: &str) -> DiscordResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DiscordError::new(DiscordErrorKind::InteractionFailed(
                "unknown interaction".to_string(),
            )));
        }
        self.responses.lock().push(content.to_string());
        Ok(())
    }
}

fn dispatcher_with(service: InMemoryContentService) -> CommandDispatcher {
    CommandDispatcher::new(Arc::new(service))
}

fn cats_and_dogs() -> CommandDispatcher {
    dispatcher_with(
        InMemoryContentService::new()
            .with_category("cats", ["meow", "purr"])
            .with_category("dogs", ["woof"]),
    )
}

fn user_message(content: &str) -> IncomingMessage {
    IncomingMessage::new(CHANNEL, EventAuthor::user(7, "alice"), content)
}

fn slash(category: Option<&str>) -> IncomingInteraction {
    IncomingInteraction {
        command_name: "command".to_string(),
        category: category.map(str::to_string),
        user: Some(EventAuthor::user(7, "alice")),
        channel_id: CHANNEL,
        guild_id: Some(1),
    }
}

/// Content provider whose categories exist but always resolve empty.
struct HollowService;

#[async_trait]
impl ContentService for HollowService {
    async fn random_content(&self, _category: &str) -> String {
        String::new()
    }

    async fn content_count(&self, _category: &str) -> usize {
        1
    }

    async fn available_categories(&self) -> Vec<String> {
        vec!["ghosts".to_string()]
    }
}

// ============================================================================
// Free-text path
// ============================================================================

#[tokio::test]
async fn test_bang_command_replies_with_stored_entry() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("  !cats  ")).await;

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, CHANNEL);
    assert!(["meow", "purr"].contains(&sent[0].1.as_str()));
}

#[tokio::test]
async fn test_unknown_bang_command_sends_nothing() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("!unknown")).await;

    assert!(sink.sent().is_empty());
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_plain_message_is_ignored() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("cats are great")).await;

    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn test_categories_are_case_sensitive() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("!CATS")).await;

    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn test_help_lists_categories_with_counts() {
    let dispatcher = dispatcher_with(
        InMemoryContentService::new()
            .with_category("dogs", ["woof"])
            .with_category("cats", ["a", "b"]),
    );
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("!help")).await;
    dispatcher.handle_message(&sink, &user_message("!list")).await;

    let expected = "Available commands:\n• `!cats` (2 entries)\n• `!dogs` (1 entries)\n";
    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].1, expected);
    assert_eq!(sent[1].1, expected);
}

#[tokio::test]
async fn test_help_with_no_categories() {
    let dispatcher = dispatcher_with(InMemoryContentService::new());
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("!help")).await;

    assert_eq!(sink.sent(), vec![(CHANNEL, "no commands available".to_string())]);
}

#[tokio::test]
async fn test_stored_help_category_wins_over_listing() {
    let dispatcher = dispatcher_with(InMemoryContentService::new().with_category("help", ["ask a human"]));
    let sink = RecordingSink::default();

    dispatcher.handle_message(&sink, &user_message("!help")).await;

    assert_eq!(sink.sent(), vec![(CHANNEL, "ask a human".to_string())]);
}

#[tokio::test]
async fn test_empty_resolution_sends_notice() {
    let dispatcher = CommandDispatcher::new(Arc::new(HollowService));

    let reply = dispatcher.resolve_message(&user_message("!ghosts")).await;
    assert_eq!(
        reply,
        Some(MessageReply::NoContent {
            category: "ghosts".to_string()
        })
    );

    let sink = RecordingSink::default();
    dispatcher.handle_message(&sink, &user_message("!ghosts")).await;
    assert_eq!(
        sink.sent(),
        vec![(CHANNEL, "no content available for `!ghosts`".to_string())]
    );
}

#[tokio::test]
async fn test_bot_and_anonymous_authors_are_ignored() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::default();

    let from_bot = IncomingMessage::new(CHANNEL, EventAuthor::bot(99, "bangbot"), "!cats");
    let anonymous = IncomingMessage {
        author: None,
        ..user_message("!cats")
    };

    dispatcher.handle_message(&sink, &from_bot).await;
    dispatcher.handle_message(&sink, &anonymous).await;

    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn test_failed_send_attempts_follow_up() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::failing(1);

    dispatcher.handle_message(&sink, &user_message("!dogs")).await;

    assert_eq!(sink.attempts.load(Ordering::SeqCst), 2);
    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.starts_with("failed to send content for `!dogs`:"));
}

#[tokio::test]
async fn test_failed_follow_up_is_swallowed() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::failing(usize::MAX);

    dispatcher.handle_message(&sink, &user_message("!dogs")).await;

    assert_eq!(sink.attempts.load(Ordering::SeqCst), 2);
    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn test_failed_listing_follow_up_names_typed_word() {
    let dispatcher = cats_and_dogs();
    let sink = RecordingSink::failing(1);

    dispatcher.handle_message(&sink, &user_message("!list")).await;

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert!(
        sent[0].1.starts_with("failed to send content for `!list`:"),
        "got {:?}",
        sent[0].1
    );
}

#[tokio::test]
async fn test_listing_reply_remembers_reserved_word() {
    let dispatcher = cats_and_dogs();

    for word in ["help", "list"] {
        let reply = dispatcher
            .resolve_message(&user_message(&format!("!{word}")))
            .await
            .expect("listing reply");
        assert!(matches!(reply, MessageReply::Listing { .. }));
        assert_eq!(reply.command(), word);
    }
}

// ============================================================================
// Structured path
// ============================================================================

#[tokio::test]
async fn test_slash_known_category_replies_once_with_entry() {
    let dispatcher = cats_and_dogs();
    let responder = RecordingResponder::default();

    dispatcher.handle_interaction(&responder, &slash(Some("cats"))).await;

    let responses = responder.responses.lock().clone();
    assert_eq!(responses.len(), 1);
    assert!(["meow", "purr"].contains(&responses[0].as_str()));
}

#[tokio::test]
async fn test_slash_unknown_category_lists_available() {
    let dispatcher = dispatcher_with(InMemoryContentService::new().with_category("cats", ["meow"]));
    let responder = RecordingResponder::default();

    dispatcher.handle_interaction(&responder, &slash(Some("dogs"))).await;

    let responses = responder.responses.lock().clone();
    assert_eq!(
        responses,
        vec!["Category 'dogs' not found. Available categories: cats".to_string()]
    );
}

#[tokio::test]
async fn test_slash_missing_option_is_treated_as_unknown() {
    let dispatcher = cats_and_dogs();
    let responder = RecordingResponder::default();

    dispatcher.handle_interaction(&responder, &slash(None)).await;

    let responses = responder.responses.lock().clone();
    assert_eq!(responses.len(), 1);
    assert!(responses[0].contains("Available categories: cats, dogs"));
}

#[tokio::test]
async fn test_slash_empty_resolution_sends_notice() {
    let dispatcher = CommandDispatcher::new(Arc::new(HollowService));
    let responder = RecordingResponder::default();

    dispatcher.handle_interaction(&responder, &slash(Some("ghosts"))).await;

    assert_eq!(
        responder.responses.lock().clone(),
        vec!["No content available for `ghosts`".to_string()]
    );
}

#[tokio::test]
async fn test_slash_failure_is_not_retried() {
    let dispatcher = cats_and_dogs();
    let responder = RecordingResponder {
        fail: true,
        ..RecordingResponder::default()
    };

    dispatcher.handle_interaction(&responder, &slash(Some("cats"))).await;

    assert_eq!(responder.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_slash_ignores_other_commands_and_bots() {
    let dispatcher = cats_and_dogs();
    let responder = RecordingResponder::default();

    let other = IncomingInteraction {
        command_name: "ping".to_string(),
        ..slash(Some("cats"))
    };
    let from_bot = IncomingInteraction {
        user: Some(EventAuthor::bot(99, "bangbot")),
        ..slash(Some("cats"))
    };
    let anonymous = IncomingInteraction {
        user: None,
        ..slash(Some("cats"))
    };

    for interaction in [other, from_bot, anonymous] {
        dispatcher.handle_interaction(&responder, &interaction).await;
    }

    assert_eq!(responder.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dispatcher_handles_concurrent_events() {
    let dispatcher = cats_and_dogs();
    let sink = Arc::new(RecordingSink::default());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            let sink = Arc::clone(&sink);
            tokio::spawn(async move {
                let body = if i % 2 == 0 { "!cats" } else { "!dogs" };
                dispatcher.handle_message(sink.as_ref(), &user_message(body)).await;
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task panicked");
    }

    assert_eq!(sink.sent().len(), 16);
}
