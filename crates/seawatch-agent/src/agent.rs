//! Chat message handler: session check, classify, fetch, format, reply.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use seawatch_chat::{format_response, help_message, ChatPolicy, ClassifyError, Intent};
use seawatch_chat::{IntentPolicy, SessionStore};
use seawatch_market::MarketClient;

use crate::envelope::ChatMessage;

/// Generic error reply; upstream details are logged, never sent to the user.
const ERROR_REPLY: &str = "Sorry, an error occurred while processing your request. Please try again.";

/// Test query classified on startup to verify the pipeline wiring.
const SELF_TEST_QUERY: &str = "What's the floor price of Bored Ape Yacht Club?";

/// The conversational agent behind the chat transport.
///
/// One instance serves all sessions; the session store handles expiry and
/// the marketplace client is shared.
pub struct ChatAgent {
    client: Arc<MarketClient>,
    policy: ChatPolicy,
    sessions: SessionStore,
    agent_id: String,
}

impl ChatAgent {
    pub fn new(client: MarketClient, sessions: SessionStore, agent_id: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            policy: ChatPolicy,
            sessions,
            agent_id: agent_id.into(),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one inbound chat message and produce the reply envelope.
    ///
    /// Every outcome is a reply: a missing parameter becomes its prompting
    /// message, an unknown query becomes the help text, and a marketplace
    /// failure becomes a generic apology.
    pub async fn handle_message(&self, msg: &ChatMessage) -> ChatMessage {
        let user_text = msg.extract_text();
        info!(msg_id = %msg.msg_id, text = %user_text, "Received chat message");

        let session_id = msg
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if self.sessions.get_or_create(&session_id) {
            info!(session_id = %session_id, "New chat session");
        }

        let reply_text = self.answer(&user_text).await;
        ChatMessage::reply(reply_text, Some(session_id))
    }

    /// Run one query through classify → fetch → format.
    async fn answer(&self, text: &str) -> String {
        let intent = match self.policy.classify(text) {
            Ok(intent) => intent,
            Err(ClassifyError::MissingParameter { prompt }) => return prompt,
        };

        if intent == Intent::Unknown {
            return help_message().to_string();
        }

        match self.client.fetch(&intent).await {
            Ok(data) => format_response(&intent, &data),
            Err(e) => {
                error!(error = %e, "Marketplace request failed");
                ERROR_REPLY.to_string()
            }
        }
    }

    /// Startup self-test: classify the canonical floor-price query and log
    /// the outcome. Never touches the network and never fails startup.
    pub fn self_test(&self) {
        match self.policy.classify(SELF_TEST_QUERY) {
            Ok(intent) => info!(?intent, query = SELF_TEST_QUERY, "Startup self-test passed"),
            Err(e) => error!(error = %e, query = SELF_TEST_QUERY, "Startup self-test failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use seawatch_market::MarketProfile;

    fn agent() -> ChatAgent {
        // Reserved TLD; tests exercise only paths that never hit the network.
        let profile = MarketProfile::mcp("http://mcp.invalid/{token}", "test-token");
        let client = MarketClient::new(profile, 1).unwrap();
        ChatAgent::new(client, SessionStore::new(1800), "agent-test")
    }

    fn inbound(text: &str, session_id: Option<&str>) -> ChatMessage {
        ChatMessage {
            msg_id: Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            session_id: session_id.map(String::from),
            content: json!([{"type": "text", "text": text}]),
        }
    }

    #[tokio::test]
    async fn test_unknown_query_replies_with_help() {
        let agent = agent();
        let reply = agent.handle_message(&inbound("hello there", None)).await;
        assert!(reply.extract_text().contains("NFT marketplace queries"));
    }

    #[tokio::test]
    async fn test_missing_parameter_replies_with_prompt() {
        let agent = agent();
        let reply = agent
            .handle_message(&inbound("analyze my wallet", None))
            .await;
        assert!(reply.extract_text().contains("wallet address"));
    }

    #[tokio::test]
    async fn test_market_failure_replies_with_generic_apology() {
        let agent = agent();
        let reply = agent
            .handle_message(&inbound("show me trending", None))
            .await;
        assert_eq!(reply.extract_text(), ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_reply_keeps_the_session_id() {
        let agent = agent();
        let reply = agent
            .handle_message(&inbound("hello", Some("s-42")))
            .await;
        assert_eq!(reply.session_id.as_deref(), Some("s-42"));
        assert!(agent.sessions().is_valid("s-42"));
    }

    #[tokio::test]
    async fn test_message_without_session_id_gets_a_fresh_one() {
        let agent = agent();
        let reply = agent.handle_message(&inbound("hello", None)).await;
        let id = reply.session_id.expect("reply carries a session id");
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_eq!(agent.sessions().len(), 1);
    }

    #[test]
    fn test_self_test_classifies_bayc() {
        // The canonical query must resolve through the slug table.
        let agent = agent();
        agent.self_test();
        assert_eq!(
            ChatPolicy.classify(SELF_TEST_QUERY),
            Ok(Intent::CollectionInfo {
                slug: "boredapeyachtclub".to_string()
            })
        );
    }
}
