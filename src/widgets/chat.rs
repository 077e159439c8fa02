//! Chat widget state and history trimming.
//!
//! The gateway sends whatever history it is given; this widget is the
//! caller that enforces the history limit.

use std::sync::Arc;

use crate::assistant::{AssistantGateway, ChatTurn};
use crate::config::DEFAULT_CHAT_HISTORY_LIMIT;
use crate::locale::Locale;

use super::Attachment;

const DEFAULT_DOCUMENT_PROMPT: &str = "Please summarize this document.";

/// The most recent `limit` turns of `history`.
pub fn recent_history(history: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    &history[history.len().saturating_sub(limit)..]
}

pub struct ChatSession {
    gateway: Arc<AssistantGateway>,
    history_limit: usize,
    messages: Vec<ChatTurn>,
    attachment: Option<Attachment>,
}

impl ChatSession {
    pub fn new(gateway: Arc<AssistantGateway>) -> Self {
        Self {
            gateway,
            history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
            messages: Vec::new(),
            attachment: None,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Seed the transcript, e.g. when restoring a session.
    pub fn with_messages(mut self, messages: Vec<ChatTurn>) -> Self {
        self.messages = messages;
        self
    }

    pub fn messages(&self) -> &[ChatTurn] {
        &self.messages
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Send `input` and append the reply to the transcript.
    ///
    /// With an attachment the document is summarized instead of chatting.
    /// Failures become an assistant turn carrying the error message; there
    /// is no retry. Returns the appended assistant turn, or `None` when
    /// there was nothing to send.
    pub async fn send(&mut self, input: &str, locale: &Locale) -> Option<&ChatTurn> {
        let input = input.trim();
        if input.is_empty() && self.attachment.is_none() {
            return None;
        }

        let user_turn = match &self.attachment {
            Some(attachment) => ChatTurn::user(format!(
                "[File: {}] {}",
                attachment.name,
                if input.is_empty() { DEFAULT_DOCUMENT_PROMPT } else { input }
            )),
            None => ChatTurn::user(input),
        };

        // Prior turns only; the new message travels in `message`.
        let history = recent_history(&self.messages, self.history_limit).to_vec();
        self.messages.push(user_turn.clone());

        let result = match &self.attachment {
            Some(attachment) => {
                self.gateway
                    .summarize_document(&attachment.url, &attachment.name, locale)
                    .await
            }
            None => self.gateway.chat(&user_turn.content, locale, &history).await,
        };

        let reply = match result {
            Ok(text) => {
                self.attachment = None;
                ChatTurn::assistant(text)
            }
            Err(e) => {
                log::warn!("[CHAT] Request failed: {}", e);
                ChatTurn::assistant(format!("⚠️ {}", e.user_message()))
            }
        };
        self.messages.push(reply);
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<ChatTurn> {
        (0..n).map(|i| ChatTurn::user(format!("m{}", i))).collect()
    }

    #[test]
    fn recent_history_keeps_the_tail() {
        let history = turns(12);
        let recent = recent_history(&history, 10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].content, "m2");
        assert_eq!(recent[9].content, "m11");
    }

    #[test]
    fn recent_history_with_short_transcript_is_unchanged() {
        let history = turns(3);
        assert_eq!(recent_history(&history, 10), &history[..]);
        assert!(recent_history(&history, 0).is_empty());
    }

    #[tokio::test]
    async fn blank_input_without_attachment_sends_nothing() {
        let gateway = Arc::new(
            AssistantGateway::new("http://127.0.0.1:9", std::time::Duration::from_secs(1))
                .unwrap(),
        );
        let mut chat = ChatSession::new(gateway);
        assert!(chat.send("   ", &Locale::default()).await.is_none());
        assert!(chat.messages().is_empty());
    }
}
