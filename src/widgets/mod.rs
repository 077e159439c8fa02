//! UI-facing callers of the assistant gateway.
//!
//! Unlike the translation orchestrator, these never swallow failures: each
//! either returns the `AssistantError` or renders `user_message()` inline.
//!
//!   - chat.rs      — ChatSession (chat widget)
//!   - selection.rs — SelectionToolbar (floating selection toolbar)
//!   - draft.rs     — DraftAssistant (editor panel)
//!   - documents.rs — DocumentReader (attachment reader / summarizer)

pub mod chat;
pub mod documents;
pub mod draft;
pub mod selection;

pub use chat::{recent_history, ChatSession};
pub use documents::DocumentReader;
pub use draft::DraftAssistant;
pub use selection::{SelectionToolbar, ToolbarResult};

use serde::{Deserialize, Serialize};

/// An uploaded file in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
