//! Wire types for the assistant backend.
//!
//! Request bodies serialize to the JSON the backend expects (camelCase keys).
//! Each response type has exactly one canonical field; alternative backend
//! spellings are mapped with `serde(alias)` so no caller ever probes several
//! keys.

use serde::{Deserialize, Serialize};

use super::policy::Operation;
use crate::locale::Locale;

// ── Shared ─────────────────────────────────────────────────────────

/// Rewrite tone offered by the selection toolbar and the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Creative,
    Concise,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Creative => "Creative",
            Tone::Concise => "Concise",
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "creative" => Ok(Tone::Creative),
            "concise" => Ok(Tone::Concise),
            other => Err(format!("Unknown tone: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of a chat transcript, as sent in `history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A reader comment as stored by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

// ── Requests ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub content: String,
    pub source_lang: Locale,
    pub target_lang: Locale,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTranslateRequest {
    pub content: String,
    pub target_lang: Locale,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub locale: Locale,
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefineRequest {
    pub content: String,
    pub tone: Tone,
    pub locale: Locale,
}

/// Body shared by explain and improve-writing.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRequest {
    pub content: String,
    pub locale: Locale,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhoneticRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub file_url: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeCommentsRequest {
    pub comments: Vec<Comment>,
    pub locale: Locale,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub locale: Locale,
}

// ── Responses ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub refined_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticResponse {
    pub ipa: String,
}

/// The document endpoint answers with `response`, `summary` or both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentSummaryResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl DocumentSummaryResponse {
    /// A non-empty `response` wins over `summary`. `None` when neither key
    /// was sent.
    pub fn into_text(self) -> Option<String> {
        match (self.response, self.summary) {
            (Some(response), _) if !response.trim().is_empty() => Some(response),
            (response, Some(summary)) if response.is_none() || !summary.trim().is_empty() => {
                Some(summary)
            }
            (response, _) => response,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractTextResponse {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveWritingResponse {
    pub improved_content: String,
}

/// Everything generate-blog can produce from a topic. Each editor
/// affordance reads one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
}

// ── Tagged request/response pairs ──────────────────────────────────

/// One variant per operation; used by [`super::AssistantGateway::dispatch`].
#[derive(Debug, Clone)]
pub enum AssistantRequest {
    Chat(ChatRequest),
    Translate(TranslateRequest),
    SelectionTranslate(SelectionTranslateRequest),
    Refine(RefineRequest),
    Explain(ContentRequest),
    Phonetic(PhoneticRequest),
    SummarizeDocument(DocumentRequest),
    ExtractText(DocumentRequest),
    SummarizeComments(SummarizeCommentsRequest),
    GenerateContent(GenerateRequest),
    ImproveWriting(ContentRequest),
}

impl AssistantRequest {
    pub fn operation(&self) -> Operation {
        match self {
            AssistantRequest::Chat(_) => Operation::Chat,
            AssistantRequest::Translate(_) => Operation::Translate,
            AssistantRequest::SelectionTranslate(_) => Operation::SelectionTranslate,
            AssistantRequest::Refine(_) => Operation::Refine,
            AssistantRequest::Explain(_) => Operation::Explain,
            AssistantRequest::Phonetic(_) => Operation::Phonetic,
            AssistantRequest::SummarizeDocument(_) => Operation::SummarizeDocument,
            AssistantRequest::ExtractText(_) => Operation::ExtractText,
            AssistantRequest::SummarizeComments(_) => Operation::SummarizeComments,
            AssistantRequest::GenerateContent(_) => Operation::GenerateContent,
            AssistantRequest::ImproveWriting(_) => Operation::ImproveWriting,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantResponse {
    Chat(String),
    Translate(String),
    SelectionTranslate(String),
    Refine(String),
    Explain(String),
    Phonetic(String),
    SummarizeDocument(String),
    ExtractText(String),
    SummarizeComments(String),
    /// `None` when the topic was below the minimum length.
    GenerateContent(Option<GeneratedContent>),
    ImproveWriting(String),
}

impl AssistantResponse {
    /// The single text payload, for every variant that has one.
    pub fn text(&self) -> Option<&str> {
        match self {
            AssistantResponse::Chat(s)
            | AssistantResponse::Translate(s)
            | AssistantResponse::SelectionTranslate(s)
            | AssistantResponse::Refine(s)
            | AssistantResponse::Explain(s)
            | AssistantResponse::Phonetic(s)
            | AssistantResponse::SummarizeDocument(s)
            | AssistantResponse::ExtractText(s)
            | AssistantResponse::SummarizeComments(s)
            | AssistantResponse::ImproveWriting(s) => Some(s),
            AssistantResponse::GenerateContent(_) => None,
        }
    }
}
