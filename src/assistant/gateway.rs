//! AssistantGateway — one typed method per backend AI operation.
//!
//! Every call is a single JSON POST with a per-request timeout and no
//! automatic retry. Input minimums come from the policy table in
//! `policy.rs`; nothing here reads an ambient locale.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{AssistantError, AssistantResult};
use super::policy::{Operation, ShortInput};
use super::types::*;
use crate::config::Settings;
use crate::locale::Locale;

/// Typed client for the assistant backend.
#[derive(Debug, Clone)]
pub struct AssistantGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

/// Outcome of checking input against an operation's rule.
enum Precheck {
    Proceed,
    Short(ShortInput),
}

impl AssistantGateway {
    pub fn new(base_url: &str, timeout: Duration) -> AssistantResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AssistantError::Validation(
                "Backend URL must not be empty".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("blogy/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> AssistantResult<Self> {
        Self::new(&settings.backend_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ── Operations ─────────────────────────────────────────────────

    /// Translate `content` between two languages.
    pub async fn translate(
        &self,
        content: &str,
        source_lang: &Locale,
        target_lang: &Locale,
    ) -> AssistantResult<String> {
        self.require(Operation::Translate, content)?;
        let resp: TranslateResponse = self
            .post(
                Operation::Translate,
                &TranslateRequest {
                    content: content.to_string(),
                    source_lang: source_lang.clone(),
                    target_lang: target_lang.clone(),
                },
            )
            .await?;
        Ok(resp.translated_content)
    }

    /// Translate a text selection; the backend detects the source language.
    pub async fn translate_selection(
        &self,
        content: &str,
        target_lang: &Locale,
    ) -> AssistantResult<String> {
        self.require(Operation::SelectionTranslate, content)?;
        let resp: SelectionTranslateResponse = self
            .post(
                Operation::SelectionTranslate,
                &SelectionTranslateRequest {
                    content: content.to_string(),
                    target_lang: target_lang.clone(),
                },
            )
            .await?;
        Ok(resp.translated_text)
    }

    pub async fn refine(&self, content: &str, tone: Tone, locale: &Locale) -> AssistantResult<String> {
        self.require(Operation::Refine, content)?;
        let resp: RefineResponse = self
            .post(
                Operation::Refine,
                &RefineRequest {
                    content: content.to_string(),
                    tone,
                    locale: locale.clone(),
                },
            )
            .await?;
        Ok(resp.refined_text)
    }

    pub async fn explain(&self, content: &str, locale: &Locale) -> AssistantResult<String> {
        self.require(Operation::Explain, content)?;
        let resp: ExplainResponse = self
            .post(
                Operation::Explain,
                &ContentRequest {
                    content: content.to_string(),
                    locale: locale.clone(),
                },
            )
            .await?;
        Ok(resp.explanation)
    }

    /// Send a chat message with prior turns.
    ///
    /// `history` is sent as given. Callers trim it to their history limit
    /// (see `widgets::chat::recent_history`).
    pub async fn chat(
        &self,
        message: &str,
        locale: &Locale,
        history: &[ChatTurn],
    ) -> AssistantResult<String> {
        self.require(Operation::Chat, message)?;
        let resp: ChatResponse = self
            .post(
                Operation::Chat,
                &ChatRequest {
                    message: message.to_string(),
                    locale: locale.clone(),
                    history: history.to_vec(),
                },
            )
            .await?;
        Ok(resp.response)
    }

    pub async fn summarize_document(
        &self,
        file_url: &str,
        file_name: &str,
        locale: &Locale,
    ) -> AssistantResult<String> {
        self.require(Operation::SummarizeDocument, file_url)?;
        let resp: DocumentSummaryResponse = self
            .post(
                Operation::SummarizeDocument,
                &DocumentRequest {
                    file_url: file_url.to_string(),
                    file_name: file_name.to_string(),
                    locale: Some(locale.clone()),
                },
            )
            .await?;
        resp.into_text().ok_or_else(|| {
            AssistantError::MalformedResponse(format!(
                "{}: neither response nor summary present",
                Operation::SummarizeDocument.endpoint()
            ))
        })
    }

    /// Plain text of an uploaded document. May be empty.
    pub async fn extract_text(&self, file_url: &str, file_name: &str) -> AssistantResult<String> {
        self.require(Operation::ExtractText, file_url)?;
        let resp: ExtractTextResponse = self
            .post(
                Operation::ExtractText,
                &DocumentRequest {
                    file_url: file_url.to_string(),
                    file_name: file_name.to_string(),
                    locale: None,
                },
            )
            .await?;
        Ok(resp.content)
    }

    /// IPA transcription of `content`.
    pub async fn phonetic(&self, content: &str) -> AssistantResult<String> {
        self.require(Operation::Phonetic, content)?;
        let resp: PhoneticResponse = self
            .post(
                Operation::Phonetic,
                &PhoneticRequest {
                    content: content.to_string(),
                },
            )
            .await?;
        Ok(resp.ipa)
    }

    /// Title, SEO description, hashtags and summary for a topic.
    ///
    /// Topics shorter than the minimum produce `Ok(None)` without a request.
    pub async fn generate_from_topic(
        &self,
        topic: &str,
        locale: &Locale,
    ) -> AssistantResult<Option<GeneratedContent>> {
        if let Precheck::Short(_) = self.precheck(Operation::GenerateContent, topic)? {
            return Ok(None);
        }
        let generated: GeneratedContent = self
            .post(
                Operation::GenerateContent,
                &GenerateRequest {
                    topic: topic.to_string(),
                    locale: locale.clone(),
                },
            )
            .await?;
        Ok(Some(generated))
    }

    /// Polish a draft. Drafts shorter than the minimum come back unchanged
    /// without a request.
    pub async fn improve_writing(&self, content: &str, locale: &Locale) -> AssistantResult<String> {
        if let Precheck::Short(_) = self.precheck(Operation::ImproveWriting, content)? {
            return Ok(content.to_string());
        }
        self.improve(content.to_string(), locale).await
    }

    /// Rewrite a draft in another tone via the improve-writing endpoint.
    pub async fn switch_tone(
        &self,
        content: &str,
        tone: Tone,
        locale: &Locale,
    ) -> AssistantResult<String> {
        if let Precheck::Short(_) = self.precheck(Operation::SwitchTone, content)? {
            return Ok(content.to_string());
        }
        self.improve(tone_prompt(content, tone, locale), locale).await
    }

    pub async fn summarize_comments(
        &self,
        comments: &[Comment],
        locale: &Locale,
    ) -> AssistantResult<String> {
        if comments.is_empty() {
            return Err(AssistantError::Validation(
                "No comments to summarize.".to_string(),
            ));
        }
        let resp: CommentSummaryResponse = self
            .post(
                Operation::SummarizeComments,
                &SummarizeCommentsRequest {
                    comments: comments.to_vec(),
                    locale: locale.clone(),
                },
            )
            .await?;
        Ok(resp.summary)
    }

    /// Run any operation from its tagged request.
    pub async fn dispatch(&self, request: AssistantRequest) -> AssistantResult<AssistantResponse> {
        Ok(match request {
            AssistantRequest::Chat(r) => {
                AssistantResponse::Chat(self.chat(&r.message, &r.locale, &r.history).await?)
            }
            AssistantRequest::Translate(r) => AssistantResponse::Translate(
                self.translate(&r.content, &r.source_lang, &r.target_lang).await?,
            ),
            AssistantRequest::SelectionTranslate(r) => AssistantResponse::SelectionTranslate(
                self.translate_selection(&r.content, &r.target_lang).await?,
            ),
            AssistantRequest::Refine(r) => {
                AssistantResponse::Refine(self.refine(&r.content, r.tone, &r.locale).await?)
            }
            AssistantRequest::Explain(r) => {
                AssistantResponse::Explain(self.explain(&r.content, &r.locale).await?)
            }
            AssistantRequest::Phonetic(r) => {
                AssistantResponse::Phonetic(self.phonetic(&r.content).await?)
            }
            AssistantRequest::SummarizeDocument(r) => {
                let locale = r.locale.unwrap_or_default();
                AssistantResponse::SummarizeDocument(
                    self.summarize_document(&r.file_url, &r.file_name, &locale).await?,
                )
            }
            AssistantRequest::ExtractText(r) => {
                AssistantResponse::ExtractText(self.extract_text(&r.file_url, &r.file_name).await?)
            }
            AssistantRequest::SummarizeComments(r) => AssistantResponse::SummarizeComments(
                self.summarize_comments(&r.comments, &r.locale).await?,
            ),
            AssistantRequest::GenerateContent(r) => AssistantResponse::GenerateContent(
                self.generate_from_topic(&r.topic, &r.locale).await?,
            ),
            AssistantRequest::ImproveWriting(r) => AssistantResponse::ImproveWriting(
                self.improve_writing(&r.content, &r.locale).await?,
            ),
        })
    }

    // ── Internal ───────────────────────────────────────────────────

    async fn improve(&self, content: String, locale: &Locale) -> AssistantResult<String> {
        let resp: ImproveWritingResponse = self
            .post(
                Operation::ImproveWriting,
                &ContentRequest {
                    content,
                    locale: locale.clone(),
                },
            )
            .await?;
        Ok(resp.improved_content)
    }

    fn precheck(&self, op: Operation, input: &str) -> AssistantResult<Precheck> {
        let rule = op.input_rule();
        if rule.accepts(input) {
            return Ok(Precheck::Proceed);
        }
        log::debug!(
            "[ASSISTANT] {:?} input below {} chars ({:?})",
            op,
            rule.min_chars,
            rule.when_short
        );
        match rule.when_short {
            ShortInput::Reject => Err(AssistantError::Validation(format!(
                "Input too short. Please provide at least {} character{}.",
                rule.min_chars,
                if rule.min_chars == 1 { "" } else { "s" }
            ))),
            other => Ok(Precheck::Short(other)),
        }
    }

    /// Validation for operations whose short-input rule is always `Reject`.
    fn require(&self, op: Operation, input: &str) -> AssistantResult<()> {
        match self.precheck(op, input)? {
            Precheck::Proceed => Ok(()),
            Precheck::Short(_) => Err(AssistantError::Validation(format!(
                "Input too short for {:?}",
                op
            ))),
        }
    }

    async fn post<Req, Resp>(&self, op: Operation, body: &Req) -> AssistantResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, op.endpoint());
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("[ASSISTANT] {} request failed: {}", op.endpoint(), e);
                e
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            log::error!("[ASSISTANT] {} body read failed: {}", op.endpoint(), e);
            e
        })?;

        if !status.is_success() {
            log::error!(
                "[ASSISTANT] {} returned {}: {}",
                op.endpoint(),
                status,
                text.chars().take(200).collect::<String>()
            );
            return Err(AssistantError::from_status(status.as_u16(), &text));
        }

        log::info!(
            "[ASSISTANT] {} {} in {}ms",
            op.endpoint(),
            status.as_u16(),
            start.elapsed().as_millis()
        );

        let parsed = serde_json::from_str::<Resp>(&text).map_err(|e| {
            log::warn!("[ASSISTANT] {} unparsable payload: {}", op.endpoint(), e);
            e
        })?;
        Ok(parsed)
    }
}

/// Rewrite instruction sent through improve-writing for a tone switch.
fn tone_prompt(content: &str, tone: Tone, locale: &Locale) -> String {
    format!(
        "Rewrite the following text in a {} tone. Keep it in {}:\n\n{}",
        tone.as_str().to_lowercase(),
        locale,
        content
    )
}
