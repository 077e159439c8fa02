//! Editor assistant panel.
//!
//! Title, SEO description, hashtags and summary all come from one
//! generate-blog call per topic; the panel keeps the last response and
//! serves every affordance from it.

use std::sync::Arc;

use crate::assistant::{AssistantGateway, AssistantResult, Comment, GeneratedContent, Tone};
use crate::locale::Locale;

pub struct DraftAssistant {
    gateway: Arc<AssistantGateway>,
    locale: Locale,
    generated: Option<(String, GeneratedContent)>,
}

impl DraftAssistant {
    pub fn new(gateway: Arc<AssistantGateway>, locale: Locale) -> Self {
        Self {
            gateway,
            locale,
            generated: None,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Generate everything for `topic`, reusing the last response when the
    /// topic is unchanged. `None` when the topic is too short.
    pub async fn generate(&mut self, topic: &str) -> AssistantResult<Option<&GeneratedContent>> {
        let topic = topic.trim();
        let cached = matches!(&self.generated, Some((t, _)) if t == topic);
        if !cached {
            match self.gateway.generate_from_topic(topic, &self.locale).await? {
                Some(content) => self.generated = Some((topic.to_string(), content)),
                None => return Ok(None),
            }
        }
        Ok(self.generated.as_ref().map(|(_, content)| content))
    }

    pub async fn title(&mut self, topic: &str) -> AssistantResult<String> {
        Ok(self
            .generate(topic)
            .await?
            .and_then(|g| g.title.clone())
            .unwrap_or_default())
    }

    pub async fn seo_description(&mut self, topic: &str) -> AssistantResult<String> {
        Ok(self
            .generate(topic)
            .await?
            .and_then(|g| g.description.clone())
            .unwrap_or_default())
    }

    /// Hashtags joined with single spaces.
    pub async fn hashtags(&mut self, topic: &str) -> AssistantResult<String> {
        Ok(self
            .generate(topic)
            .await?
            .and_then(|g| g.hashtags.as_ref().map(|tags| tags.join(" ")))
            .unwrap_or_default())
    }

    pub async fn summary(&mut self, topic: &str) -> AssistantResult<String> {
        Ok(self
            .generate(topic)
            .await?
            .and_then(|g| g.summary.clone())
            .unwrap_or_default())
    }

    pub async fn improve_writing(&self, content: &str) -> AssistantResult<String> {
        self.gateway.improve_writing(content, &self.locale).await
    }

    pub async fn switch_tone(&self, content: &str, tone: Tone) -> AssistantResult<String> {
        self.gateway.switch_tone(content, tone, &self.locale).await
    }

    pub async fn summarize_comments(&self, comments: &[Comment]) -> AssistantResult<String> {
        self.gateway.summarize_comments(comments, &self.locale).await
    }
}
