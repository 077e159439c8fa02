//! Floating toolbar for the reader's highlighted text.
//!
//! Errors are handed back to the caller to render inline; nothing here
//! falls back silently.

use std::sync::Arc;

use crate::assistant::{AssistantGateway, AssistantResult, Tone};
use crate::locale::Locale;

/// What the toolbar's result pane is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarResult {
    Translated { text: String, locale: Locale },
    Refined { text: String, tone: Tone },
    Explanation { text: String },
}

impl ToolbarResult {
    pub fn text(&self) -> &str {
        match self {
            ToolbarResult::Translated { text, .. }
            | ToolbarResult::Refined { text, .. }
            | ToolbarResult::Explanation { text } => text,
        }
    }
}

pub struct SelectionToolbar {
    gateway: Arc<AssistantGateway>,
    selected_text: String,
    target_locale: Locale,
    ipa: Option<String>,
    result: Option<ToolbarResult>,
}

impl SelectionToolbar {
    /// `base_locale` is the language the page is authored in.
    pub fn new(gateway: Arc<AssistantGateway>, base_locale: Locale) -> Self {
        Self {
            gateway,
            selected_text: String::new(),
            target_locale: base_locale,
            ipa: None,
            result: None,
        }
    }

    /// A new selection resets the result pane and the cached IPA.
    pub fn select(&mut self, text: &str) {
        self.selected_text = text.trim().to_string();
        self.ipa = None;
        self.result = None;
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn target_locale(&self) -> &Locale {
        &self.target_locale
    }

    pub fn result(&self) -> Option<&ToolbarResult> {
        self.result.as_ref()
    }

    /// Voice tag for reading the selection aloud in the target locale.
    pub fn speech_voice(&self) -> &str {
        self.target_locale.voice_tag()
    }

    pub async fn translate(&mut self, locale: Locale) -> AssistantResult<&ToolbarResult> {
        self.target_locale = locale;
        let text = self
            .gateway
            .translate_selection(&self.selected_text, &self.target_locale)
            .await?;
        Ok(&*self.result.insert(ToolbarResult::Translated {
            text,
            locale: self.target_locale.clone(),
        }))
    }

    pub async fn refine(&mut self, tone: Tone) -> AssistantResult<&ToolbarResult> {
        let text = self
            .gateway
            .refine(&self.selected_text, tone, &self.target_locale)
            .await?;
        Ok(&*self.result.insert(ToolbarResult::Refined { text, tone }))
    }

    pub async fn explain(&mut self) -> AssistantResult<&ToolbarResult> {
        let text = self
            .gateway
            .explain(&self.selected_text, &self.target_locale)
            .await?;
        Ok(&*self.result.insert(ToolbarResult::Explanation { text }))
    }

    /// IPA for the selection, fetched once per selection.
    pub async fn phonetic(&mut self) -> AssistantResult<&str> {
        if self.ipa.is_none() {
            let ipa = self.gateway.phonetic(&self.selected_text).await?;
            self.ipa = Some(ipa);
        }
        Ok(self.ipa.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn toolbar() -> SelectionToolbar {
        let gateway =
            Arc::new(AssistantGateway::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap());
        SelectionToolbar::new(gateway, Locale::parse("fr").unwrap())
    }

    #[test]
    fn selecting_resets_state() {
        let mut t = toolbar();
        t.select("  serendipity  ");
        assert_eq!(t.selected_text(), "serendipity");
        assert!(t.result().is_none());
        assert_eq!(t.speech_voice(), "fr-FR");
    }

    #[tokio::test]
    async fn empty_selection_surfaces_validation_error() {
        let mut t = toolbar();
        t.select("   ");
        assert!(t.explain().await.unwrap_err().is_validation());
        assert!(t.result().is_none());
    }
}
