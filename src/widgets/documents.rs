//! Attachment reader and summarizer.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::assistant::{AssistantError, AssistantGateway, AssistantResult};
use crate::locale::Locale;

use super::Attachment;

pub const EMPTY_DOCUMENT_MESSAGE: &str = "No readable content found in this document.";

pub struct DocumentReader {
    gateway: Arc<AssistantGateway>,
    /// URLs with a summary request in flight.
    summarizing: Mutex<HashSet<String>>,
}

impl DocumentReader {
    pub fn new(gateway: Arc<AssistantGateway>) -> Self {
        Self {
            gateway,
            summarizing: Mutex::new(HashSet::new()),
        }
    }

    /// Extracted text, or a placeholder when the document has none.
    pub async fn read(&self, attachment: &Attachment) -> AssistantResult<String> {
        let content = self
            .gateway
            .extract_text(&attachment.url, &attachment.name)
            .await?;
        if content.trim().is_empty() {
            Ok(EMPTY_DOCUMENT_MESSAGE.to_string())
        } else {
            Ok(content)
        }
    }

    /// Summarize an attachment. A second request for the same URL while
    /// the first is pending is rejected.
    pub async fn summarize(&self, attachment: &Attachment, locale: &Locale) -> AssistantResult<String> {
        let _claim = self.claim(&attachment.url).ok_or_else(|| {
            AssistantError::Validation(format!("Already summarizing {}", attachment.name))
        })?;
        self.gateway
            .summarize_document(&attachment.url, &attachment.name, locale)
            .await
    }

    pub fn is_summarizing(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Mark `url` in flight until the returned claim is dropped, including
    /// when the caller abandons the summarize future.
    fn claim(&self, url: &str) -> Option<SummaryClaim<'_>> {
        if !self.lock().insert(url.to_string()) {
            return None;
        }
        Some(SummaryClaim {
            reader: self,
            url: url.to_string(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.summarizing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct SummaryClaim<'a> {
    reader: &'a DocumentReader,
    url: String,
}

impl Drop for SummaryClaim<'_> {
    fn drop(&mut self) {
        self.reader.lock().remove(&self.url);
    }
}
