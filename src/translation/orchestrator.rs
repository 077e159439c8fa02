//! Fail-open batch translation.
//!
//! Contract:
//! - output has one result per input item, in input order
//! - items already in the target locale issue no request
//! - every selected field is translated concurrently with every other
//! - any field failure keeps that field's original text and is only logged
//! - inputs are never mutated

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde_json::Value;

use super::content::{ContentItem, DisplayField, FieldSelector, TranslationResult};
use super::memo::{MemoKey, TranslationMemo};
use super::translator::Translator;
use crate::assistant::{AssistantError, AssistantResult};
use crate::config::Settings;
use crate::locale::Locale;

pub struct TranslationOrchestrator {
    translator: Arc<dyn Translator>,
    memo: Option<Arc<TranslationMemo>>,
    field_timeout: Duration,
}

impl TranslationOrchestrator {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            memo: None,
            field_timeout: Duration::from_secs(crate::config::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Timeout and memo capacity from settings.
    pub fn from_settings(translator: Arc<dyn Translator>, settings: &Settings) -> Self {
        let mut orchestrator =
            Self::new(translator).with_field_timeout(settings.request_timeout());
        if let Some(memo) = TranslationMemo::with_capacity(settings.translation_memo_capacity) {
            orchestrator = orchestrator.with_memo(Arc::new(memo));
        }
        orchestrator
    }

    pub fn with_memo(mut self, memo: Arc<TranslationMemo>) -> Self {
        self.memo = Some(memo);
        self
    }

    pub fn with_field_timeout(mut self, timeout: Duration) -> Self {
        self.field_timeout = timeout;
        self
    }

    /// Translate `items` into `target`. Never fails; see module docs.
    pub async fn translate_batch(
        &self,
        items: &[ContentItem],
        selector: &FieldSelector,
        target: &Locale,
    ) -> Vec<TranslationResult> {
        if items.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let results = join_all(
            items
                .iter()
                .map(|item| self.translate_item(item, selector, target)),
        )
        .await;

        let fallbacks: usize = results.iter().map(|r| r.fallbacks.len()).sum();
        log::info!(
            "[TRANSLATE] Batch of {} → {} in {}ms ({} field fallbacks)",
            items.len(),
            target,
            start.elapsed().as_millis(),
            fallbacks
        );
        results
    }

    /// One item; identical to a one-element `translate_batch`.
    pub async fn translate_single(
        &self,
        item: &ContentItem,
        selector: &FieldSelector,
        target: &Locale,
    ) -> TranslationResult {
        self.translate_batch(std::slice::from_ref(item), selector, target)
            .await
            .pop()
            .unwrap_or_else(|| TranslationResult::identity(item.clone(), target.clone()))
    }

    /// Translate raw data-store records, returning copies with translated
    /// text written back. Records without an id are keyed by position;
    /// non-object records pass through as-is.
    pub async fn translate_records(
        &self,
        records: &[Value],
        selector: &FieldSelector,
        target: &Locale,
    ) -> Vec<Value> {
        let mapped: Vec<Option<ContentItem>> = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                match ContentItem::from_record_at(record, selector, position) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        log::warn!("[TRANSLATE] Skipping record: {}", e);
                        None
                    }
                }
            })
            .collect();

        let items: Vec<ContentItem> = mapped.iter().flatten().cloned().collect();
        let mut results = self
            .translate_batch(&items, selector, target)
            .await
            .into_iter();

        records
            .iter()
            .zip(mapped)
            .map(|(record, item)| {
                let mut out = record.clone();
                if item.is_some() {
                    if let (Some(result), Some(obj)) = (results.next(), out.as_object_mut()) {
                        for field in result.item.fields() {
                            obj.insert(field.name.clone(), Value::String(field.text.clone()));
                        }
                    }
                }
                out
            })
            .collect()
    }

    async fn translate_item(
        &self,
        item: &ContentItem,
        selector: &FieldSelector,
        target: &Locale,
    ) -> TranslationResult {
        if item.source_language() == target {
            return TranslationResult::identity(item.clone(), target.clone());
        }

        let outcomes = join_all(item.fields().iter().map(|field| async move {
            if !selector.selects(&field.name) || field.text.trim().is_empty() {
                return (field.text.clone(), false);
            }
            match self.translate_field(item, field, target).await {
                Ok(text) => (text, false),
                Err(e) => {
                    log::warn!(
                        "[TRANSLATE] {}.{} {}→{} failed, keeping original: {}",
                        item.id(),
                        field.name,
                        item.source_language(),
                        target,
                        e
                    );
                    (field.text.clone(), true)
                }
            }
        }))
        .await;

        let mut fallbacks = Vec::new();
        let fields: Vec<DisplayField> = item
            .fields()
            .iter()
            .zip(outcomes)
            .map(|(field, (text, fell_back))| {
                if fell_back {
                    fallbacks.push(field.name.clone());
                }
                DisplayField {
                    name: field.name.clone(),
                    text,
                }
            })
            .collect();

        TranslationResult {
            item: item.with_fields(fields),
            target_locale: target.clone(),
            fallbacks,
        }
    }

    async fn translate_field(
        &self,
        item: &ContentItem,
        field: &DisplayField,
        target: &Locale,
    ) -> AssistantResult<String> {
        let source = item.source_language();
        let key = self
            .memo
            .as_ref()
            .map(|_| MemoKey::new(item.id(), &field.name, &field.text, source, target));

        if let (Some(memo), Some(key)) = (&self.memo, &key) {
            if let Some(hit) = memo.get(key) {
                log::debug!("[TRANSLATE] Memo hit for {}.{}", item.id(), field.name);
                return Ok(hit);
            }
        }

        let translated = tokio::time::timeout(
            self.field_timeout,
            self.translator.translate(&field.text, source, target),
        )
        .await
        .map_err(|_| {
            AssistantError::Network(format!(
                "translation timed out after {}ms",
                self.field_timeout.as_millis()
            ))
        })??;

        if let (Some(memo), Some(key)) = (&self.memo, key) {
            memo.insert(key, translated.clone());
        }
        Ok(translated)
    }
}
