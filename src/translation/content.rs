//! Content items (posts, comments) and their translated views.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locale::Locale;

/// A named text field shown to the reader, e.g. `title` or `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    pub name: String,
    pub text: String,
}

/// A post or comment subject to translation.
///
/// `source_language` is fixed at construction; the orchestrator reads it but
/// never infers or rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    id: String,
    source_language: Locale,
    display_fields: Vec<DisplayField>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, source_language: Locale) -> Self {
        Self {
            id: id.into(),
            source_language,
            display_fields: Vec::new(),
        }
    }

    /// Append a display field. Field order is preserved.
    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.display_fields.push(DisplayField {
            name: name.into(),
            text: text.into(),
        });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_language(&self) -> &Locale {
        &self.source_language
    }

    pub fn fields(&self) -> &[DisplayField] {
        &self.display_fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.display_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.text.as_str())
    }

    /// Same identity and source language, new field texts.
    pub(crate) fn with_fields(&self, display_fields: Vec<DisplayField>) -> Self {
        Self {
            id: self.id.clone(),
            source_language: self.source_language.clone(),
            display_fields,
        }
    }

    /// Build an item from a data-store record.
    ///
    /// The id may be a string or a number. A missing, empty or malformed
    /// language falls back to `selector.fallback_language`. Text fields that
    /// are absent or not strings are skipped.
    pub fn from_record(record: &Value, selector: &FieldSelector) -> Result<Self, String> {
        Self::map_record(record, selector, None)
    }

    /// Like [`ContentItem::from_record`], but a record without a usable id
    /// is identified by its position in the batch (`#<position>`).
    pub fn from_record_at(
        record: &Value,
        selector: &FieldSelector,
        position: usize,
    ) -> Result<Self, String> {
        Self::map_record(record, selector, Some(position))
    }

    fn map_record(
        record: &Value,
        selector: &FieldSelector,
        position: Option<usize>,
    ) -> Result<Self, String> {
        let obj = record
            .as_object()
            .ok_or_else(|| "Record is not a JSON object".to_string())?;

        let id = match (obj.get(&selector.id_field), position) {
            (Some(Value::String(s)), _) if !s.is_empty() => s.clone(),
            (Some(Value::Number(n)), _) => n.to_string(),
            (_, Some(position)) => format!("#{}", position),
            (_, None) => return Err(format!("Record has no usable '{}'", selector.id_field)),
        };

        let source_language = obj
            .get(&selector.language_field)
            .and_then(|v| v.as_str())
            .and_then(|code| Locale::parse(code).ok())
            .unwrap_or_else(|| selector.fallback_language.clone());

        let mut item = ContentItem::new(id, source_language);
        for name in &selector.text_fields {
            if let Some(Value::String(text)) = obj.get(name) {
                item = item.with_field(name.clone(), text.clone());
            }
        }
        Ok(item)
    }
}

/// Which record keys hold the id, the source language and the translatable
/// text, and which display fields a batch translates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub id_field: String,
    pub language_field: String,
    /// Empty selects every display field.
    pub text_fields: Vec<String>,
    pub fallback_language: Locale,
}

impl Default for FieldSelector {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            language_field: "base_lang".to_string(),
            text_fields: vec!["title".to_string(), "content".to_string()],
            fallback_language: Locale::default(),
        }
    }
}

impl FieldSelector {
    /// Translate every display field of already-built items.
    pub fn all_fields() -> Self {
        Self {
            text_fields: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_language_field(mut self, field: impl Into<String>) -> Self {
        self.language_field = field.into();
        self
    }

    pub fn with_text_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn selects(&self, field_name: &str) -> bool {
        self.text_fields.is_empty() || self.text_fields.iter().any(|f| f == field_name)
    }
}

/// A content item rendered into one target locale. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub item: ContentItem,
    pub target_locale: Locale,
    /// Fields whose translation failed and kept their original text.
    pub fallbacks: Vec<String>,
}

impl TranslationResult {
    /// The item shown as-is.
    pub fn identity(item: ContentItem, target_locale: Locale) -> Self {
        Self {
            item,
            target_locale,
            fallbacks: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.item.field(name)
    }

    pub fn fell_back(&self) -> bool {
        !self.fallbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_maps_through_default_selector() {
        let record = json!({
            "id": 42,
            "base_lang": "hi",
            "title": "नमस्ते",
            "content": "पहली पोस्ट",
            "author": "asha"
        });
        let item = ContentItem::from_record(&record, &FieldSelector::default()).unwrap();
        assert_eq!(item.id(), "42");
        assert_eq!(item.source_language().as_str(), "hi");
        assert_eq!(item.fields().len(), 2);
        assert_eq!(item.field("title"), Some("नमस्ते"));
        assert_eq!(item.field("author"), None);
    }

    #[test]
    fn missing_language_uses_fallback() {
        let record = json!({"id": "c1", "comment_text": "Nice post"});
        let selector = FieldSelector::default()
            .with_language_field("lang")
            .with_text_fields(["comment_text"]);
        let item = ContentItem::from_record(&record, &selector).unwrap();
        assert_eq!(item.source_language().as_str(), "en");
        assert_eq!(item.field("comment_text"), Some("Nice post"));
    }

    #[test]
    fn record_without_id_is_rejected() {
        let err = ContentItem::from_record(&json!({"title": "x"}), &FieldSelector::default())
            .unwrap_err();
        assert!(err.contains("'id'"));
        assert!(ContentItem::from_record(&json!([1, 2]), &FieldSelector::default()).is_err());
    }

    #[test]
    fn record_without_id_falls_back_to_position() {
        let record = json!({"title": "Untitled draft", "id": ""});
        let item = ContentItem::from_record_at(&record, &FieldSelector::default(), 3).unwrap();
        assert_eq!(item.id(), "#3");
        assert_eq!(item.field("title"), Some("Untitled draft"));

        let keyed = json!({"id": "p9", "title": "Keyed"});
        let item = ContentItem::from_record_at(&keyed, &FieldSelector::default(), 3).unwrap();
        assert_eq!(item.id(), "p9");
        assert!(ContentItem::from_record_at(&json!("bare"), &FieldSelector::default(), 0).is_err());
    }

    #[test]
    fn empty_text_field_list_selects_everything() {
        assert!(FieldSelector::all_fields().selects("anything"));
        assert!(FieldSelector::default().selects("title"));
        assert!(!FieldSelector::default().selects("slug"));
    }

    #[test]
    fn field_order_is_preserved() {
        let item = ContentItem::new("1", Locale::default())
            .with_field("title", "T")
            .with_field("body", "B")
            .with_field("excerpt", "E");
        let names: Vec<_> = item.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "body", "excerpt"]);
    }
}
