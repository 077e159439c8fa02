//! Operation catalogue and the minimum-input policy table.
//!
//! Each assistant operation has one endpoint and one input rule. The rules
//! live in a single table so the thresholds are visible and testable in
//! one place instead of being scattered across call sites.

use serde::Serialize;

/// Every request/response operation the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Chat,
    Translate,
    SelectionTranslate,
    Refine,
    Explain,
    Phonetic,
    SummarizeDocument,
    ExtractText,
    SummarizeComments,
    GenerateContent,
    ImproveWriting,
    SwitchTone,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::Chat,
        Operation::Translate,
        Operation::SelectionTranslate,
        Operation::Refine,
        Operation::Explain,
        Operation::Phonetic,
        Operation::SummarizeDocument,
        Operation::ExtractText,
        Operation::SummarizeComments,
        Operation::GenerateContent,
        Operation::ImproveWriting,
        Operation::SwitchTone,
    ];

    /// Path relative to the backend base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Operation::Chat => "/api/chat",
            Operation::Translate => "/api/translate",
            Operation::SelectionTranslate => "/api/grammy/translate",
            Operation::Refine => "/api/grammy/refine",
            Operation::Explain => "/api/grammy/explain",
            Operation::Phonetic => "/api/grammy/phonetic",
            Operation::SummarizeDocument => "/api/summarize-document",
            Operation::ExtractText => "/api/extract-text",
            Operation::SummarizeComments => "/api/summarize-comments",
            Operation::GenerateContent => "/api/generate-blog",
            // Tone switching is a rewrite prompt sent through improve-writing.
            Operation::ImproveWriting | Operation::SwitchTone => "/api/improve-writing",
        }
    }

    pub fn input_rule(self) -> InputRule {
        match self {
            Operation::GenerateContent => InputRule {
                min_chars: 5,
                when_short: ShortInput::NoResult,
            },
            Operation::ImproveWriting | Operation::SwitchTone => InputRule {
                min_chars: 10,
                when_short: ShortInput::ReturnInput,
            },
            _ => InputRule {
                min_chars: 1,
                when_short: ShortInput::Reject,
            },
        }
    }
}

/// What an operation does with input below its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortInput {
    /// Fail with `AssistantError::Validation`.
    Reject,
    /// Hand the caller's input back unchanged.
    ReturnInput,
    /// Produce an empty result (`None`).
    NoResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRule {
    /// Minimum length in characters, measured after trimming.
    pub min_chars: usize,
    pub when_short: ShortInput,
}

impl InputRule {
    pub fn accepts(&self, input: &str) -> bool {
        input.trim().chars().count() >= self.min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_the_editor_affordances() {
        assert_eq!(Operation::GenerateContent.input_rule().min_chars, 5);
        assert_eq!(
            Operation::GenerateContent.input_rule().when_short,
            ShortInput::NoResult
        );
        assert_eq!(Operation::ImproveWriting.input_rule().min_chars, 10);
        assert_eq!(
            Operation::ImproveWriting.input_rule().when_short,
            ShortInput::ReturnInput
        );
        assert_eq!(Operation::Chat.input_rule().when_short, ShortInput::Reject);
    }

    #[test]
    fn length_is_counted_in_trimmed_characters() {
        let rule = Operation::GenerateContent.input_rule();
        assert!(!rule.accepts("   abcd   "));
        assert!(rule.accepts("abcde"));
        // Five multi-byte characters still count as five.
        assert!(rule.accepts("日本語です"));
        assert!(!Operation::Translate.input_rule().accepts("  \n "));
    }

    #[test]
    fn every_operation_has_an_api_endpoint() {
        for op in Operation::ALL {
            assert!(op.endpoint().starts_with("/api/"), "{:?}", op);
        }
        assert_eq!(Operation::SwitchTone.endpoint(), Operation::ImproveWriting.endpoint());
    }
}
