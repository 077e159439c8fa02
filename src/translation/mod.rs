//! Translation domain — fail-open, order-preserving content translation.
//!
//!   - content.rs      — ContentItem, FieldSelector, TranslationResult
//!   - orchestrator.rs — TranslationOrchestrator (batch / single / records)
//!   - view.rs         — TranslationView: latest-batch-wins display cache
//!   - memo.rs         — bounded memo of successful field translations
//!   - translator.rs   — Translator trait (the network seam)

pub mod content;
pub mod memo;
mod orchestrator;
pub mod translator;
mod view;

pub use content::{ContentItem, DisplayField, FieldSelector, TranslationResult};
pub use memo::TranslationMemo;
pub use orchestrator::TranslationOrchestrator;
pub use translator::Translator;
pub use view::{TranslationView, ViewUpdate};
