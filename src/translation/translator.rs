//! The single seam between the orchestrator and the network.

use async_trait::async_trait;

use crate::assistant::{AssistantGateway, AssistantResult};
use crate::locale::Locale;

/// Something that can translate one piece of text.
///
/// `AssistantGateway` is the production implementation; tests substitute
/// stubs with controlled delays and failures.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        content: &str,
        source_lang: &Locale,
        target_lang: &Locale,
    ) -> AssistantResult<String>;
}

#[async_trait]
impl Translator for AssistantGateway {
    async fn translate(
        &self,
        content: &str,
        source_lang: &Locale,
        target_lang: &Locale,
    ) -> AssistantResult<String> {
        AssistantGateway::translate(self, content, source_lang, target_lang).await
    }
}
