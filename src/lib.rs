//! Blogy — client core for a multilingual blog.
//!
//! Two cooperating domains:
//!   - translation/ — fail-open, order-preserving translation of posts and
//!                    comments into the reader's locale
//!   - assistant/   — typed gateway to the backend AI operations
//!
//! Supporting modules:
//!   - widgets/  — chat, selection toolbar, editor panel, document reader
//!   - config.rs — Settings (defaults → settings.json → BLOGY_* env)
//!   - locale.rs — Locale codes and the supported UI languages

pub mod assistant;
pub mod config;
pub mod locale;
pub mod translation;
pub mod widgets;

use std::sync::Arc;

use assistant::{AssistantGateway, AssistantResult};
use config::Settings;
use locale::Locale;
use translation::{TranslationOrchestrator, TranslationView};
use widgets::{ChatSession, DocumentReader, DraftAssistant, SelectionToolbar};

/// Load `.env.local` (or `.env`) from the working directory and install the
/// logger. Call once at process start.
pub fn bootstrap() {
    'env_load: for env_file in [".env.local", ".env"] {
        let path = std::path::Path::new(env_file);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break 'env_load;
        }
    }

    // Tests and embedding hosts may have installed a logger already.
    let _ = env_logger::try_init();
}

/// Gateway, orchestrator and view wired from one `Settings`.
pub struct Client {
    pub settings: Settings,
    pub gateway: Arc<AssistantGateway>,
    pub orchestrator: Arc<TranslationOrchestrator>,
}

impl Client {
    pub fn new(settings: Settings) -> AssistantResult<Self> {
        let gateway = Arc::new(AssistantGateway::from_settings(&settings)?);
        let orchestrator = Arc::new(TranslationOrchestrator::from_settings(
            gateway.clone(),
            &settings,
        ));
        log::info!(
            "[STARTUP] Backend {} (timeout {}s, memo {})",
            gateway.base_url(),
            settings.request_timeout_secs,
            settings.translation_memo_capacity
        );
        Ok(Self {
            settings,
            gateway,
            orchestrator,
        })
    }

    /// A fresh display cache for one page.
    pub fn view(&self) -> TranslationView {
        TranslationView::new(self.orchestrator.clone())
    }

    /// The configured default locale if the UI has a dictionary for it,
    /// otherwise English.
    pub fn ui_locale(&self) -> Locale {
        self.settings.default_locale.ui_or_default()
    }

    /// Chat widget sending `chat_history_limit` prior turns.
    pub fn chat_session(&self) -> ChatSession {
        ChatSession::new(self.gateway.clone()).with_history_limit(self.settings.chat_history_limit)
    }

    pub fn selection_toolbar(&self) -> SelectionToolbar {
        SelectionToolbar::new(self.gateway.clone(), self.ui_locale())
    }

    pub fn draft_assistant(&self) -> DraftAssistant {
        DraftAssistant::new(self.gateway.clone(), self.ui_locale())
    }

    pub fn document_reader(&self) -> DocumentReader {
        DocumentReader::new(self.gateway.clone())
    }
}
