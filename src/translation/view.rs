//! Display cache for translated content owned by one page.
//!
//! Holds the committed locale and results. Each `show` call starts a new
//! generation and cancels the one before it; a batch commits only if its
//! generation is still the latest, so a slow response for an old locale can
//! never overwrite a newer one. Results are replaced wholesale.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use super::content::{ContentItem, FieldSelector, TranslationResult};
use super::orchestrator::TranslationOrchestrator;
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// This batch is now what the view shows.
    Applied(Vec<TranslationResult>),
    /// A newer `show` (or `cancel`) replaced this batch; nothing changed.
    Superseded,
}

#[derive(Debug, Clone)]
struct Committed {
    locale: Locale,
    results: Vec<TranslationResult>,
}

#[derive(Default)]
struct ViewState {
    generation: u64,
    in_flight: Option<CancellationToken>,
    committed: Option<Committed>,
}

pub struct TranslationView {
    orchestrator: Arc<TranslationOrchestrator>,
    state: Mutex<ViewState>,
}

impl TranslationView {
    pub fn new(orchestrator: Arc<TranslationOrchestrator>) -> Self {
        Self {
            orchestrator,
            state: Mutex::new(ViewState::default()),
        }
    }

    /// Translate `items` into `locale` and commit unless superseded.
    pub async fn show(
        &self,
        items: &[ContentItem],
        selector: &FieldSelector,
        locale: &Locale,
    ) -> ViewUpdate {
        let (generation, token) = {
            let mut state = self.lock();
            state.generation += 1;
            if let Some(previous) = state.in_flight.take() {
                log::debug!("[VIEW] Cancelling generation {}", state.generation - 1);
                previous.cancel();
            }
            let token = CancellationToken::new();
            state.in_flight = Some(token.clone());
            (state.generation, token)
        };
        let _in_flight = InFlight {
            view: self,
            generation,
        };

        // Dropping the batch future on cancellation aborts its requests.
        let results = tokio::select! {
            results = self.orchestrator.translate_batch(items, selector, locale) => results,
            _ = token.cancelled() => {
                log::info!("[VIEW] Generation {} ({}) superseded in flight", generation, locale);
                return ViewUpdate::Superseded;
            }
        };

        let mut state = self.lock();
        if state.generation != generation {
            log::info!("[VIEW] Discarding stale generation {} ({})", generation, locale);
            return ViewUpdate::Superseded;
        }
        state.committed = Some(Committed {
            locale: locale.clone(),
            results: results.clone(),
        });
        ViewUpdate::Applied(results)
    }

    /// Abandon any in-flight batch (e.g. the page is going away).
    pub fn cancel(&self) {
        let mut state = self.lock();
        state.generation += 1;
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
    }

    pub fn is_translating(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Locale of the committed results, if any batch has committed.
    pub fn current_locale(&self) -> Option<Locale> {
        self.lock().committed.as_ref().map(|c| c.locale.clone())
    }

    /// Committed locale and results; `None` before the first commit.
    pub fn snapshot(&self) -> Option<(Locale, Vec<TranslationResult>)> {
        self.lock()
            .committed
            .as_ref()
            .map(|c| (c.locale.clone(), c.results.clone()))
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            log::error!("[VIEW] State mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Clears `in_flight` when its `show` ends, however it ends, unless a newer
/// generation has taken over.
struct InFlight<'a> {
    view: &'a TranslationView,
    generation: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.view.lock();
        if state.generation == self.generation {
            state.in_flight = None;
        }
    }
}
