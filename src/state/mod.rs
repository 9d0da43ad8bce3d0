pub mod catalog;
pub mod ledger;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::{config::AppConfig, dao::quiz_store::QuizStore};

pub use self::catalog::{Question, QuestionCatalog, QuestionSnapshot};
pub use self::ledger::{CommitResult, ScoreLedger, TeamRecord};

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

/// Central application state tying the question catalog, the score ledger and
/// the storage backend together.
pub struct AppState {
    catalog: QuestionCatalog,
    ledger: ScoreLedger,
    store: Arc<dyn QuizStore>,
    config: AppConfig,
    admin_token: String,
    degraded: watch::Sender<bool>,
    dirty_teams: mpsc::UnboundedSender<String>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned
    /// cheaply.
    ///
    /// Also returns the receiving end of the dirty-team queue; the score
    /// persistence task drains it in the background.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn QuizStore>,
        admin_token: String,
    ) -> (SharedState, mpsc::UnboundedReceiver<String>) {
        let (degraded_tx, _rx) = watch::channel(false);
        let (dirty_tx, dirty_rx) = mpsc::unbounded_channel();
        let state = Arc::new(Self {
            catalog: QuestionCatalog::new(),
            ledger: ScoreLedger::new(),
            store,
            config,
            admin_token,
            degraded: degraded_tx,
            dirty_teams: dirty_tx,
        });
        (state, dirty_rx)
    }

    /// Catalog holding the published question snapshot.
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// In-memory score ledger, the authority on team progress.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Handle to the storage backend.
    pub fn store(&self) -> Arc<dyn QuizStore> {
        self.store.clone()
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Token required by the admin routes.
    pub fn admin_token(&self) -> &str {
        &self.admin_token
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn set_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Queue a team for background persistence after its record changed.
    ///
    /// Sends only fail once the persistence task is gone, which happens at
    /// shutdown; the loss is acceptable there.
    pub fn mark_dirty(&self, team_id: &str) {
        let _ = self.dirty_teams.send(team_id.to_owned());
    }
}
