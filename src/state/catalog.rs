//! Immutable question snapshots and the atomically swappable catalog that
//! publishes them to the submission flow.

use std::{sync::Arc, time::SystemTime};

use indexmap::IndexMap;
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::{dao::models::QuestionEntity, geo::Coordinate};

/// A quiz point as it lives inside a published snapshot.
///
/// Owned exclusively by the snapshot; never mutated after publication.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Unique identifier of the quiz point.
    pub id: String,
    /// Physical position players must reach before answering.
    pub location: Coordinate,
    /// Canonical answer text; compared after normalization.
    pub answer: String,
    /// Ordered hint texts for this quiz point.
    pub hints: Vec<String>,
    /// Index into `hints` of the clue revealed on a correct answer.
    pub clue_index: usize,
    /// Optional per-question score override; `None` falls back to the
    /// configured default.
    pub points: Option<u32>,
}

impl Question {
    /// Hint revealed on a correct answer, when `clue_index` points at one.
    pub fn next_hint(&self) -> Option<&str> {
        self.hints.get(self.clue_index).map(String::as_str)
    }
}

impl From<QuestionEntity> for Question {
    fn from(value: QuestionEntity) -> Self {
        Self {
            id: value.id,
            location: value.location,
            answer: value.answer,
            hints: value.hints,
            clue_index: value.clue_index,
            points: value.points,
        }
    }
}

/// Immutable, versioned, point-in-time copy of every quiz question.
///
/// Instances are shared behind an [`Arc`]; a superseded snapshot is dropped
/// once the last in-flight submission holding it finishes.
#[derive(Debug)]
pub struct QuestionSnapshot {
    version: u64,
    loaded_at: SystemTime,
    questions: IndexMap<String, Question>,
}

impl QuestionSnapshot {
    /// Build a snapshot from a complete question set.
    ///
    /// Only the refresher constructs snapshots; it derives `version` from the
    /// previously published one.
    pub(crate) fn new(
        version: u64,
        loaded_at: SystemTime,
        questions: IndexMap<String, Question>,
    ) -> Self {
        Self {
            version,
            loaded_at,
            questions,
        }
    }

    /// Monotonic version assigned at publication.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Moment the durable store was read to build this snapshot.
    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }

    /// Look up a question by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Number of questions in this snapshot.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the snapshot carries no questions at all.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate questions in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }
}

/// Holder of the single published [`QuestionSnapshot`].
///
/// Readers capture the current snapshot as a pointer clone and keep a
/// consistent view for as long as they hold it; publication is a pointer swap
/// under a write lock, so a reader blocks for at most the swap itself. The
/// catalog cannot fail; load failures belong to the refresher.
pub struct QuestionCatalog {
    current: RwLock<Arc<QuestionSnapshot>>,
    refresh_gate: Mutex<()>,
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionCatalog {
    /// Create a catalog primed with an empty version-0 snapshot.
    ///
    /// Startup must publish a real snapshot before the server begins
    /// listening; the empty snapshot only exists so `current()` always has
    /// something to hand out.
    pub fn new() -> Self {
        let initial = QuestionSnapshot::new(0, SystemTime::now(), IndexMap::new());
        Self {
            current: RwLock::new(Arc::new(initial)),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Capture the currently published snapshot.
    pub async fn current(&self) -> Arc<QuestionSnapshot> {
        self.current.read().await.clone()
    }

    /// Serialize refresh attempts so snapshot versions stay strictly
    /// monotonic. Held across the store read; readers of `current()` are not
    /// affected by it.
    pub(crate) async fn begin_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }

    /// Atomically replace the published snapshot. Only the refresher calls
    /// this, with the refresh gate held.
    pub(crate) async fn publish(&self, snapshot: QuestionSnapshot) {
        let mut slot = self.current.write().await;
        *slot = Arc::new(snapshot);
    }
}
