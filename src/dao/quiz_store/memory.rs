use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use dashmap::DashMap;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::dao::{
    models::{QuestionEntity, TeamRecordEntity},
    quiz_store::QuizStore,
    storage::{StorageError, StorageResult},
};

/// Error injected by the in-memory store when a failure toggle is set.
#[derive(Debug, Error)]
#[error("injected {0} failure")]
pub struct InjectedFailure(&'static str);

#[derive(Default)]
struct Inner {
    questions: RwLock<Vec<QuestionEntity>>,
    teams: DashMap<String, TeamRecordEntity>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// In-memory [`QuizStore`] used by tests and local development.
///
/// Failure toggles let callers exercise the degraded paths: `fail_reads`
/// affects loads, health checks and reconnects, `fail_writes` affects saves.
#[derive(Clone, Default)]
pub struct MemoryQuizStore {
    inner: Arc<Inner>,
}

impl MemoryQuizStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with the given questions.
    pub fn with_questions(questions: Vec<QuestionEntity>) -> Self {
        let store = Self::new();
        store.set_questions(questions);
        store
    }

    /// Replace the full question set served by `load_all_questions`.
    pub fn set_questions(&self, questions: Vec<QuestionEntity>) {
        *self.inner.questions.write().unwrap() = questions;
    }

    /// Seed a team record directly, bypassing `save_team_record`.
    pub fn insert_team(&self, record: TeamRecordEntity) {
        self.inner.teams.insert(record.team_id.clone(), record);
    }

    /// Snapshot of the last record saved for a team, if any.
    pub fn saved_team(&self, team_id: &str) -> Option<TeamRecordEntity> {
        self.inner.teams.get(team_id).map(|entry| entry.clone())
    }

    /// Toggle failures on loads, health checks and reconnects.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Toggle failures on saves.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> StorageResult<()> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            Err(StorageError::unavailable(
                "memory store read failure injected".to_string(),
                InjectedFailure("read"),
            ))
        } else {
            Ok(())
        }
    }

    fn check_writes(&self) -> StorageResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::unavailable(
                "memory store write failure injected".to_string(),
                InjectedFailure("write"),
            ))
        } else {
            Ok(())
        }
    }
}

impl QuizStore for MemoryQuizStore {
    fn load_all_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store.check_reads()?;
            Ok(store.inner.questions.read().unwrap().clone())
        })
    }

    fn load_team_record(
        &self,
        team_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<TeamRecordEntity>>> {
        let store = self.clone();
        let team_id = team_id.to_owned();
        Box::pin(async move {
            store.check_reads()?;
            Ok(store.inner.teams.get(&team_id).map(|entry| entry.clone()))
        })
    }

    fn save_team_record(&self, record: TeamRecordEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.check_writes()?;
            store.inner.teams.insert(record.team_id.clone(), record);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.check_reads() })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.check_reads() })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::geo::Coordinate;

    fn question(id: &str) -> QuestionEntity {
        QuestionEntity {
            id: id.to_string(),
            location: Coordinate {
                lat: 30.3539,
                lng: 76.3683,
            },
            answer: "lighthouse".to_string(),
            hints: vec![],
            clue_index: 0,
            points: None,
        }
    }

    #[tokio::test]
    async fn saved_records_are_visible_to_later_loads() {
        let store = MemoryQuizStore::new();
        let record = TeamRecordEntity {
            team_id: "team-7".to_string(),
            points: 30,
            answered_question_ids: BTreeSet::from(["q1".to_string()]),
        };

        store.save_team_record(record).await.unwrap();

        let loaded = store.load_team_record("team-7").await.unwrap().unwrap();
        assert_eq!(loaded.points, 30);
        assert!(loaded.answered_question_ids.contains("q1"));
        assert!(store.load_team_record("team-8").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn read_failures_surface_as_unavailable() {
        let store = MemoryQuizStore::with_questions(vec![question("q1")]);
        store.set_fail_reads(true);

        let err = store.load_all_questions().await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable { .. }));
        assert!(store.health_check().await.is_err());

        store.set_fail_reads(false);
        assert_eq!(store.load_all_questions().await.unwrap().len(), 1);
        assert!(store.try_reconnect().await.is_ok());
    }

    #[tokio::test]
    async fn write_failures_do_not_affect_reads() {
        let store = MemoryQuizStore::new();
        store.set_fail_writes(true);

        let record = TeamRecordEntity {
            team_id: "team-1".to_string(),
            points: 10,
            answered_question_ids: BTreeSet::new(),
        };
        assert!(store.save_team_record(record).await.is_err());
        assert!(store.load_team_record("team-1").await.unwrap().is_none());
    }
}
