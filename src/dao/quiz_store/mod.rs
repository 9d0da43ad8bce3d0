pub mod couchdb;
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::models::{QuestionEntity, TeamRecordEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the durable document store holding quiz content and team
/// progress.
///
/// The store is the system of record; the runtime consumes it through this
/// boundary only. `load_all_questions` must return a complete, consistent set
/// or fail; the catalog treats whatever it gets as the full question world.
pub trait QuizStore: Send + Sync {
    /// Read every question document.
    fn load_all_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    /// Read one team's progress record, if it exists.
    fn load_team_record(
        &self,
        team_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<TeamRecordEntity>>>;
    /// Write a team's progress record, replacing any previous revision.
    fn save_team_record(&self, record: TeamRecordEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap reachability probe used by the store monitor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish the backend after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
