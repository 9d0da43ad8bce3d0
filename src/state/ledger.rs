//! Per-team score records and the atomic at-most-once commit guarding them.

use std::collections::BTreeSet;

use dashmap::DashMap;

use crate::dao::models::TeamRecordEntity;

/// Mutable progress record for one team.
///
/// `answered_question_ids` only ever grows, and `points` only changes in the
/// same critical section that grows the set; both invariants are enforced by
/// [`ScoreLedger::try_commit`] being the sole mutation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    /// Unique team identifier as asserted by the client.
    pub team_id: String,
    /// Accumulated score; never decreases.
    pub points: u32,
    /// Ids of every question this team has been credited for.
    pub answered_question_ids: BTreeSet<String>,
}

impl TeamRecord {
    /// Zero-value record for a team that has not scored yet.
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            points: 0,
            answered_question_ids: BTreeSet::new(),
        }
    }
}

impl From<TeamRecordEntity> for TeamRecord {
    fn from(value: TeamRecordEntity) -> Self {
        Self {
            team_id: value.team_id,
            points: value.points,
            answered_question_ids: value.answered_question_ids,
        }
    }
}

impl From<TeamRecord> for TeamRecordEntity {
    fn from(value: TeamRecord) -> Self {
        Self {
            team_id: value.team_id,
            points: value.points,
            answered_question_ids: value.answered_question_ids,
        }
    }
}

/// Outcome of a scoring attempt for one (team, question) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResult {
    /// The pair was scored just now; carries the team's updated total.
    Committed {
        /// Team total after the award.
        new_total: u32,
    },
    /// The pair had been scored before; nothing was mutated.
    AlreadyCommitted,
}

/// Concurrent registry of team records enforcing at-most-once scoring.
///
/// Backed by a sharded map keyed by team id: commits for unrelated teams
/// proceed in parallel, while the check-insert-add sequence for a single team
/// runs under its shard's exclusive guard and is therefore indivisible. No
/// guard is ever held across an await point.
#[derive(Debug, Default)]
pub struct ScoreLedger {
    teams: DashMap<String, TeamRecord>,
}

impl ScoreLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically decide whether `(team_id, question_id)` may score.
    ///
    /// If the question is already in the team's answered set the call returns
    /// [`CommitResult::AlreadyCommitted`] without touching the record;
    /// otherwise it inserts the id, adds `points_to_award`, and returns the
    /// new total. Any number of concurrent calls for the same pair yield
    /// exactly one `Committed`.
    pub fn try_commit(
        &self,
        team_id: &str,
        question_id: &str,
        points_to_award: u32,
    ) -> CommitResult {
        let mut record = self
            .teams
            .entry(team_id.to_owned())
            .or_insert_with(|| TeamRecord::new(team_id));

        if !record.answered_question_ids.insert(question_id.to_owned()) {
            return CommitResult::AlreadyCommitted;
        }

        record.points += points_to_award;
        CommitResult::Committed {
            new_total: record.points,
        }
    }

    /// Whether the team has already been credited for the question.
    ///
    /// The answered set is monotonic, so a `true` observation is final and
    /// can be acted on without holding any lock; a `false` may be outdated a
    /// moment later, which is why acceptance still goes through
    /// [`Self::try_commit`].
    pub fn has_answered(&self, team_id: &str, question_id: &str) -> bool {
        self.teams
            .get(team_id)
            .is_some_and(|record| record.answered_question_ids.contains(question_id))
    }

    /// Whether the team exists in memory, either from a commit or hydration.
    pub fn is_tracked(&self, team_id: &str) -> bool {
        self.teams.contains_key(team_id)
    }

    /// Install a record loaded from the durable store, unless the team is
    /// already tracked; once a team lives in memory, memory stays
    /// authoritative.
    pub fn hydrate(&self, record: TeamRecord) {
        self.teams.entry(record.team_id.clone()).or_insert(record);
    }

    /// Consistent-at-some-instant copy of a team's record; unseen teams yield
    /// the zero-value record.
    pub fn get(&self, team_id: &str) -> TeamRecord {
        self.teams
            .get(team_id)
            .map(|record| record.clone())
            .unwrap_or_else(|| TeamRecord::new(team_id))
    }

    /// Enumerate `(team_id, points)` for every tracked team.
    ///
    /// Each entry is internally consistent; the collection as a whole may
    /// interleave with concurrent commits, which the leaderboard tolerates.
    pub fn standings(&self) -> Vec<(String, u32)> {
        self.teams
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().points))
            .collect()
    }

    /// Number of teams tracked in memory.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether no team has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_commit_awards_points_and_marks_the_question() {
        let ledger = ScoreLedger::new();

        let result = ledger.try_commit("t1", "q1", 10);
        assert_eq!(result, CommitResult::Committed { new_total: 10 });

        let record = ledger.get("t1");
        assert_eq!(record.points, 10);
        assert!(record.answered_question_ids.contains("q1"));
    }

    #[test]
    fn repeated_commit_for_the_same_pair_changes_nothing() {
        let ledger = ScoreLedger::new();
        ledger.try_commit("t1", "q1", 10);

        assert_eq!(ledger.try_commit("t1", "q1", 10), CommitResult::AlreadyCommitted);
        assert_eq!(ledger.get("t1").points, 10);
        assert_eq!(ledger.get("t1").answered_question_ids.len(), 1);
    }

    #[test]
    fn concurrent_commits_for_one_pair_produce_exactly_one_winner() {
        let ledger = ScoreLedger::new();

        let committed = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..32)
                .map(|_| scope.spawn(|| ledger.try_commit("t1", "q1", 10)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("commit thread panicked"))
                .filter(|result| matches!(result, CommitResult::Committed { .. }))
                .count()
        });

        assert_eq!(committed, 1);
        assert_eq!(ledger.get("t1").points, 10);
    }

    #[test]
    fn concurrent_commits_for_distinct_questions_lose_no_update() {
        let ledger = ScoreLedger::new();

        std::thread::scope(|scope| {
            for chunk in 0..4 {
                let ledger = &ledger;
                scope.spawn(move || {
                    for i in 0..25 {
                        ledger.try_commit("t1", &format!("q{}-{}", chunk, i), 3);
                    }
                });
            }
        });

        let record = ledger.get("t1");
        assert_eq!(record.points, 4 * 25 * 3);
        assert_eq!(record.answered_question_ids.len(), 100);
    }

    #[test]
    fn unrelated_teams_commit_independently() {
        let ledger = ScoreLedger::new();

        std::thread::scope(|scope| {
            for team in 0..8 {
                let ledger = &ledger;
                scope.spawn(move || {
                    let team_id = format!("team-{team}");
                    ledger.try_commit(&team_id, "q1", 5);
                    ledger.try_commit(&team_id, "q2", 5);
                });
            }
        });

        assert_eq!(ledger.len(), 8);
        for team in 0..8 {
            assert_eq!(ledger.get(&format!("team-{team}")).points, 10);
        }
    }

    #[test]
    fn unseen_team_reads_as_zero_value_record() {
        let ledger = ScoreLedger::new();
        let record = ledger.get("ghosts");
        assert_eq!(record.team_id, "ghosts");
        assert_eq!(record.points, 0);
        assert!(record.answered_question_ids.is_empty());
        assert!(!ledger.is_tracked("ghosts"));
    }

    #[test]
    fn has_answered_tracks_only_committed_questions() {
        let ledger = ScoreLedger::new();
        assert!(!ledger.has_answered("t1", "q1"));

        ledger.try_commit("t1", "q1", 10);
        assert!(ledger.has_answered("t1", "q1"));
        assert!(!ledger.has_answered("t1", "q2"));
    }

    #[test]
    fn hydrate_installs_store_history_but_never_clobbers_live_state() {
        let ledger = ScoreLedger::new();

        let mut from_store = TeamRecord::new("t1");
        from_store.points = 30;
        from_store.answered_question_ids.insert("q1".to_owned());
        from_store.answered_question_ids.insert("q2".to_owned());
        ledger.hydrate(from_store);

        assert_eq!(ledger.get("t1").points, 30);
        assert_eq!(ledger.try_commit("t1", "q1", 10), CommitResult::AlreadyCommitted);

        // A second hydration (racing first submissions after a restart) is a no-op.
        let mut stale = TeamRecord::new("t1");
        stale.points = 5;
        ledger.hydrate(stale);
        assert_eq!(ledger.get("t1").points, 30);
    }

    #[test]
    fn standings_lists_each_tracked_team_once() {
        let ledger = ScoreLedger::new();
        ledger.try_commit("alpha", "q1", 10);
        ledger.try_commit("bravo", "q1", 10);
        ledger.try_commit("bravo", "q2", 10);

        let mut standings = ledger.standings();
        standings.sort();
        assert_eq!(
            standings,
            vec![("alpha".to_owned(), 10), ("bravo".to_owned(), 20)]
        );
    }
}
