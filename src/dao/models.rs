use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Quiz question definition as persisted by the durable store.
///
/// The store is the system of record for quiz content; the runtime only ever
/// reads these and turns them into immutable snapshot questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionEntity {
    /// Unique identifier of the quiz point.
    pub id: String,
    /// Physical position of the quiz point.
    pub location: Coordinate,
    /// Canonical answer text.
    pub answer: String,
    /// Ordered hint texts.
    #[serde(default)]
    pub hints: Vec<String>,
    /// Index of the clue revealed on a correct answer.
    #[serde(default)]
    pub clue_index: usize,
    /// Optional per-question score; absent means the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

/// Team progress record as persisted by the durable store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRecordEntity {
    /// Unique team identifier.
    pub team_id: String,
    /// Accumulated score.
    pub points: u32,
    /// Ids of every question the team has been credited for.
    #[serde(default)]
    pub answered_question_ids: BTreeSet<String>,
}
