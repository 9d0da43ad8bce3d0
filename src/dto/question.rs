//! Public projections of quiz questions.
//!
//! Everything in this module is safe to hand to players: the canonical answer
//! and the hint texts never appear here.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::answer::CoordinateDto, state::Question};

/// Player-facing projection of a quiz point.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionSummary {
    pub id: String,
    pub location: CoordinateDto,
    /// Score a correct answer is worth, with the configured default applied.
    pub points: u32,
}

impl From<(&Question, u32)> for QuestionSummary {
    fn from((question, default_points): (&Question, u32)) -> Self {
        Self {
            id: question.id.clone(),
            location: question.location.into(),
            points: question.points.unwrap_or(default_points),
        }
    }
}

/// Response listing every question in the published snapshot.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionsResponse {
    pub snapshot_version: u64,
    pub questions: Vec<QuestionSummary>,
}
