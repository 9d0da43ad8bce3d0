//! DTO definitions for the answer submission endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dto::validation::validate_team_id, geo::Coordinate,
    services::submission_service::SubmissionOutcome,
};

/// Geographic position as carried over the wire.
///
/// Out-of-range values are accepted as-is; a nonsensical position simply fails
/// the distance gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lng: f64,
}

impl From<CoordinateDto> for Coordinate {
    fn from(value: CoordinateDto) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl From<Coordinate> for CoordinateDto {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

/// Payload submitted when a team answers a quiz point.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAnswerRequest {
    /// Client-asserted team identity.
    pub team_id: String,
    /// Quiz point the answer targets.
    pub question_id: String,
    /// Free-form answer text; compared after normalization.
    pub answer: String,
    /// Position the client reports standing at.
    pub position: CoordinateDto,
}

impl Validate for SubmitAnswerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_team_id(&self.team_id) {
            errors.add("team_id", e);
        }

        if self.question_id.is_empty() {
            let mut err = ValidationError::new("question_id_empty");
            err.message = Some("Question ID must not be empty".into());
            errors.add("question_id", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Outcome of one answer submission.
///
/// Every variant is an HTTP 200; clients branch on the `result` tag.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SubmitAnswerResponse {
    /// Correct answer from within the acceptance radius; points were awarded.
    Accepted {
        points_awarded: u32,
        total_points: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_hint: Option<String>,
    },
    /// The reported position is too far from the quiz point.
    OutOfRange { distance_m: f64, radius_m: f64 },
    /// Wrong answer given from within the radius.
    Incorrect,
    /// The team was already credited for this question.
    AlreadyAnswered,
    /// No question with the submitted id exists in the current snapshot.
    QuestionNotFound,
}

impl From<SubmissionOutcome> for SubmitAnswerResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Accepted {
                points_awarded,
                total_points,
                next_hint,
            } => Self::Accepted {
                points_awarded,
                total_points,
                next_hint,
            },
            SubmissionOutcome::OutOfRange {
                distance_m,
                radius_m,
            } => Self::OutOfRange {
                distance_m,
                radius_m,
            },
            SubmissionOutcome::Incorrect => Self::Incorrect,
            SubmissionOutcome::AlreadyAnswered => Self::AlreadyAnswered,
            SubmissionOutcome::QuestionNotFound => Self::QuestionNotFound,
        }
    }
}
