use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    dao::{
        models::{QuestionEntity, TeamRecordEntity},
        quiz_store::couchdb::error::CouchError,
    },
    geo::Coordinate,
};

pub const QUESTION_PREFIX: &str = "question::";
pub const TEAM_PREFIX: &str = "team::";
pub const END_SUFFIX: &str = "\u{ffff}";

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    pub id: String,
    #[serde(default)]
    pub doc: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchQuestionDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub question: QuestionBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBody {
    pub location: Coordinate,
    pub answer: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub clue_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl TryFrom<CouchQuestionDocument> for QuestionEntity {
    type Error = CouchError;

    fn try_from(doc: CouchQuestionDocument) -> Result<Self, Self::Error> {
        let id = extract_key(&doc.id, QUESTION_PREFIX)?.to_owned();
        Ok(Self {
            id,
            location: doc.question.location,
            answer: doc.question.answer,
            hints: doc.question.hints,
            clue_index: doc.question.clue_index,
            points: doc.question.points,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchTeamDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub team: TeamBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBody {
    pub points: u32,
    #[serde(default)]
    pub answered_question_ids: BTreeSet<String>,
}

impl From<(TeamRecordEntity, Option<String>)> for CouchTeamDocument {
    fn from((record, rev): (TeamRecordEntity, Option<String>)) -> Self {
        Self {
            id: team_doc_id(&record.team_id),
            rev,
            team: TeamBody {
                points: record.points,
                answered_question_ids: record.answered_question_ids,
            },
        }
    }
}

impl TryFrom<CouchTeamDocument> for TeamRecordEntity {
    type Error = CouchError;

    fn try_from(doc: CouchTeamDocument) -> Result<Self, Self::Error> {
        let team_id = extract_key(&doc.id, TEAM_PREFIX)?.to_owned();
        Ok(Self {
            team_id,
            points: doc.team.points,
            answered_question_ids: doc.team.answered_question_ids,
        })
    }
}

pub fn team_doc_id(team_id: &str) -> String {
    format!("{}{}", TEAM_PREFIX, team_id)
}

pub fn extract_key<'a>(doc_id: &'a str, prefix: &'static str) -> Result<&'a str, CouchError> {
    let key = doc_id
        .strip_prefix(prefix)
        .ok_or_else(|| CouchError::DocKey {
            doc_id: doc_id.to_string(),
            reason: "wrong kind prefix",
        })?;

    if key.is_empty() {
        return Err(CouchError::DocKey {
            doc_id: doc_id.to_string(),
            reason: "nothing after the prefix",
        });
    }

    Ok(key)
}
