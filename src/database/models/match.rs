use bracket_api_rs_derive::IdentifiableDocument;
use bracket_api_rs_macro::IdentifiableDocument;
use serde::{Serialize, Deserialize};

use crate::database::CollectionOwner;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IdentifiableDocument)]
pub struct Match {
    #[id]
    #[serde(rename = "_id")]
    pub id: String,
    pub serie: String,
    pub round: i32,
    #[serde(default)]
    pub slot: i32,
    pub p1: String,
    pub p2: String,
    pub timestamp: String,
    #[serde(default)]
    pub p1_score: Option<i32>,
    #[serde(default)]
    pub p2_score: Option<i32>,
    #[serde(default)]
    pub history: Vec<ScoreRevision>
}

impl Match {
    pub fn scores(&self) -> (Option<i32>, Option<i32>) {
        (self.p1_score, self.p2_score)
    }

    /// Both scores recorded and not tied.
    pub fn is_decided(&self) -> bool {
        match self.scores() {
            (Some(p1), Some(p2)) => p1 != p2,
            _ => false
        }
    }

    pub fn winner(&self) -> Option<&String> {
        match self.scores() {
            (Some(p1), Some(p2)) if p1 > p2 => Some(&self.p1),
            (Some(p1), Some(p2)) if p2 > p1 => Some(&self.p2),
            _ => None
        }
    }

    pub fn get_state(&self) -> MatchState {
        if self.is_decided() {
            MatchState::Decided
        } else if self.p1_score.is_none() && self.p2_score.is_none() {
            MatchState::Scheduled
        } else {
            MatchState::InProgress
        }
    }
}

impl CollectionOwner<Match> for Match {
    fn get_collection(database: &crate::database::Database) -> &mongodb::Collection<Match> {
        &database.matches
    }

    fn get_collection_name() -> &'static str {
        "match"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    Scheduled,
    InProgress,
    Decided
}

/// One entry of the audit trail kept for every applied score change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRevision {
    pub p1_score: i32,
    pub p2_score: i32,
    pub recorded_at: u64,
    pub correction: bool
}
