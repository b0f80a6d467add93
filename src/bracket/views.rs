use serde::{Serialize, Deserialize};

use crate::database::models::{r#match::{Match, MatchState}, scorecard::Scorecard, series::Series};

use super::engine::{is_decided_game, is_round_complete};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: String,
    pub serie: String,
    pub round: i32,
    pub slot: i32,
    pub p1: String,
    pub p2: String,
    pub timestamp: String,
    pub p1_score: Option<i32>,
    pub p2_score: Option<i32>,
    pub state: MatchState,
    pub decided: bool,
    pub winner: Option<String>,
    pub corrections: usize
}

impl From<&Match> for MatchView {
    fn from(m: &Match) -> Self {
        MatchView {
            id: m.id.clone(),
            serie: m.serie.clone(),
            round: m.round,
            slot: m.slot,
            p1: m.p1.clone(),
            p2: m.p2.clone(),
            timestamp: m.timestamp.clone(),
            p1_score: m.p1_score,
            p2_score: m.p2_score,
            state: m.get_state(),
            decided: m.is_decided(),
            winner: m.winner().cloned(),
            corrections: m.history.iter().filter(|revision| revision.correction).count()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub round: i32,
    pub complete: bool,
    pub matches: Vec<MatchView>
}

impl RoundView {
    pub fn from_matches(round: i32, matches: &[Match]) -> Self {
        RoundView {
            round,
            complete: is_round_complete(matches),
            matches: matches.iter().map(MatchView::from).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketView {
    pub series: Series,
    pub rounds: Vec<RoundView>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardView {
    #[serde(flatten)]
    pub scorecard: Scorecard,
    pub decided_pairings: usize
}

impl From<Scorecard> for ScorecardView {
    fn from(scorecard: Scorecard) -> Self {
        let decided_pairings = scorecard.results.iter()
            .filter(|games| !games.is_empty() && games.iter().all(|game| is_decided_game(game)))
            .count();
        ScorecardView { scorecard, decided_pairings }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupReceipt {
    pub id: String,
    pub duplicate: bool
}
