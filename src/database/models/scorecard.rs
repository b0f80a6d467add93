use bracket_api_rs_derive::IdentifiableDocument;
use bracket_api_rs_macro::IdentifiableDocument;
use serde::{Serialize, Deserialize};

use crate::database::CollectionOwner;

use super::series::BracketInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IdentifiableDocument)]
pub struct Scorecard {
    #[id]
    #[serde(rename = "_id")]
    pub id: String,
    pub serie: String,
    #[serde(rename = "scorecard")]
    pub stage: i32,
    #[serde(rename = "bracketname", default)]
    pub name: String,
    #[serde(flatten)]
    pub bracket: BracketInfo,
    #[serde(default)]
    pub raffle: bool,
    #[serde(default)]
    pub completed: bool,
    /// One `[player1, player2]` entry per pairing.
    pub players: Vec<Vec<String>>,
    /// `results[pairing][game]` holds `[score1, score2]`.
    pub results: Vec<Vec<Vec<i32>>>
}

impl Scorecard {
    pub fn has_matching_dimensions(&self) -> bool {
        self.players.len() == self.results.len()
    }
}

impl CollectionOwner<Scorecard> for Scorecard {
    fn get_collection(database: &crate::database::Database) -> &mongodb::Collection<Scorecard> {
        &database.scorecards
    }

    fn get_collection_name() -> &'static str {
        "scorecard"
    }
}
