use serde::{Deserialize, Serialize};

use crate::{bracket::NewSeries, database::models::series::BracketInfo};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCreateRequest {
    pub name: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub api: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub raffle: bool,
    pub players: Vec<String>,
    #[serde(default)]
    pub scheduled: Option<String>
}

impl From<SeriesCreateRequest> for NewSeries {
    fn from(req: SeriesCreateRequest) -> Self {
        NewSeries {
            id: None,
            name: req.name,
            bracket: BracketInfo { organizer: req.organizer, api: req.api, game: req.game },
            raffle: req.raffle,
            players: req.players,
            scheduled: req.scheduled
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardResultRequest {
    pub pairing: usize,
    pub game: usize,
    pub score1: i32,
    pub score2: i32
}
