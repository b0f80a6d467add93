use bracket_api_rs_derive::IdentifiableDocument;
use bracket_api_rs_macro::IdentifiableDocument;
use serde::{Serialize, Deserialize};

use crate::database::CollectionOwner;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IdentifiableDocument)]
pub struct Series {
    #[serde(rename = "_id")]
    #[id]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub bracket: BracketInfo,
    #[serde(default)]
    pub raffle: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub champion: Option<String>,
    #[serde(rename = "createdate")]
    pub created_at: u64
}

/// Metadata describing where a bracket comes from and what is being played.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketInfo {
    #[serde(rename = "bracketorganizer", default)]
    pub organizer: String,
    #[serde(rename = "bracketapi", default)]
    pub api: String,
    #[serde(rename = "bracketgame", default)]
    pub game: String
}

impl CollectionOwner<Series> for Series {
    fn get_collection(database: &crate::database::Database) -> &mongodb::Collection<Series> {
        &database.series
    }

    fn get_collection_name() -> &'static str {
        "series"
    }
}
