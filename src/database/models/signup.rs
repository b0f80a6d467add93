use bracket_api_rs_derive::IdentifiableDocument;
use bracket_api_rs_macro::IdentifiableDocument;
use serde::{Serialize, Deserialize};

use crate::database::CollectionOwner;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IdentifiableDocument)]
pub struct Signup {
    #[serde(rename = "_id")]
    #[id]
    pub id: String,
    #[serde(rename = "playername")]
    pub player_name: String,
    pub email: String,
    #[serde(rename = "signupaddress")]
    pub source_address: String,
    #[serde(rename = "signupdate")]
    pub submitted_at: u64,
    #[serde(default)]
    pub serie: Option<String>,
    #[serde(default)]
    pub duplicate: bool
}

impl CollectionOwner<Signup> for Signup {
    fn get_collection(database: &crate::database::Database) -> &mongodb::Collection<Signup> {
        &database.signups
    }

    fn get_collection_name() -> &'static str {
        "signup"
    }
}
