use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmitRequest {
    pub p1_score: i32,
    pub p2_score: i32
}
