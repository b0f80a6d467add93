use rocket::{State, Build, Rocket, serde::json::Json};

use crate::{BracketAPIState, bracket::views::MatchView, util::{responder::JsonResponder, error::ApiErrorResponder}};

use self::payload::ScoreSubmitRequest;

mod payload;

#[post("/<match_id>/score", format = "json", data = "<score_req>")]
async fn submit_score(
    state: &State<BracketAPIState>,
    match_id: &str,
    score_req: Json<ScoreSubmitRequest>
) -> Result<JsonResponder<MatchView>, ApiErrorResponder> {
    let ScoreSubmitRequest { p1_score, p2_score } = score_req.0;
    Ok(JsonResponder::ok(state.service.submit_score(match_id, p1_score, p2_score).await?))
}

#[put("/<match_id>/score", format = "json", data = "<score_req>")]
async fn correct_score(
    state: &State<BracketAPIState>,
    match_id: &str,
    score_req: Json<ScoreSubmitRequest>
) -> Result<JsonResponder<MatchView>, ApiErrorResponder> {
    let ScoreSubmitRequest { p1_score, p2_score } = score_req.0;
    Ok(JsonResponder::ok(state.service.correct_score(match_id, p1_score, p2_score).await?))
}

pub fn mount(rocket_build: Rocket<Build>) -> Rocket<Build> {
    rocket_build.mount("/matches", routes![submit_score, correct_score])
}
