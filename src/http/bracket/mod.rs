use rocket::{State, Rocket, Build, serde::json::Json};

use crate::{BracketAPIState, bracket::views::{BracketView, ScorecardView}, util::{responder::JsonResponder, error::ApiErrorResponder}};

use self::payload::{SeriesCreateRequest, ScorecardResultRequest};

mod payload;

const DEFAULT_STAGE : i32 = 1;

#[get("/<series_id>?<round>")]
async fn get_bracket(
    state: &State<BracketAPIState>,
    series_id: &str,
    round: Option<i32>
) -> Result<JsonResponder<BracketView>, ApiErrorResponder> {
    Ok(JsonResponder::ok(state.service.get_bracket_view(series_id, round).await?))
}

#[get("/<series_id>/scorecard")]
async fn get_default_scorecard(
    state: &State<BracketAPIState>,
    series_id: &str
) -> Result<JsonResponder<ScorecardView>, ApiErrorResponder> {
    Ok(JsonResponder::ok(state.service.get_scorecard_view(series_id, DEFAULT_STAGE).await?))
}

#[get("/<series_id>/scorecard/<stage>")]
async fn get_scorecard(
    state: &State<BracketAPIState>,
    series_id: &str,
    stage: i32
) -> Result<JsonResponder<ScorecardView>, ApiErrorResponder> {
    Ok(JsonResponder::ok(state.service.get_scorecard_view(series_id, stage).await?))
}

#[post("/", format = "json", data = "<series_create_req>")]
async fn create_series(
    state: &State<BracketAPIState>,
    series_create_req: Json<SeriesCreateRequest>
) -> Result<JsonResponder<BracketView>, ApiErrorResponder> {
    let view = state.service.create_series(series_create_req.0.into()).await?;
    let location = format!("/bracket/{}", view.series.id);
    Ok(JsonResponder::created(view, location))
}

#[post("/<series_id>/advance")]
async fn advance_round(
    state: &State<BracketAPIState>,
    series_id: &str
) -> Result<JsonResponder<BracketView>, ApiErrorResponder> {
    Ok(JsonResponder::ok(state.service.advance_round(series_id).await?))
}

#[post("/<series_id>/scorecard/<stage>/results", format = "json", data = "<result_req>")]
async fn submit_scorecard_result(
    state: &State<BracketAPIState>,
    series_id: &str,
    stage: i32,
    result_req: Json<ScorecardResultRequest>
) -> Result<JsonResponder<ScorecardView>, ApiErrorResponder> {
    let ScorecardResultRequest { pairing, game, score1, score2 } = result_req.0;
    Ok(JsonResponder::ok(
        state.service.submit_scorecard_result(series_id, stage, pairing, game, score1, score2).await?
    ))
}

pub fn mount(rocket_build: Rocket<Build>) -> Rocket<Build> {
    rocket_build.mount("/bracket", routes![
        get_bracket,
        get_default_scorecard,
        get_scorecard,
        create_series,
        advance_round,
        submit_scorecard_result
    ])
}
