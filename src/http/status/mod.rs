use rocket::{Rocket, Build, State};
use rocket::serde::Serialize;
use rocket::http::Status;

use crate::{BracketAPIState, database::ping_database, util::responder::JsonResponder};

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StatusResponse {
    status: &'static str,
    storage: bool
}

/// Liveness plus a store round-trip; answers 503 while the database is unreachable.
#[get("/")]
pub async fn status(state: &State<BracketAPIState>) -> JsonResponder<StatusResponse> {
    let storage = ping_database(&state.database.mongo).await;
    let status = if storage { Status::Ok } else { Status::ServiceUnavailable };
    JsonResponder::from(StatusResponse { status: status.reason().unwrap_or("OK"), storage }, status)
}

pub fn mount(rocket_build: Rocket<Build>) -> Rocket<Build> {
    rocket_build.mount("/status", routes![status])
}
