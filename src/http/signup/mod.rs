use std::net::IpAddr;

use rocket::{State, Rocket, Build, form::Form, http::Status};

use crate::{BracketAPIState, bracket::views::SignupReceipt, util::{responder::JsonResponder, error::ApiErrorResponder}};

use self::payload::SignupForm;

mod payload;

#[post("/", data = "<signup_form>")]
async fn submit_signup(
    state: &State<BracketAPIState>,
    signup_form: Form<SignupForm>,
    client_ip: Option<IpAddr>
) -> Result<JsonResponder<SignupReceipt>, ApiErrorResponder> {
    let SignupForm { username, email, serie } = signup_form.into_inner();
    let source_address = client_ip.map(|ip| ip.to_string()).unwrap_or_default();
    let receipt = state.service.register_signup(
        username.as_deref().unwrap_or(""),
        email.as_deref().unwrap_or(""),
        &source_address,
        serie.as_deref()
    ).await?;
    Ok(JsonResponder::from(receipt, Status::Created))
}

pub fn mount(rocket_build: Rocket<Build>) -> Rocket<Build> {
    rocket_build.mount("/signup", routes![submit_signup])
}
