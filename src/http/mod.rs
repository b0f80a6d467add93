pub mod bracket;
pub mod r#match;
pub mod signup;
pub mod status;

use rocket::Request;

use crate::util::error::ApiErrorResponder;

/// Replaces Rocket's default HTML 404 page with the JSON error body used everywhere else.
#[catch(404)]
pub fn not_found(_req: &Request) -> ApiErrorResponder {
    ApiErrorResponder::resource_missing()
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> ApiErrorResponder {
    ApiErrorResponder::internal_error()
}

/// Request bodies that fail to parse land here instead of Rocket's HTML page.
#[catch(422)]
pub fn unprocessable(_req: &Request) -> ApiErrorResponder {
    ApiErrorResponder::validation_error_with_message("The request body could not be parsed")
}
