use serde::{Serialize, Deserialize};
use rocket::{response::{self, Response, Responder}, Request, http::{Status, ContentType}, serde::json::Json};
use strum_macros::Display;

use crate::bracket::BracketError;

#[derive(Debug)]
pub struct ApiErrorResponder {
    pub status: Status,
    pub error: ApiErrorV2
}

impl ApiErrorResponder {
    fn create_api_error_responder(status: Status, api_exception_type: ApiExceptionType, message: &str) -> Self {
        ApiErrorResponder {
            status,
            error: ApiErrorV2 { code: api_exception_type, message: String::from(message), error: true }
        }
    }

    pub fn validation_error_with_message(message: &str) -> Self {
        ApiErrorResponder::create_api_error_responder(Status::BadRequest, ApiExceptionType::ValidationError, message)
    }

    pub fn resource_missing() -> Self {
        ApiErrorResponder::create_api_error_responder(
            Status::NotFound,
            ApiExceptionType::ResourceMissing,
            "The requested resource does not exist"
        )
    }

    pub fn internal_error() -> Self {
        ApiErrorResponder::create_api_error_responder(
            Status::InternalServerError,
            ApiExceptionType::InternalServerError,
            "Something went wrong"
        )
    }
}

impl From<BracketError> for ApiErrorResponder {
    fn from(e: BracketError) -> Self {
        let message = e.to_string();
        let (status, code) = match &e {
            BracketError::StorageUnavailable(_) => (Status::ServiceUnavailable, ApiExceptionType::StorageUnavailable),
            BracketError::Validation(_) => (Status::BadRequest, ApiExceptionType::ValidationError),
            BracketError::InvalidScore(_) => (Status::BadRequest, ApiExceptionType::InvalidScore),
            BracketError::ScoreAlreadyRecorded(_) => (Status::Conflict, ApiExceptionType::ScoreAlreadyRecorded),
            BracketError::NotFound { kind: "series", .. } => (Status::NotFound, ApiExceptionType::SeriesMissing),
            BracketError::NotFound { kind: "match", .. } => (Status::NotFound, ApiExceptionType::MatchMissing),
            BracketError::NotFound { kind: "scorecard", .. } => (Status::NotFound, ApiExceptionType::ScorecardMissing),
            BracketError::NotFound { .. } => (Status::NotFound, ApiExceptionType::ResourceMissing),
            BracketError::Conflict(_) => (Status::Conflict, ApiExceptionType::ConcurrentModification)
        };
        ApiErrorResponder::create_api_error_responder(status, code, &message)
    }
}

impl<'r> Responder<'r, 'static> for ApiErrorResponder {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let data = Json(self.error);
        Response::build_from(data.respond_to(req)?)
            .header(ContentType::JSON)
            .status(self.status)
            .ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorV2 {
    pub code: ApiExceptionType,
    pub message: String,
    pub error: bool
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiExceptionType {
    InternalServerError,
    StorageUnavailable,
    ValidationError,
    InvalidScore,
    ScoreAlreadyRecorded,
    ConcurrentModification,
    SeriesMissing,
    MatchMissing,
    ScorecardMissing,
    ResourceMissing
}
