use serde::Serialize;
use rocket::{response::{self, Response, Responder}, Request, http::{Status, ContentType, Header}, serde::json::Json};

pub struct JsonResponder<T> {
    pub response: T,
    pub status: Status,
    pub location: Option<String>
}

impl<T: Serialize> JsonResponder<T> {
    /// 201 with a `Location` header pointing at the new resource.
    pub fn created(data: T, location: String) -> Self {
        Self { response: data, status: Status::Created, location: Some(location) }
    }

    pub fn ok(data: T) -> Self {
        JsonResponder::from(data, Status::Ok)
    }

    pub fn from(data: T, status: Status) -> Self {
        Self { response: data, status, location: None }
    }
}

impl<'r, T: Serialize> Responder<'r, 'static> for JsonResponder<T> {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let data = Json(self.response);
        let mut builder = Response::build_from(data.respond_to(req)?);
        builder.header(ContentType::JSON).status(self.status);
        if let Some(location) = self.location {
            builder.header(Header::new("Location", location));
        };
        builder.ok()
    }
}
