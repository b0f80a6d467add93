pub mod error;
pub mod file;
pub mod responder;
pub mod time;
