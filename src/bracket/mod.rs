pub mod engine;
pub mod error;
pub mod service;
pub mod views;

pub use error::{BracketError, BracketResult};
pub use service::{BracketService, NewSeries};
