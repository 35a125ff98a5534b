//! Games

mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::GamesServiceError;
pub use service::*;
