//! Library

mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::LibraryServiceError;
pub use service::*;
