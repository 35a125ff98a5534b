//! Authentication

mod errors;
pub mod password;
mod service;
mod token;

pub use errors::*;
pub use service::*;
pub use token::*;
