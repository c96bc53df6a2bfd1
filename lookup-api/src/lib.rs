pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod lookup;
pub mod query;

pub use database::Database;
pub use error::LookupError;
