pub mod builder;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod food;
pub mod logging;
pub mod nutrition_csv;

pub use builder::{build_database, BuildSummary};
pub use error::BuildError;
