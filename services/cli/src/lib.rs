pub mod adapters;
pub mod config;
pub mod error;

pub use adapters::JsonFileAdapter;
pub use config::Config;
pub use error::CliError;
