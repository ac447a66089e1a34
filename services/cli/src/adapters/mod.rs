pub mod fs;

pub use fs::JsonFileAdapter;
