pub mod app;
pub mod sqlite;
pub mod user;

pub use sqlite::SqliteStorage;
