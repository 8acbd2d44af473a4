pub mod hashing;
pub mod repositories;
pub mod tokens;

pub use hashing::BlockingHasher;
pub use repositories::SqliteStorage;
pub use tokens::JwtTokenIssuer;
