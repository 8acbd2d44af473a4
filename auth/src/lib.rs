//! Authentication utilities library
//!
//! Provides the transport-free primitives the SSO service is built on:
//! - Password hashing (Argon2id, tunable cost)
//! - Session token claims and HS256 signing
//!
//! The service defines its own ports and adapts these implementations behind
//! them, so this crate has no knowledge of users, applications or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(HashingCost::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, SessionClaims};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"per_application_secret").unwrap();
//! let claims =
//!     SessionClaims::new(1, "alice@example.com", 7, Utc::now(), Duration::hours(1)).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded: SessionClaims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.app_id, 7);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
