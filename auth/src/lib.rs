//! Authentication primitives library
//!
//! Provides the credential and token building blocks used by the SSO service:
//! - Password hashing (Argon2id with an explicit cost)
//! - JWT encoding and decoding (HS256)
//! - Token issuance keyed by a per-application secret
//!
//! Nothing here performs I/O; the service wires these into its own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(HashingCost {
//!     memory_kib: 1024,
//!     iterations: 1,
//!     parallelism: 1,
//! })
//! .unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Application-scoped Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(Duration::hours(1));
//! let token = issuer.issue(1, "user@example.com", 7, b"app-7-secret").unwrap();
//!
//! let claims = issuer.verify(&token, b"app-7-secret").unwrap();
//! assert_eq!(claims.app_id, 7);
//! assert!(issuer.verify(&token, b"app-8-secret").is_err());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenIssuer;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
