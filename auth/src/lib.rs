//! Authentication primitives for the account service
//!
//! - Password hashing (Argon2id, salted, tunable work factor)
//! - Access token issuance and validation (HS256 JWT)
//! - Immutable settings shared by both
//!
//! The service owns persistence and HTTP; this crate owns the cryptography.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashCost::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Complete Flow
//! ```
//! use auth::{AuthSettings, Authenticator, HashCost};
//! use chrono::Duration;
//!
//! let settings = AuthSettings::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(30),
//!     HashCost::default(),
//! )
//! .unwrap();
//! let auth = Authenticator::new(&settings).unwrap();
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! assert!(auth.verify_password("password123", &hash));
//! let token = auth.issue_token("user@example.com").unwrap();
//!
//! // Protected request: validate token
//! assert_eq!(auth.validate_token(&token).unwrap(), "user@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use settings::AuthSettings;
pub use settings::HashCost;
pub use settings::SettingsError;
