//! Argon2id password hashing.

mod errors;
mod hasher;

pub use self::errors::PasswordError;
pub use self::hasher::PasswordHasher;
