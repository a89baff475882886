use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Version;

use super::errors::PasswordError;
use crate::settings::HashCost;

/// Input hashed once at construction so unknown-account logins can pay the
/// same verification cost as real ones.
const DUMMY_PASSWORD: &str = "placeholder-password-for-timing";

/// Password hashing implementation.
///
/// Argon2id with a random salt per hash; the salt and parameters travel inside
/// the PHC string so verification needs nothing but the stored hash.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// # Arguments
    /// * `cost` - Argon2id memory, iteration and parallelism parameters
    ///
    /// # Errors
    /// * `HashingFailed` - Parameters rejected or the warm-up hash failed
    pub fn new(cost: HashCost) -> Result<Self, PasswordError> {
        let params = cost
            .to_params()
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, DUMMY_PASSWORD)?;

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns false for a mismatch and for a stored hash that cannot be parsed.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification whose result is discarded.
    pub fn burn(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}

fn hash_with(argon2: &Argon2<'static>, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}
