use std::fmt;

use chrono::Duration;
use thiserror::Error;

/// Secrets shorter than this are refused (HS256 wants at least 256 bits).
pub const MIN_SECRET_LENGTH: usize = 32;

/// Placeholder secrets that ship in sample configs and must never sign real tokens.
const KNOWN_INSECURE_SECRETS: &[&str] = &["default-secret-key", "secret", "changeme"];

/// Error for invalid authentication settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Signing secret is a known placeholder value")]
    InsecureSecret,

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token lifetime must be positive")]
    NonPositiveTtl,

    #[error("Invalid password hashing cost: {0}")]
    InvalidHashCost(String),
}

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashCost {
    /// Build the argon2 parameter set for this cost.
    ///
    /// # Errors
    /// * `InvalidHashCost` - A parameter is outside the ranges argon2 accepts
    pub fn to_params(&self) -> Result<argon2::Params, SettingsError> {
        argon2::Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| SettingsError::InvalidHashCost(e.to_string()))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// Process-wide authentication settings.
///
/// Built once at startup and shared read-only by the password hasher and the
/// token codec. Construction validates the secret so a misconfigured deployment
/// fails before serving traffic.
#[derive(Clone)]
pub struct AuthSettings {
    secret: Vec<u8>,
    token_ttl: Duration,
    hash_cost: HashCost,
}

impl AuthSettings {
    /// Validate and build settings.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `token_ttl` - Lifetime of every issued token
    /// * `hash_cost` - Argon2id work factor
    ///
    /// # Errors
    /// * `EmptySecret` / `InsecureSecret` / `SecretTooShort` - Secret is unusable
    /// * `NonPositiveTtl` - Lifetime is zero or negative
    /// * `InvalidHashCost` - Work factor rejected by argon2
    pub fn new(
        secret: impl Into<Vec<u8>>,
        token_ttl: Duration,
        hash_cost: HashCost,
    ) -> Result<Self, SettingsError> {
        let secret = secret.into();

        if secret.is_empty() {
            return Err(SettingsError::EmptySecret);
        }
        if KNOWN_INSECURE_SECRETS
            .iter()
            .any(|known| known.as_bytes() == secret.as_slice())
        {
            return Err(SettingsError::InsecureSecret);
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(SettingsError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }
        if token_ttl <= Duration::zero() {
            return Err(SettingsError::NonPositiveTtl);
        }
        hash_cost.to_params()?;

        Ok(Self {
            secret,
            token_ttl,
            hash_cost,
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn hash_cost(&self) -> HashCost {
        self.hash_cost
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}
