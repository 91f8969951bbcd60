//! Password hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant; cost parameters come from
//! configuration so deployments can tune them without a rebuild.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, Version,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur while hashing a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The configured cost parameters are outside Argon2's accepted range.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    HashError(String),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of iterations.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Hashes a password using Argon2id with the given cost parameters.
///
/// Every call draws a fresh random salt, so hashing the same password
/// twice yields different PHC strings.
///
/// # Errors
///
/// Returns `PasswordError::InvalidParams` if the cost parameters are
/// rejected by Argon2, or `PasswordError::HashError` if hashing fails.
///
/// # Example
///
/// ```
/// use finboard_core::auth::{HashParams, hash_password};
///
/// let hash = hash_password("my_secure_password", HashParams::default()).unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str, params: HashParams) -> Result<String, PasswordError> {
    let cost = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, cost);
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash string.
///
/// The verifier reads the algorithm and cost parameters out of the hash
/// itself. Returns `false` for a wrong password and also for a stored
/// value that is not a readable hash; login treats both as a credential
/// mismatch rather than an error.
///
/// # Example
///
/// ```
/// use finboard_core::auth::{HashParams, hash_password, verify_password};
///
/// let hash = hash_password("my_password", HashParams::default()).unwrap();
/// assert!(verify_password("my_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// ```
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
