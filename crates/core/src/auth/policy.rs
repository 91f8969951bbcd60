//! Credential policy shared by signup and login.

use validator::ValidateEmail;

/// Minimum password length in characters (not bytes).
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Returns true if `email` has a plausible mailbox format.
///
/// Callers are expected to trim surrounding whitespace first.
#[must_use]
pub fn email_is_valid(email: &str) -> bool {
    email.validate_email()
}

/// Returns true if `password` satisfies the minimum-length policy.
#[must_use]
pub fn password_meets_policy(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}
