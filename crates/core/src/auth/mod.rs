//! Authentication building blocks.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Credential policy checks for signup and login

mod password;
mod policy;

pub use password::{HashParams, PasswordError, hash_password, verify_password};
pub use policy::{MIN_PASSWORD_CHARS, email_is_valid, password_meets_policy};
