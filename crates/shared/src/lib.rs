//! Shared types, tokens, and configuration for Finboard.
//!
//! This crate provides common pieces used across all other crates:
//! - Token claims and the JWT service
//! - Pagination types for list endpoints
//! - Auth request/response types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
