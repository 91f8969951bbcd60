//! Core credential logic for Finboard.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `auth` - Password hashing and credential policy

pub mod auth;
