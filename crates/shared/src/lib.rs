//! Shared utilities and common types for the payment intake backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Page/limit pagination arithmetic
//! - Common validation and normalization helpers
//! - Lenient scalar-to-text deserialization for request bodies

pub mod pagination;
pub mod string_or_scalar;
pub mod validation;
