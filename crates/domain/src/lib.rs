//! Domain layer for the payment intake backend.
//!
//! This crate contains:
//! - Domain models (CompanyProfile, RedirectConfig, Payment)
//! - Store traits implemented by the persistence layer
//! - Business logic services (singletons, active redirect, payment lifecycle)
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::{ServiceError, StoreError};
