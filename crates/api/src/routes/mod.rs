//! HTTP route handlers.

pub mod company;
pub mod health;
pub mod payments;
pub mod redirect;
