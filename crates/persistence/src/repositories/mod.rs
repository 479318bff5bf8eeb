//! Repository implementations for database operations.
//!
//! Each repository implements the matching store trait from the domain crate
//! over a PostgreSQL pool.

pub mod company;
pub mod payment;
pub mod redirect_config;

pub use company::CompanyRepository;
pub use payment::PaymentRepository;
pub use redirect_config::RedirectConfigRepository;
