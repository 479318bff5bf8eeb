//! Database entity definitions.
//!
//! These structs map directly to database tables using SQLx's FromRow derive.

pub mod company;
pub mod payment;
pub mod redirect_config;

pub use company::CompanyProfileEntity;
pub use payment::PaymentEntity;
pub use redirect_config::RedirectConfigEntity;
