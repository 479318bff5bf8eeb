//! Domain models for the payment intake backend.

pub mod company;
pub mod payment;
pub mod redirect;

pub use company::{CompanyPatch, CompanyProfile, NewCompanyProfile, DEFAULT_COMPANY_NAME};
pub use payment::{
    NewPayment, Payment, PaymentFilter, PaymentPage, PaymentStatus, SavePaymentRequest,
    UpdatePaymentStatusRequest,
};
pub use redirect::{NewRedirectConfig, RedirectConfig, UpdateRedirectRequest, DEFAULT_REDIRECT_URL};

/// A record that accepts partial updates.
///
/// `merge_patch` overwrites only the fields that the patch carries with a
/// non-empty value and reports whether anything changed.
pub trait MergePatch {
    type Patch: Send + Sync;

    fn merge_patch(&mut self, patch: &Self::Patch) -> bool;
}
