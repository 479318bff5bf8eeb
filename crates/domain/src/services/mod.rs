//! Domain services for the payment intake backend.
//!
//! Services contain business logic that operates on domain models through
//! the store traits in [`store`].

pub mod company;
pub mod listing;
pub mod notification;
pub mod payment;
pub mod redirect;
pub mod singleton;
pub mod store;

pub use company::CompanyService;
pub use listing::list_payments;
pub use notification::{
    dispatch_new_payment, MockPaymentNotifier, NewPaymentMessage, NotificationError,
    PaymentNotifier,
};
pub use payment::PaymentService;
pub use redirect::RedirectService;
pub use singleton::{apply_partial_update, get_or_create_default};
pub use store::{CompanyStore, PaymentStore, RedirectStore, SingletonStore, UpdateById};
