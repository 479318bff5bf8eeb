//! Paginated payment listing.

use shared::pagination::{PageInfo, PageRequest};

use crate::error::StoreError;
use crate::models::{PaymentFilter, PaymentPage};

use super::store::PaymentStore;

/// Lists one page of payments, newest first, with the total number of
/// payments matching `filter` regardless of pagination.
pub async fn list_payments<S>(
    store: &S,
    filter: &PaymentFilter,
    page: PageRequest,
) -> Result<PaymentPage, StoreError>
where
    S: PaymentStore + ?Sized,
{
    let records = store.find(filter, page.skip(), page.limit).await?;
    let total = store.count(filter).await?;

    Ok(PaymentPage {
        records,
        info: PageInfo::new(total, &page),
    })
}
