//! Persistence seam used by the HTTP handlers.
//!
//! [`BillingStore`] is the read side plus the entry point to a
//! [`UnitOfWork`]; every mutation goes through a unit of work so that it is
//! committed atomically or not at all. Dropping a unit of work without
//! calling [`UnitOfWork::commit`] rolls it back.

use async_trait::async_trait;
use billy_core::error::CoreError;

use crate::error::{StoreError, StoreResult};
use crate::models::company::{Company, CreateCompany};
use crate::models::customer::Customer;
use crate::models::page::{Page, PageRequest};
use crate::models::plan::{CreatePlan, Plan};
use crate::models::subscription::Subscription;
use crate::models::transaction::Transaction;

/// The parent entity a listing is scoped to.
#[derive(Debug, Clone, Copy)]
pub enum Ancestor<'a> {
    Company(&'a Company),
    Plan(&'a Plan),
}

impl Ancestor<'_> {
    pub fn entity(&self) -> &'static str {
        match self {
            Ancestor::Company(_) => "Company",
            Ancestor::Plan(_) => "Plan",
        }
    }

    pub fn guid(&self) -> &str {
        match self {
            Ancestor::Company(company) => &company.guid,
            Ancestor::Plan(plan) => &plan.guid,
        }
    }
}

#[async_trait]
pub trait BillingStore: Send + Sync {
    /// Cheap liveness probe of the backend.
    async fn health_check(&self) -> StoreResult<()>;

    /// Resolve an API key digest to a company, deleted or not.
    async fn find_company_by_api_key_hash(&self, hash: &str) -> StoreResult<Option<Company>>;

    /// Find a plan by guid, including soft-deleted plans.
    async fn find_plan(&self, guid: &str) -> StoreResult<Option<Plan>>;

    /// Plans owned by a company, newest first.
    async fn list_plans(&self, company_guid: &str, page: PageRequest) -> StoreResult<Page<Plan>>;

    async fn list_customers(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Customer>>;

    async fn list_subscriptions(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Subscription>>;

    async fn list_transactions(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Transaction>>;

    /// Open a new unit of work.
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>>;
}

/// A scoped transaction. Commit on success; drop to roll back.
#[async_trait]
pub trait UnitOfWork: Send {
    async fn create_company(&mut self, input: &CreateCompany) -> StoreResult<Company>;

    async fn create_plan(&mut self, input: &CreatePlan) -> StoreResult<Plan>;

    /// Soft-delete a plan if and only if it is not already deleted.
    ///
    /// Returns `None` when the plan does not exist or was already deleted,
    /// so two concurrent deletes can never both succeed.
    async fn delete_plan(&mut self, guid: &str) -> StoreResult<Option<Plan>>;

    /// Make every change in this unit of work durable.
    async fn commit(&mut self) -> StoreResult<()>;
}

pub(crate) fn finished_error() -> StoreError {
    StoreError::Core(CoreError::Internal(
        "unit of work used after commit".into(),
    ))
}

/// Entities that can be listed under an [`Ancestor`].
#[async_trait]
pub trait ListByAncestor: Sized + Send {
    /// Entity name used in logs and error messages.
    const ENTITY: &'static str;

    async fn list_by_ancestor(
        store: &dyn BillingStore,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Self>>;
}

/// List `T` entities belonging to `ancestor`.
pub async fn list_by_ancestor<T: ListByAncestor>(
    store: &dyn BillingStore,
    ancestor: Ancestor<'_>,
    page: PageRequest,
) -> StoreResult<Page<T>> {
    tracing::debug!(
        entity = T::ENTITY,
        ancestor = ancestor.entity(),
        ancestor_guid = ancestor.guid(),
        offset = page.offset,
        limit = page.limit,
        "Listing by ancestor",
    );
    T::list_by_ancestor(store, ancestor, page).await
}

#[async_trait]
impl ListByAncestor for Plan {
    const ENTITY: &'static str = "Plan";

    async fn list_by_ancestor(
        store: &dyn BillingStore,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Self>> {
        match ancestor {
            Ancestor::Company(company) => store.list_plans(&company.guid, page).await,
            Ancestor::Plan(_) => Err(StoreError::Core(CoreError::Internal(
                "plans cannot be listed under a plan".into(),
            ))),
        }
    }
}

#[async_trait]
impl ListByAncestor for Customer {
    const ENTITY: &'static str = "Customer";

    async fn list_by_ancestor(
        store: &dyn BillingStore,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Self>> {
        store.list_customers(ancestor, page).await
    }
}

#[async_trait]
impl ListByAncestor for Subscription {
    const ENTITY: &'static str = "Subscription";

    async fn list_by_ancestor(
        store: &dyn BillingStore,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Self>> {
        store.list_subscriptions(ancestor, page).await
    }
}

#[async_trait]
impl ListByAncestor for Transaction {
    const ENTITY: &'static str = "Transaction";

    async fn list_by_ancestor(
        store: &dyn BillingStore,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Self>> {
        store.list_transactions(ancestor, page).await
    }
}
