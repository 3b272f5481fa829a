//! PostgreSQL-backed [`BillingStore`].

use async_trait::async_trait;
use sqlx::{PgConnection, Postgres};

use crate::error::StoreResult;
use crate::models::company::{Company, CreateCompany};
use crate::models::customer::Customer;
use crate::models::page::{Page, PageRequest};
use crate::models::plan::{CreatePlan, Plan};
use crate::models::subscription::Subscription;
use crate::models::transaction::Transaction;
use crate::repositories::{
    CompanyRepo, CustomerRepo, PlanRepo, SubscriptionRepo, TransactionRepo,
};
use crate::store::{finished_error, Ancestor, BillingStore, UnitOfWork};
use crate::DbPool;

/// Store backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl BillingStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_company_by_api_key_hash(&self, hash: &str) -> StoreResult<Option<Company>> {
        Ok(CompanyRepo::find_by_api_key_hash(&self.pool, hash).await?)
    }

    async fn find_plan(&self, guid: &str) -> StoreResult<Option<Plan>> {
        Ok(PlanRepo::find_by_guid(&self.pool, guid).await?)
    }

    async fn list_plans(&self, company_guid: &str, page: PageRequest) -> StoreResult<Page<Plan>> {
        let items = PlanRepo::list_by_company(&self.pool, company_guid, page).await?;
        let total = PlanRepo::count_by_company(&self.pool, company_guid).await?;
        Ok(Page::new(items, page, total))
    }

    async fn list_customers(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Customer>> {
        let items = CustomerRepo::list_by_ancestor(&self.pool, ancestor, page).await?;
        let total = CustomerRepo::count_by_ancestor(&self.pool, ancestor).await?;
        Ok(Page::new(items, page, total))
    }

    async fn list_subscriptions(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Subscription>> {
        let items = SubscriptionRepo::list_by_ancestor(&self.pool, ancestor, page).await?;
        let total = SubscriptionRepo::count_by_ancestor(&self.pool, ancestor).await?;
        Ok(Page::new(items, page, total))
    }

    async fn list_transactions(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Transaction>> {
        let items = TransactionRepo::list_by_ancestor(&self.pool, ancestor, page).await?;
        let total = TransactionRepo::count_by_ancestor(&self.pool, ancestor).await?;
        Ok(Page::new(items, page, total))
    }

    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx: Some(tx) }))
    }
}

/// A unit of work wrapping one database transaction.
///
/// sqlx rolls the transaction back when it is dropped uncommitted.
pub struct PgUnitOfWork {
    tx: Option<sqlx::Transaction<'static, Postgres>>,
}

impl PgUnitOfWork {
    fn conn(&mut self) -> StoreResult<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or_else(finished_error)
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn create_company(&mut self, input: &CreateCompany) -> StoreResult<Company> {
        Ok(CompanyRepo::create(self.conn()?, input).await?)
    }

    async fn create_plan(&mut self, input: &CreatePlan) -> StoreResult<Plan> {
        Ok(PlanRepo::create(self.conn()?, input).await?)
    }

    async fn delete_plan(&mut self, guid: &str) -> StoreResult<Option<Plan>> {
        Ok(PlanRepo::soft_delete(self.conn()?, guid).await?)
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let tx = self.tx.take().ok_or_else(finished_error)?;
        tx.commit().await?;
        Ok(())
    }
}
