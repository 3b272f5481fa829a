//! In-process [`BillingStore`] for tests and database-less local runs.
//!
//! All data lives behind one async mutex. A [`MemoryUnitOfWork`] holds that
//! mutex for its whole lifetime and edits a private copy, which replaces the
//! shared data on commit. Units of work are therefore fully serialized, and
//! dropping one uncommitted discards its copy.

use std::sync::Arc;

use async_trait::async_trait;
use billy_core::error::CoreError;
use billy_core::guid::{
    make_guid, COMPANY_PREFIX, CUSTOMER_PREFIX, PLAN_PREFIX, SUBSCRIPTION_PREFIX,
    TRANSACTION_PREFIX,
};
use billy_core::transaction::{TransactionStatus, TransactionType};
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::StoreResult;
use crate::models::company::{Company, CreateCompany};
use crate::models::customer::Customer;
use crate::models::page::{Page, PageRequest};
use crate::models::plan::{CreatePlan, Plan};
use crate::models::subscription::Subscription;
use crate::models::transaction::Transaction;
use crate::store::{finished_error, Ancestor, BillingStore, UnitOfWork};

/// Rows in insertion order. Listings walk them newest first.
#[derive(Debug, Clone, Default)]
struct MemoryData {
    companies: Vec<Company>,
    plans: Vec<Plan>,
    customers: Vec<Customer>,
    subscriptions: Vec<Subscription>,
    transactions: Vec<Transaction>,
}

impl MemoryData {
    fn plan_guids_of_company(&self, company_guid: &str) -> Vec<&str> {
        self.plans
            .iter()
            .filter(|p| p.company_guid == company_guid)
            .map(|p| p.guid.as_str())
            .collect()
    }

    fn subscription_in_scope(&self, subscription: &Subscription, ancestor: Ancestor<'_>) -> bool {
        match ancestor {
            Ancestor::Plan(plan) => subscription.plan_guid == plan.guid,
            Ancestor::Company(company) => self
                .plan_guids_of_company(&company.guid)
                .contains(&subscription.plan_guid.as_str()),
        }
    }

    fn subscriptions_in_scope(&self, ancestor: Ancestor<'_>) -> Vec<&Subscription> {
        self.subscriptions
            .iter()
            .rev()
            .filter(|s| self.subscription_in_scope(s, ancestor))
            .collect()
    }
}

fn paginate<T: Clone>(matching: Vec<&T>, page: PageRequest) -> Page<T> {
    let total = matching.len() as i64;
    let items = matching
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .cloned()
        .collect();
    Page::new(items, page, total)
}

/// Shared, cloneable in-memory store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<MemoryData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a customer directly, bypassing any unit of work.
    pub async fn seed_customer(&self, company_guid: &str, external_id: Option<&str>) -> Customer {
        let now = Utc::now();
        let customer = Customer {
            guid: make_guid(CUSTOMER_PREFIX),
            company_guid: company_guid.to_string(),
            external_id: external_id.map(str::to_string),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.data.lock().await.customers.push(customer.clone());
        customer
    }

    /// Enroll a customer in a plan, bypassing any unit of work.
    pub async fn seed_subscription(&self, plan_guid: &str, customer_guid: &str) -> Subscription {
        let now = Utc::now();
        let subscription = Subscription {
            guid: make_guid(SUBSCRIPTION_PREFIX),
            plan_guid: plan_guid.to_string(),
            customer_guid: customer_guid.to_string(),
            amount: None,
            started_at: now,
            next_transaction_at: now,
            period: 0,
            canceled: false,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        };
        self.data
            .lock()
            .await
            .subscriptions
            .push(subscription.clone());
        subscription
    }

    /// Schedule a transaction for a subscription, bypassing any unit of work.
    pub async fn seed_transaction(
        &self,
        subscription_guid: &str,
        transaction_type: TransactionType,
        amount: i64,
    ) -> Transaction {
        let now = Utc::now();
        let transaction = Transaction {
            guid: make_guid(TRANSACTION_PREFIX),
            subscription_guid: subscription_guid.to_string(),
            transaction_type,
            status: TransactionStatus::Init,
            amount,
            scheduled_at: now,
            failure_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.data
            .lock()
            .await
            .transactions
            .push(transaction.clone());
        transaction
    }

    /// Soft-delete a company, bypassing any unit of work.
    ///
    /// Returns `false` when no company has that guid.
    pub async fn delete_company(&self, company_guid: &str) -> bool {
        let mut data = self.data.lock().await;
        match data.companies.iter_mut().find(|c| c.guid == company_guid) {
            Some(company) => {
                company.deleted = true;
                company.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl BillingStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_company_by_api_key_hash(&self, hash: &str) -> StoreResult<Option<Company>> {
        let data = self.data.lock().await;
        Ok(data
            .companies
            .iter()
            .find(|c| c.api_key_hash == hash)
            .cloned())
    }

    async fn find_plan(&self, guid: &str) -> StoreResult<Option<Plan>> {
        let data = self.data.lock().await;
        Ok(data.plans.iter().find(|p| p.guid == guid).cloned())
    }

    async fn list_plans(&self, company_guid: &str, page: PageRequest) -> StoreResult<Page<Plan>> {
        let data = self.data.lock().await;
        let matching: Vec<&Plan> = data
            .plans
            .iter()
            .rev()
            .filter(|p| p.company_guid == company_guid)
            .collect();
        Ok(paginate(matching, page))
    }

    async fn list_customers(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Customer>> {
        let data = self.data.lock().await;
        let matching: Vec<&Customer> = match ancestor {
            Ancestor::Company(company) => data
                .customers
                .iter()
                .rev()
                .filter(|c| c.company_guid == company.guid)
                .collect(),
            Ancestor::Plan(_) => {
                let subscribed: Vec<&str> = data
                    .subscriptions_in_scope(ancestor)
                    .into_iter()
                    .map(|s| s.customer_guid.as_str())
                    .collect();
                data.customers
                    .iter()
                    .rev()
                    .filter(|c| subscribed.contains(&c.guid.as_str()))
                    .collect()
            }
        };
        Ok(paginate(matching, page))
    }

    async fn list_subscriptions(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Subscription>> {
        let data = self.data.lock().await;
        Ok(paginate(data.subscriptions_in_scope(ancestor), page))
    }

    async fn list_transactions(
        &self,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> StoreResult<Page<Transaction>> {
        let data = self.data.lock().await;
        let subscription_guids: Vec<&str> = data
            .subscriptions_in_scope(ancestor)
            .into_iter()
            .map(|s| s.guid.as_str())
            .collect();
        let matching: Vec<&Transaction> = data
            .transactions
            .iter()
            .rev()
            .filter(|t| subscription_guids.contains(&t.subscription_guid.as_str()))
            .collect();
        Ok(paginate(matching, page))
    }

    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let guard = Arc::clone(&self.data).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork {
            guard: Some(guard),
            working,
        }))
    }
}

/// Serialized unit of work over a [`MemoryStore`].
pub struct MemoryUnitOfWork {
    guard: Option<OwnedMutexGuard<MemoryData>>,
    working: MemoryData,
}

impl MemoryUnitOfWork {
    fn working(&mut self) -> StoreResult<&mut MemoryData> {
        if self.guard.is_none() {
            return Err(finished_error());
        }
        Ok(&mut self.working)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn create_company(&mut self, input: &CreateCompany) -> StoreResult<Company> {
        let data = self.working()?;
        if data
            .companies
            .iter()
            .any(|c| c.api_key_hash == input.api_key_hash)
        {
            return Err(CoreError::Conflict(
                "Duplicate value violates unique constraint: uq_companies_api_key_hash".into(),
            )
            .into());
        }
        let now = Utc::now();
        let company = Company {
            guid: make_guid(COMPANY_PREFIX),
            name: input.name.clone(),
            api_key_hash: input.api_key_hash.clone(),
            api_key_prefix: input.api_key_prefix.clone(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        data.companies.push(company.clone());
        Ok(company)
    }

    async fn create_plan(&mut self, input: &CreatePlan) -> StoreResult<Plan> {
        if input.amount < 1 || input.interval < 1 {
            return Err(CoreError::Validation(
                "amount and interval must be positive".into(),
            )
            .into());
        }
        let data = self.working()?;
        if !data.companies.iter().any(|c| c.guid == input.company_guid) {
            return Err(CoreError::NotFound {
                entity: "Company",
                id: input.company_guid.clone(),
            }
            .into());
        }
        let now = Utc::now();
        let plan = Plan {
            guid: make_guid(PLAN_PREFIX),
            company_guid: input.company_guid.clone(),
            plan_type: input.plan_type,
            amount: input.amount,
            frequency: input.frequency,
            interval: input.interval,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        data.plans.push(plan.clone());
        Ok(plan)
    }

    async fn delete_plan(&mut self, guid: &str) -> StoreResult<Option<Plan>> {
        let data = self.working()?;
        let Some(plan) = data.plans.iter_mut().find(|p| p.guid == guid && !p.deleted) else {
            return Ok(None);
        };
        plan.deleted = true;
        plan.updated_at = Utc::now();
        Ok(Some(plan.clone()))
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let mut guard = self.guard.take().ok_or_else(finished_error)?;
        *guard = std::mem::take(&mut self.working);
        Ok(())
    }
}
