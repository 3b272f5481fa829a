//! Repository tests against a real PostgreSQL database.
//!
//! These need `DATABASE_URL`; run them with `cargo test -- --ignored`.

use billy_core::plan::{Frequency, PlanType};
use billy_db::models::company::CreateCompany;
use billy_db::models::page::PageRequest;
use billy_db::models::plan::CreatePlan;
use billy_db::repositories::{CompanyRepo, PlanRepo};
use billy_db::{BillingStore, PgStore, UnitOfWork};
use sqlx::PgPool;

fn acme() -> CreateCompany {
    CreateCompany {
        name: "acme".to_string(),
        api_key_hash: "0f1e2d3c".to_string(),
        api_key_prefix: "abcdefgh".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn plan_round_trips_enums_and_interval(pool: PgPool) {
    let company = CompanyRepo::create(&pool, &acme()).await.unwrap();
    let input = CreatePlan {
        company_guid: company.guid.clone(),
        plan_type: PlanType::Payout,
        amount: 2500,
        frequency: Frequency::Yearly,
        interval: 3,
    };

    let created = PlanRepo::create(&pool, &input).await.unwrap();
    let found = PlanRepo::find_by_guid(&pool, &created.guid)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.plan_type, PlanType::Payout);
    assert_eq!(found.frequency, Frequency::Yearly);
    assert_eq!(found.interval, 3);
    assert_eq!(found.amount, 2500);
    assert!(!found.deleted);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn soft_delete_only_succeeds_once(pool: PgPool) {
    let company = CompanyRepo::create(&pool, &acme()).await.unwrap();
    let plan = PlanRepo::create(
        &pool,
        &CreatePlan {
            company_guid: company.guid,
            plan_type: PlanType::Charge,
            amount: 1000,
            frequency: Frequency::Monthly,
            interval: 1,
        },
    )
    .await
    .unwrap();

    let first = PlanRepo::soft_delete(&pool, &plan.guid).await.unwrap();
    assert!(first.unwrap().deleted);

    let second = PlanRepo::soft_delete(&pool, &plan.guid).await.unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn uncommitted_unit_of_work_leaves_no_rows(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    {
        let mut uow = store.begin().await.unwrap();
        uow.create_company(&acme()).await.unwrap();
    }

    let found = store.find_company_by_api_key_hash("0f1e2d3c").await.unwrap();
    assert!(found.is_none());

    let mut uow = store.begin().await.unwrap();
    let company = uow.create_company(&acme()).await.unwrap();
    uow.commit().await.unwrap();

    let page = store
        .list_plans(&company.guid, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(store
        .find_company_by_api_key_hash("0f1e2d3c")
        .await
        .unwrap()
        .is_some());
}
