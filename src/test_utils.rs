//! Shared test utilities for the CB Plumbing ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        customer, invoice, job, job_item,
        forms::{CustomerForm, InvoiceForm, JobForm, JobItemForm, Registration},
        user,
    },
    entities::{self, JobPriority, JobType},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Lowest bcrypt cost the library accepts, so hashing in tests stays fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Password used by [`test_registration`].
pub const TEST_PASSWORD: &str = "pipes-and-fittings";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A valid customer form.
///
/// # Defaults
/// * `first_name`: "Sam"
/// * `postal_code`: "N1 1AA"
/// * `email`: derived from the last name
#[must_use]
pub fn test_customer_form(last_name: &str) -> CustomerForm {
    CustomerForm {
        first_name: "Sam".to_string(),
        last_name: last_name.to_string(),
        phone: "020 7946 0000".to_string(),
        email: format!("{}@example.com", last_name.to_lowercase()),
        first_line_address: "12 Mill Lane".to_string(),
        second_line_address: None,
        city: "London".to_string(),
        county: "Greater London".to_string(),
        postal_code: "N1 1AA".to_string(),
        referral: None,
    }
}

/// Creates an active test customer.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    last_name: &str,
) -> Result<entities::customer::Model> {
    customer::create_customer(db, test_customer_form(last_name)).await
}

/// Test database with one customer already in it.
pub async fn setup_with_customer() -> Result<(DatabaseConnection, entities::customer::Model)> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db, "Smith").await?;
    Ok((db, customer))
}

/// A valid job form: a medium-priority service call with no planned date.
#[must_use]
pub fn test_job_form(customer_id: i64) -> JobForm {
    JobForm {
        customer_id,
        job_type: JobType::Service,
        description: "Annual boiler service".to_string(),
        notes: None,
        priority: JobPriority::Medium,
        planned_date: None,
    }
}

/// Opens a test job for a customer.
pub async fn create_test_job(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<entities::job::Model> {
    job::create_job(db, test_job_form(customer_id)).await
}

/// Test database with one customer and one open job.
pub async fn setup_with_job() -> Result<(
    DatabaseConnection,
    entities::customer::Model,
    entities::job::Model,
)> {
    let (db, customer) = setup_with_customer().await?;
    let job = create_test_job(&db, customer.id).await?;
    Ok((db, customer, job))
}

/// Item form for `job_id` with no description.
#[must_use]
pub fn test_item_form(job_id: i64, name: &str, quantity: f64, unit_cost: f64) -> JobItemForm {
    JobItemForm {
        job_id,
        name: name.to_string(),
        description: None,
        quantity,
        unit_cost,
    }
}

/// Adds a line item named "Part" to a job.
pub async fn add_test_item(
    db: &DatabaseConnection,
    job_id: i64,
    quantity: f64,
    unit_cost: f64,
) -> Result<entities::job_item::Model> {
    job_item::add_job_item(db, test_item_form(job_id, "Part", quantity, unit_cost)).await
}

/// Issues an invoice for a job, due on 2024-05-01.
pub async fn issue_test_invoice(
    db: &DatabaseConnection,
    job_id: i64,
) -> Result<entities::invoice::Model> {
    let due_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default();
    invoice::issue_invoice(
        db,
        InvoiceForm {
            job_id,
            due_date,
            notes: None,
        },
    )
    .await
}

/// A valid registration with [`TEST_PASSWORD`] and an email derived from the username.
#[must_use]
pub fn test_registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: TEST_PASSWORD.to_string(),
        password_confirmation: TEST_PASSWORD.to_string(),
    }
}

/// Registers a test user at [`TEST_BCRYPT_COST`].
pub async fn register_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    user::register_user(db, test_registration(username), TEST_BCRYPT_COST).await
}
