//! Customer business logic - the customer registry.
//!
//! Customers are created and edited from a validated [`CustomerForm`]. Deleting a customer
//! only clears its `is_active` flag; the row and its jobs stay in place.

use crate::{
    core::forms::CustomerForm,
    entities::{Customer, customer},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use tracing::{info, instrument};
use validator::Validate;

/// Retrieves all active customers, ordered by last then first name.
pub async fn list_active_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .filter(customer::Column::IsActive.eq(true))
        .order_by_asc(customer::Column::LastName)
        .order_by_asc(customer::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every customer, inactive ones included, ordered by last then first name.
pub async fn list_all_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .order_by_asc(customer::Column::LastName)
        .order_by_asc(customer::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a customer by ID, active or not.
pub async fn get_customer_by_id<C>(db: &C, customer_id: i64) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Searches active customers whose name, phone or postal code contains `partial`.
pub async fn search_customers(
    db: &DatabaseConnection,
    partial: &str,
) -> Result<Vec<customer::Model>> {
    let partial = partial.trim();
    Customer::find()
        .filter(customer::Column::IsActive.eq(true))
        .filter(
            Condition::any()
                .add(customer::Column::FirstName.contains(partial))
                .add(customer::Column::LastName.contains(partial))
                .add(customer::Column::Phone.contains(partial))
                .add(customer::Column::PostalCode.contains(partial)),
        )
        .order_by_asc(customer::Column::LastName)
        .order_by_asc(customer::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a new active customer.
///
/// # Errors
/// Returns `Error::Validation` if a required field is blank or the email is malformed.
#[instrument(skip(db, form), fields(last_name = %form.last_name))]
pub async fn create_customer(
    db: &DatabaseConnection,
    form: CustomerForm,
) -> Result<customer::Model> {
    let form = form.normalized();
    form.validate()?;

    let now = chrono::Utc::now().naive_utc();
    let customer = customer::ActiveModel {
        first_name: Set(form.first_name),
        last_name: Set(form.last_name),
        phone: Set(form.phone),
        email: Set(form.email),
        first_line_address: Set(form.first_line_address),
        second_line_address: Set(form.second_line_address),
        city: Set(form.city),
        county: Set(form.county),
        postal_code: Set(form.postal_code),
        referral: Set(form.referral),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = customer.insert(db).await?;
    info!(customer_id = created.id, "Customer added");
    Ok(created)
}

/// Replaces a customer's details with the contents of `form`.
///
/// # Errors
/// Returns `Error::CustomerNotFound` for an unknown ID and `Error::Validation` for bad input.
#[instrument(skip(db, form))]
pub async fn update_customer(
    db: &DatabaseConnection,
    customer_id: i64,
    form: CustomerForm,
) -> Result<customer::Model> {
    let form = form.normalized();
    form.validate()?;

    let existing = get_customer_by_id(db, customer_id)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?;

    let mut active_model: customer::ActiveModel = existing.into();
    active_model.first_name = Set(form.first_name);
    active_model.last_name = Set(form.last_name);
    active_model.phone = Set(form.phone);
    active_model.email = Set(form.email);
    active_model.first_line_address = Set(form.first_line_address);
    active_model.second_line_address = Set(form.second_line_address);
    active_model.city = Set(form.city);
    active_model.county = Set(form.county);
    active_model.postal_code = Set(form.postal_code);
    active_model.referral = Set(form.referral);
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    active_model.update(db).await.map_err(Into::into)
}

async fn set_active(
    db: &DatabaseConnection,
    customer_id: i64,
    is_active: bool,
) -> Result<customer::Model> {
    let existing = get_customer_by_id(db, customer_id)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?;

    if existing.is_active == is_active {
        return Ok(existing);
    }

    let mut active_model: customer::ActiveModel = existing.into();
    active_model.is_active = Set(is_active);
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = active_model.update(db).await?;

    info!(customer_id, is_active, "Customer active flag changed");
    Ok(updated)
}

/// Soft-deletes a customer: the row stays, but it leaves the active listing.
///
/// # Errors
/// Returns `Error::CustomerNotFound` for an unknown ID.
pub async fn deactivate_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<customer::Model> {
    set_active(db, customer_id, false).await
}

/// Brings a soft-deleted customer back into the active listing.
///
/// # Errors
/// Returns `Error::CustomerNotFound` for an unknown ID.
pub async fn reactivate_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<customer::Model> {
    set_active(db, customer_id, true).await
}
