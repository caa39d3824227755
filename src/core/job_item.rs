//! Job item business logic - billable lines on a job.
//!
//! Lines can be added, edited and removed while their job is Open or In Progress. Once a
//! job is Complete or Cancelled its lines are frozen, which keeps an issued invoice's total
//! stable after the work is signed off.

use crate::{
    core::{
        costing,
        forms::{JobItemForm, JobItemUpdate},
        job::get_job_by_id,
    },
    entities::{JobItem, job, job_item},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};
use validator::Validate;

/// Quantities and unit costs must be real, non-negative numbers. Zero is allowed.
fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Finite inputs can still multiply past `f64::MAX`; such a line would poison every total.
fn check_line_total(quantity: f64, unit_cost: f64) -> Result<()> {
    let total = costing::line_total(quantity, unit_cost);
    if !total.is_finite() {
        return Err(Error::InvalidAmount { amount: total });
    }
    Ok(())
}

/// Loads a job and checks its line items may still change.
async fn editable_job<C>(db: &C, job_id: i64) -> Result<job::Model>
where
    C: ConnectionTrait,
{
    let job = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    if !job.job_status.is_editable() {
        return Err(Error::JobLocked {
            job_id,
            status: job.job_status,
        });
    }
    Ok(job)
}

/// Finds a line item by its unique ID.
pub async fn get_job_item_by_id<C>(db: &C, item_id: i64) -> Result<Option<job_item::Model>>
where
    C: ConnectionTrait,
{
    JobItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a job's line items in the order they were added.
pub async fn list_items_for_job<C>(db: &C, job_id: i64) -> Result<Vec<job_item::Model>>
where
    C: ConnectionTrait,
{
    costing::items_for_job(db, job_id).await
}

/// Adds a line to a job.
///
/// # Errors
/// - `Error::InvalidAmount` if the quantity or unit cost is negative or not finite, or if
///   their product overflows
/// - `Error::Validation` if the name is blank
/// - `Error::JobNotFound` / `Error::JobLocked` if the job is missing or finished
#[instrument(skip(db, form), fields(job_id = form.job_id))]
pub async fn add_job_item(db: &DatabaseConnection, form: JobItemForm) -> Result<job_item::Model> {
    check_amount(form.quantity)?;
    check_amount(form.unit_cost)?;
    check_line_total(form.quantity, form.unit_cost)?;
    let form = form.normalized();
    form.validate()?;

    let job = editable_job(db, form.job_id).await?;

    let item = job_item::ActiveModel {
        job_id: Set(job.id),
        name: Set(form.name),
        description: Set(form.description),
        quantity: Set(form.quantity),
        unit_cost: Set(form.unit_cost),
        ..Default::default()
    };

    let created = item.insert(db).await?;
    info!(
        item_id = created.id,
        line_total = created.total(),
        "Job item added"
    );
    Ok(created)
}

/// Edits a line item. Fields left as `None` keep their current value.
///
/// # Errors
/// - `Error::JobItemNotFound` if the item does not exist
/// - `Error::InvalidAmount` / `Error::Validation` for bad input
/// - `Error::JobLocked` if the item's job is Complete or Cancelled
pub async fn update_job_item(
    db: &DatabaseConnection,
    item_id: i64,
    update: JobItemUpdate,
) -> Result<job_item::Model> {
    if let Some(quantity) = update.quantity {
        check_amount(quantity)?;
    }
    if let Some(unit_cost) = update.unit_cost {
        check_amount(unit_cost)?;
    }
    let update = update.normalized();
    update.validate()?;

    let existing = get_job_item_by_id(db, item_id)
        .await?
        .ok_or(Error::JobItemNotFound { id: item_id })?;
    check_line_total(
        update.quantity.unwrap_or(existing.quantity),
        update.unit_cost.unwrap_or(existing.unit_cost),
    )?;
    editable_job(db, existing.job_id).await?;

    let mut active_model: job_item::ActiveModel = existing.into();
    if let Some(name) = update.name {
        active_model.name = Set(name);
    }
    if let Some(description) = update.description {
        active_model.description = Set(Some(description));
    }
    if let Some(quantity) = update.quantity {
        active_model.quantity = Set(quantity);
    }
    if let Some(unit_cost) = update.unit_cost {
        active_model.unit_cost = Set(unit_cost);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Removes a line item from its job.
///
/// # Errors
/// - `Error::JobItemNotFound` if the item does not exist
/// - `Error::JobLocked` if the item's job is Complete or Cancelled
pub async fn remove_job_item(db: &DatabaseConnection, item_id: i64) -> Result<job_item::Model> {
    let existing = get_job_item_by_id(db, item_id)
        .await?
        .ok_or(Error::JobItemNotFound { id: item_id })?;
    editable_job(db, existing.job_id).await?;

    existing.clone().delete(db).await?;
    info!(item_id, job_id = existing.job_id, "Job item removed");
    Ok(existing)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::job::{cancel_job, set_job_status};
    use crate::entities::JobStatus;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_add_job_item_amount_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_job_item(&db, test_item_form(1, "Pipe", -1.0, 10.0)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -1.0 })));

        let result = add_job_item(&db, test_item_form(1, "Pipe", 1.0, f64::NAN)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = add_job_item(&db, test_item_form(1, "Pipe", f64::INFINITY, 1.0)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = add_job_item(&db, test_item_form(1, "  ", 1.0, 1.0)).await;
        assert!(matches!(result, Err(Error::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_line_total_overflow_rejected() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;

        let result = add_job_item(&db, test_item_form(job.id, "Big", 1e200, 1e200)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount }) if amount.is_infinite()));
        assert!(list_items_for_job(&db, job.id).await?.is_empty());

        // A partial edit is checked against the stored quantity
        let item = add_test_item(&db, job.id, 1e200, 1.0).await?;
        let result = update_job_item(
            &db,
            item.id,
            JobItemUpdate {
                unit_cost: Some(1e200),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        assert_eq!(get_job_item_by_id(&db, item.id).await?.unwrap(), item);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_job_item_job_not_found() -> Result<()> {
        // Configure MockDatabase to return no job
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<job::Model>::new()])
            .into_connection();

        let result = add_job_item(&db, test_item_form(9, "Pipe", 1.0, 1.0)).await;
        assert!(matches!(result, Err(Error::JobNotFound { id: 9 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_job_item_integration() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;

        let item = add_job_item(
            &db,
            JobItemForm {
                description: Some(" 22mm ".to_string()),
                ..test_item_form(job.id, "Compression fitting", 2.0, 50.0)
            },
        )
        .await?;

        assert_eq!(item.job_id, job.id);
        assert_eq!(item.name, "Compression fitting");
        assert_eq!(item.description.as_deref(), Some("22mm"));
        assert_eq!(item.total(), 100.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_or_cost_is_allowed() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;

        let free_visit = add_test_item(&db, job.id, 1.0, 0.0).await?;
        let unused = add_test_item(&db, job.id, 0.0, 35.0).await?;
        assert_eq!(free_visit.total(), 0.0);
        assert_eq!(unused.total(), 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_job_item() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;
        let item = add_test_item(&db, job.id, 2.0, 50.0).await?;

        let updated = update_job_item(
            &db,
            item.id,
            JobItemUpdate {
                unit_cost: Some(45.0),
                name: Some("Discounted fitting".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.quantity, 2.0);
        assert_eq!(updated.unit_cost, 45.0);
        assert_eq!(updated.total(), 90.0);
        assert_eq!(updated.name, "Discounted fitting");

        let stored = get_job_item_by_id(&db, item.id).await?.unwrap();
        assert_eq!(stored.total(), 90.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_item() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_job_item(&db, 77, JobItemUpdate::default()).await;
        assert!(matches!(result, Err(Error::JobItemNotFound { id: 77 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_job_item() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;
        let keep = add_test_item(&db, job.id, 1.0, 10.0).await?;
        let drop = add_test_item(&db, job.id, 1.0, 20.0).await?;

        let removed = remove_job_item(&db, drop.id).await?;
        assert_eq!(removed.id, drop.id);

        let remaining = list_items_for_job(&db, job.id).await?;
        assert_eq!(remaining, vec![keep]);
        assert!(get_job_item_by_id(&db, drop.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_items_locked_once_job_complete() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;
        let item = add_test_item(&db, job.id, 1.0, 10.0).await?;
        set_job_status(&db, job.id, JobStatus::Complete).await?;

        let add = add_job_item(&db, test_item_form(job.id, "Late extra", 1.0, 5.0)).await;
        assert!(matches!(
            add,
            Err(Error::JobLocked {
                status: JobStatus::Complete,
                ..
            })
        ));

        let edit = update_job_item(
            &db,
            item.id,
            JobItemUpdate {
                quantity: Some(3.0),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(edit, Err(Error::JobLocked { .. })));

        let remove = remove_job_item(&db, item.id).await;
        assert!(matches!(remove, Err(Error::JobLocked { .. })));

        // Nothing changed
        assert_eq!(list_items_for_job(&db, job.id).await?, vec![item]);
        Ok(())
    }

    #[tokio::test]
    async fn test_items_locked_once_job_cancelled() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;
        cancel_job(&db, job.id).await?;

        let add = add_job_item(&db, test_item_form(job.id, "Pipe", 1.0, 5.0)).await;
        assert!(matches!(
            add,
            Err(Error::JobLocked {
                status: JobStatus::Cancelled,
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_items_editable_while_in_progress() -> Result<()> {
        let (db, _customer, job) = setup_with_job().await?;
        set_job_status(&db, job.id, JobStatus::InProgress).await?;

        let item = add_test_item(&db, job.id, 1.0, 5.0).await?;
        assert_eq!(item.job_id, job.id);
        Ok(())
    }
}
