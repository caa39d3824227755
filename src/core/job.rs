//! Job business logic - the job ledger and its status workflow.
//!
//! Jobs are created for active customers and move through Open → In Progress → Complete.
//! Deleting a job is a status change to Cancelled, so its line items and invoice remain
//! attached to a real row.

use crate::{
    core::{ListPolicy, customer::get_customer_by_id, forms::JobForm, forms::JobUpdate, today},
    entities::{InvoiceStatus, Job, JobStatus, job},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Select, Set, prelude::*};
use tracing::{info, instrument};
use validator::Validate;

/// Finds a job by its unique ID, whatever its status.
pub async fn get_job_by_id<C>(db: &C, job_id: i64) -> Result<Option<job::Model>>
where
    C: ConnectionTrait,
{
    Job::find_by_id(job_id).one(db).await.map_err(Into::into)
}

fn apply_policy(query: Select<Job>, policy: ListPolicy) -> Select<Job> {
    if policy.include_cancelled {
        query
    } else {
        query.filter(job::Column::JobStatus.ne(JobStatus::Cancelled))
    }
}

/// Lists jobs, newest first. Cancelled jobs are left out unless the policy includes them.
pub async fn list_jobs(db: &DatabaseConnection, policy: ListPolicy) -> Result<Vec<job::Model>> {
    apply_policy(Job::find(), policy)
        .order_by_desc(job::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists one customer's jobs, newest first, under the same policy as [`list_jobs`].
pub async fn list_jobs_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
    policy: ListPolicy,
) -> Result<Vec<job::Model>> {
    apply_policy(
        Job::find().filter(job::Column::CustomerId.eq(customer_id)),
        policy,
    )
    .order_by_desc(job::Column::Id)
    .all(db)
    .await
    .map_err(Into::into)
}

/// Lists every job currently in `status`, oldest first.
pub async fn list_jobs_with_status(
    db: &DatabaseConnection,
    status: JobStatus,
) -> Result<Vec<job::Model>> {
    Job::find()
        .filter(job::Column::JobStatus.eq(status))
        .order_by_asc(job::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Opens a new job for an active customer.
///
/// The job starts Open with no invoice.
///
/// # Errors
/// - `Error::Validation` if the description is blank
/// - `Error::CustomerNotFound` if the customer does not exist
/// - `Error::CustomerInactive` if the customer has been deleted
#[instrument(skip(db, form), fields(customer_id = form.customer_id))]
pub async fn create_job(db: &DatabaseConnection, form: JobForm) -> Result<job::Model> {
    let form = form.normalized();
    form.validate()?;

    let customer = get_customer_by_id(db, form.customer_id)
        .await?
        .ok_or(Error::CustomerNotFound {
            id: form.customer_id,
        })?;

    if !customer.is_active {
        return Err(Error::CustomerInactive { id: customer.id });
    }

    let now = chrono::Utc::now().naive_utc();
    let job = job::ActiveModel {
        customer_id: Set(customer.id),
        job_type: Set(form.job_type),
        description: Set(form.description),
        notes: Set(form.notes),
        priority: Set(form.priority),
        job_status: Set(JobStatus::Open),
        invoice_status: Set(InvoiceStatus::NotIssued),
        planned_date: Set(form.planned_date),
        completed_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = job.insert(db).await?;
    info!(job_id = created.id, "Job opened");
    Ok(created)
}

/// Edits a job's type, description, notes, priority or planned date.
///
/// # Errors
/// Returns `Error::JobNotFound` for an unknown ID and `Error::Validation` for bad input.
pub async fn update_job(
    db: &DatabaseConnection,
    job_id: i64,
    update: JobUpdate,
) -> Result<job::Model> {
    let update = update.normalized();
    update.validate()?;

    let existing = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    if update.is_empty() {
        return Ok(existing);
    }

    let mut active_model: job::ActiveModel = existing.into();
    if let Some(job_type) = update.job_type {
        active_model.job_type = Set(job_type);
    }
    if let Some(description) = update.description {
        active_model.description = Set(description);
    }
    if let Some(notes) = update.notes {
        active_model.notes = Set(Some(notes));
    }
    if let Some(priority) = update.priority {
        active_model.priority = Set(priority);
    }
    if let Some(planned_date) = update.planned_date {
        active_model.planned_date = Set(Some(planned_date));
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    active_model.update(db).await.map_err(Into::into)
}

/// Moves a job to `new_status` if the workflow allows it.
///
/// Setting the status a job already has is a no-op. Completing a job stamps today's
/// date as its completion date unless one was recorded already.
///
/// # Errors
/// - `Error::JobNotFound` if the job does not exist
/// - `Error::InvalidStatusTransition` if the move is not allowed; nothing is changed
#[instrument(skip(db))]
pub async fn set_job_status(
    db: &DatabaseConnection,
    job_id: i64,
    new_status: JobStatus,
) -> Result<job::Model> {
    let existing = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    let current = existing.job_status;
    if current == new_status {
        return Ok(existing);
    }
    if !current.can_transition_to(new_status) {
        return Err(Error::InvalidStatusTransition {
            from: current.to_string(),
            to: new_status.to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let needs_completed_date =
        new_status == JobStatus::Complete && existing.completed_date.is_none();

    let mut active_model: job::ActiveModel = existing.into();
    active_model.job_status = Set(new_status);
    if needs_completed_date {
        active_model.completed_date = Set(Some(today()));
    }
    active_model.updated_at = Set(now);
    let updated = active_model.update(db).await?;

    info!(job_id, from = %current, to = %new_status, "Job status changed");
    Ok(updated)
}

/// Deletes a job the only way the ledger allows: by cancelling it.
///
/// The row, its line items and its invoice are all kept.
///
/// # Errors
/// Returns `Error::JobNotFound` for an unknown ID.
pub async fn cancel_job(db: &DatabaseConnection, job_id: i64) -> Result<job::Model> {
    set_job_status(db, job_id, JobStatus::Cancelled).await
}
