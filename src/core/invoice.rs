//! Invoice business logic - issuing and tracking the one invoice a job may have.
//!
//! Every write that touches an invoice's status also writes the job's `invoice_status`,
//! inside the same database transaction, so the two never disagree.

use crate::{
    core::{
        ListPolicy,
        forms::{InvoiceForm, InvoiceUpdate},
    },
    entities::{Invoice, InvoiceStatus, Job, invoice, job},
    errors::{Error, Result},
};
use chrono::{Days, NaiveDate};
use sea_orm::{DatabaseTransaction, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};
use validator::Validate;

/// Due date for an invoice issued on `issued_on` with the given payment terms.
#[must_use]
pub fn default_due_date(issued_on: NaiveDate, payment_terms_days: u32) -> NaiveDate {
    issued_on
        .checked_add_days(Days::new(u64::from(payment_terms_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Finds an invoice by its unique ID.
pub async fn get_invoice_by_id<C>(db: &C, invoice_id: i64) -> Result<Option<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find_by_id(invoice_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the invoice issued for a job, if there is one.
pub async fn get_invoice_for_job<C>(db: &C, job_id: i64) -> Result<Option<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find()
        .filter(invoice::Column::JobId.eq(job_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists invoices by due date, soonest first. Cancelled invoices are left out unless the
/// policy includes them.
pub async fn list_invoices(
    db: &DatabaseConnection,
    policy: ListPolicy,
) -> Result<Vec<invoice::Model>> {
    let mut query = Invoice::find();
    if !policy.include_cancelled {
        query = query.filter(invoice::Column::Status.ne(InvoiceStatus::Cancelled));
    }
    query
        .order_by_asc(invoice::Column::DueDate)
        .order_by_asc(invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists invoices currently in `status`, by due date.
pub async fn list_invoices_with_status(
    db: &DatabaseConnection,
    status: InvoiceStatus,
) -> Result<Vec<invoice::Model>> {
    Invoice::find()
        .filter(invoice::Column::Status.eq(status))
        .order_by_asc(invoice::Column::DueDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The unique index on `invoices.job_id` backs up the duplicate check in `issue_invoice`.
fn map_insert_error(err: DbErr, job_id: i64) -> Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        Error::DuplicateInvoice { job_id }
    } else {
        Error::from(err)
    }
}

async fn mirror_on_job(
    txn: &DatabaseTransaction,
    job: job::Model,
    status: InvoiceStatus,
    now: DateTime,
) -> Result<job::Model> {
    let mut active_job: job::ActiveModel = job.into();
    active_job.invoice_status = Set(status);
    active_job.updated_at = Set(now);
    active_job.update(txn).await.map_err(Into::into)
}

/// Issues the invoice for a job and marks the job's invoice status as Issued.
///
/// Both writes happen in one transaction: either the invoice exists and the job says
/// Issued, or neither changed.
///
/// # Errors
/// - `Error::Validation` if the notes are too long
/// - `Error::JobNotFound` if the job does not exist
/// - `Error::DuplicateInvoice` if the job already has an invoice; nothing is changed
#[instrument(skip(db, form), fields(job_id = form.job_id))]
pub async fn issue_invoice(db: &DatabaseConnection, form: InvoiceForm) -> Result<invoice::Model> {
    let form = form.normalized();
    form.validate()?;
    let job_id = form.job_id;

    // Dropping the transaction on an early return rolls it back
    let txn = db.begin().await?;

    let job = Job::find_by_id(job_id)
        .one(&txn)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    if get_invoice_for_job(&txn, job_id).await?.is_some() {
        warn!(job_id, "Rejected second invoice for job");
        return Err(Error::DuplicateInvoice { job_id });
    }

    let now = chrono::Utc::now().naive_utc();
    let invoice_model = invoice::ActiveModel {
        job_id: Set(job_id),
        due_date: Set(form.due_date),
        status: Set(InvoiceStatus::Issued),
        notes: Set(form.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = invoice_model
        .insert(&txn)
        .await
        .map_err(|e| map_insert_error(e, job_id))?;

    mirror_on_job(&txn, job, InvoiceStatus::Issued, now).await?;

    txn.commit().await?;

    info!(invoice_id = created.id, job_id, "Invoice issued");
    Ok(created)
}

/// Changes an invoice's status and mirrors it onto the job, atomically.
///
/// # Errors
/// - `Error::InvalidStatusTransition` when asked to set "None" on an existing invoice
/// - `Error::InvoiceNotFound` if the invoice does not exist
/// - `Error::JobNotFound` if the invoice's job has gone missing
#[instrument(skip(db))]
pub async fn set_invoice_status(
    db: &DatabaseConnection,
    invoice_id: i64,
    status: InvoiceStatus,
) -> Result<invoice::Model> {
    let txn = db.begin().await?;

    let existing = Invoice::find_by_id(invoice_id)
        .one(&txn)
        .await?
        .ok_or(Error::InvoiceNotFound { id: invoice_id })?;

    if !status.applies_to_invoice() {
        return Err(Error::InvalidStatusTransition {
            from: existing.status.to_string(),
            to: status.to_string(),
        });
    }

    let job = Job::find_by_id(existing.job_id)
        .one(&txn)
        .await?
        .ok_or(Error::JobNotFound {
            id: existing.job_id,
        })?;

    let previous = existing.status;
    let now = chrono::Utc::now().naive_utc();
    let mut active_invoice: invoice::ActiveModel = existing.into();
    active_invoice.status = Set(status);
    active_invoice.updated_at = Set(now);
    let updated = active_invoice.update(&txn).await?;

    mirror_on_job(&txn, job, status, now).await?;

    txn.commit().await?;

    info!(invoice_id, from = %previous, to = %status, "Invoice status changed");
    Ok(updated)
}

/// Cancels an invoice. The row stays and the job's invoice status becomes Cancelled.
///
/// # Errors
/// Returns `Error::InvoiceNotFound` for an unknown ID.
pub async fn cancel_invoice(db: &DatabaseConnection, invoice_id: i64) -> Result<invoice::Model> {
    set_invoice_status(db, invoice_id, InvoiceStatus::Cancelled).await
}

/// Edits an invoice's due date or notes. Fields left as `None` keep their value.
///
/// # Errors
/// Returns `Error::InvoiceNotFound` for an unknown ID and `Error::Validation` for bad input.
pub async fn update_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
    update: InvoiceUpdate,
) -> Result<invoice::Model> {
    let update = update.normalized();
    update.validate()?;

    let existing = get_invoice_by_id(db, invoice_id)
        .await?
        .ok_or(Error::InvoiceNotFound { id: invoice_id })?;

    if update.due_date.is_none() && update.notes.is_none() {
        return Ok(existing);
    }

    let mut active_model: invoice::ActiveModel = existing.into();
    if let Some(due_date) = update.due_date {
        active_model.due_date = Set(due_date);
    }
    if let Some(notes) = update.notes {
        active_model.notes = Set(Some(notes));
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    active_model.update(db).await.map_err(Into::into)
}
