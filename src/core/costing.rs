//! Costing derivation - line totals, job totals and invoice totals.
//!
//! None of these values are stored. They are recomputed from the line items on every
//! read, so adding, editing or removing an item is reflected immediately.

use crate::{
    entities::{Invoice, Job, JobItem, job_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};

/// Total for a single line: quantity × unit cost.
#[must_use]
pub fn line_total(quantity: f64, unit_cost: f64) -> f64 {
    quantity * unit_cost
}

/// Sum of the line totals of `items`. An empty set costs 0.0.
#[must_use]
pub fn sum_line_totals<'a, I>(items: I) -> f64
where
    I: IntoIterator<Item = &'a job_item::Model>,
{
    items
        .into_iter()
        .fold(0.0, |total, item| total + item.total())
}

/// Loads the line items of a job in the order they were added.
pub async fn items_for_job<C>(db: &C, job_id: i64) -> Result<Vec<job_item::Model>>
where
    C: ConnectionTrait,
{
    JobItem::find()
        .filter(job_item::Column::JobId.eq(job_id))
        .order_by_asc(job_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Current total cost of a job.
///
/// # Errors
/// Returns `Error::JobNotFound` if the job does not exist.
pub async fn job_total<C>(db: &C, job_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    Job::find_by_id(job_id)
        .one(db)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    let items = items_for_job(db, job_id).await?;
    Ok(sum_line_totals(&items))
}

/// Current total of an invoice, which is the total of the job it bills.
///
/// # Errors
/// Returns `Error::InvoiceNotFound` if the invoice does not exist.
pub async fn invoice_total<C>(db: &C, invoice_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    let invoice = Invoice::find_by_id(invoice_id)
        .one(db)
        .await?
        .ok_or(Error::InvoiceNotFound { id: invoice_id })?;

    job_total(db, invoice.job_id).await
}
