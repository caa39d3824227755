//! Report generation business logic.
//!
//! Builds the job cost sheet and the office dashboard from live data. Totals are always
//! derived from line items at read time; nothing here writes to the database.

use crate::{
    core::{
        costing, customer::get_customer_by_id, invoice::get_invoice_for_job, job::get_job_by_id,
    },
    entities::{
        Customer, Invoice, InvoiceStatus, Job, JobItem, JobStatus, customer, invoice, job,
        job_item,
    },
    errors::{Error, Result},
};
use sea_orm::{Iterable, PaginatorTrait, prelude::*};
use std::{collections::HashMap, fmt::Write};

/// Everything needed to show what a job costs.
#[derive(Debug, Clone)]
pub struct JobCostSheet {
    /// The job being costed
    pub job: job::Model,
    /// Who the work is for
    pub customer: customer::Model,
    /// Line items in the order they were added, each with its line total
    pub items: Vec<(job_item::Model, f64)>,
    /// Sum of all line totals
    pub total: f64,
    /// The job's invoice, if one has been issued
    pub invoice: Option<invoice::Model>,
}

/// Builds the cost sheet for one job.
///
/// # Errors
/// Returns `Error::JobNotFound` if the job does not exist.
pub async fn job_cost_sheet(db: &DatabaseConnection, job_id: i64) -> Result<JobCostSheet> {
    let job = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;
    let customer = get_customer_by_id(db, job.customer_id)
        .await?
        .ok_or(Error::CustomerNotFound {
            id: job.customer_id,
        })?;

    let items = costing::items_for_job(db, job_id).await?;
    let total = costing::sum_line_totals(&items);
    let items = items
        .into_iter()
        .map(|item| {
            let line_total = item.total();
            (item, line_total)
        })
        .collect();
    let invoice = get_invoice_for_job(db, job_id).await?;

    Ok(JobCostSheet {
        job,
        customer,
        items,
        total,
        invoice,
    })
}

/// Office-wide counts and money owed.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Customers not soft-deleted
    pub active_customers: u64,
    /// Number of jobs in each status, in workflow order
    pub jobs_by_status: Vec<(JobStatus, u64)>,
    /// Invoices issued but not yet paid
    pub outstanding_invoices: u64,
    /// Sum of the outstanding invoices' totals
    pub outstanding_value: f64,
    /// Invoices marked Paid
    pub paid_invoices: u64,
    /// Sum of the paid invoices' totals
    pub paid_value: f64,
}

/// Builds the dashboard summary.
pub async fn dashboard(db: &DatabaseConnection) -> Result<DashboardSummary> {
    let active_customers = Customer::find()
        .filter(customer::Column::IsActive.eq(true))
        .count(db)
        .await?;

    let mut jobs_by_status = Vec::new();
    for status in <JobStatus as Iterable>::iter() {
        let count = Job::find()
            .filter(job::Column::JobStatus.eq(status))
            .count(db)
            .await?;
        jobs_by_status.push((status, count));
    }

    let billed = Invoice::find()
        .filter(invoice::Column::Status.is_in([InvoiceStatus::Issued, InvoiceStatus::Paid]))
        .all(db)
        .await?;
    let job_ids: Vec<i64> = billed.iter().map(|inv| inv.job_id).collect();

    let mut totals: HashMap<i64, f64> = HashMap::new();
    if !job_ids.is_empty() {
        let items = JobItem::find()
            .filter(job_item::Column::JobId.is_in(job_ids))
            .all(db)
            .await?;
        for item in &items {
            *totals.entry(item.job_id).or_insert(0.0) += item.total();
        }
    }

    let mut summary = DashboardSummary {
        active_customers,
        jobs_by_status,
        outstanding_invoices: 0,
        outstanding_value: 0.0,
        paid_invoices: 0,
        paid_value: 0.0,
    };
    for inv in &billed {
        let value = totals.get(&inv.job_id).copied().unwrap_or(0.0);
        if inv.status == InvoiceStatus::Paid {
            summary.paid_invoices += 1;
            summary.paid_value += value;
        } else {
            summary.outstanding_invoices += 1;
            summary.outstanding_value += value;
        }
    }

    Ok(summary)
}

/// Formats an amount as dollars with thousands separators, e.g. `$1,234.50` or `-$5.00`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Amounts that round to zero never show a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Renders a cost sheet as a plain-text block for chat.
pub fn format_cost_sheet(sheet: &JobCostSheet) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "Job #{} for {} ({})",
        sheet.job.id,
        sheet.customer.full_name(),
        sheet.job.job_status
    )?;
    writeln!(out, "{}", sheet.job.description)?;

    if sheet.items.is_empty() {
        writeln!(out, "No line items yet.")?;
    }
    for (item, line_total) in &sheet.items {
        writeln!(
            out,
            "#{} {} - {} x {} = {}",
            item.id,
            item.name,
            item.quantity,
            format_money(item.unit_cost),
            format_money(*line_total)
        )?;
    }
    writeln!(out, "Total: {}", format_money(sheet.total))?;

    match &sheet.invoice {
        Some(inv) => write!(
            out,
            "Invoice #{}: {} (due {})",
            inv.id, inv.status, inv.due_date
        )?,
        None => write!(out, "Invoice: {}", InvoiceStatus::NotIssued)?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{invoice::set_invoice_status, job::set_job_status};
    use crate::test_utils::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(5.0), "$5.00");
        assert_eq!(format_money(-5.0), "-$5.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(999.999), "$1,000.00");
        assert_eq!(format_money(1_234_567.0), "$1,234,567.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[tokio::test]
    async fn test_job_cost_sheet() -> Result<()> {
        let (db, customer, job) = setup_with_job().await?;
        add_test_item(&db, job.id, 2.0, 50.0).await?;
        add_test_item(&db, job.id, 1.0, 25.0).await?;

        let sheet = job_cost_sheet(&db, job.id).await?;
        assert_eq!(sheet.customer.id, customer.id);
        assert_eq!(sheet.items.len(), 2);
        assert_eq!(sheet.items[0].1, 100.0);
        assert_eq!(sheet.items[1].1, 25.0);
        assert_eq!(sheet.total, 125.0);
        assert!(sheet.invoice.is_none());

        let text = format_cost_sheet(&sheet)?;
        assert!(text.contains("Total: $125.00"));
        assert!(text.contains("Invoice: None"));
        Ok(())
    }

    #[tokio::test]
    async fn test_job_cost_sheet_unknown_job() -> Result<()> {
        let db = setup_test_db().await?;
        let result = job_cost_sheet(&db, 404).await;
        assert!(matches!(result, Err(Error::JobNotFound { id: 404 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let summary = dashboard(&db).await?;
        assert_eq!(summary.active_customers, 0);
        assert_eq!(summary.jobs_by_status.len(), 4);
        assert!(summary.jobs_by_status.iter().all(|(_, count)| *count == 0));
        assert_eq!(summary.outstanding_value, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_counts_and_values() -> Result<()> {
        let (db, customer, job) = setup_with_job().await?;
        let second = create_test_job(&db, customer.id).await?;
        let third = create_test_job(&db, customer.id).await?;

        add_test_item(&db, job.id, 2.0, 50.0).await?;
        add_test_item(&db, second.id, 1.0, 30.0).await?;
        set_job_status(&db, third.id, JobStatus::InProgress).await?;

        issue_test_invoice(&db, job.id).await?;
        let paid = issue_test_invoice(&db, second.id).await?;
        set_invoice_status(&db, paid.id, InvoiceStatus::Paid).await?;

        let summary = dashboard(&db).await?;
        assert_eq!(summary.active_customers, 1);
        assert_eq!(
            summary.jobs_by_status,
            vec![
                (JobStatus::Open, 2),
                (JobStatus::InProgress, 1),
                (JobStatus::Complete, 0),
                (JobStatus::Cancelled, 0),
            ]
        );
        assert_eq!(summary.outstanding_invoices, 1);
        assert_eq!(summary.outstanding_value, 100.0);
        assert_eq!(summary.paid_invoices, 1);
        assert_eq!(summary.paid_value, 30.0);
        Ok(())
    }
}
