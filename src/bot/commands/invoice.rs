//! Invoice Discord commands - the `/invoice` command group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::utils::{invoice_line, parse_date, parse_optional_date, truncate_message},
            handlers::autocomplete,
        },
        core::{
            costing,
            forms::{InvoiceForm, InvoiceUpdate},
            invoice,
        },
        entities::InvoiceStatus,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Invoices. Each job can be invoiced once.
    #[poise::command(
        slash_command,
        subcommands(
            "invoice_issue",
            "invoice_status",
            "invoice_edit",
            "invoice_list",
            "invoice_info"
        )
    )]
    pub async fn invoice(ctx: Context<'_>) -> Result<()> {
        let help_text = "Invoice commands:\n\
            `/invoice issue` - Invoice a job\n\
            `/invoice status` - Mark an invoice Paid, Cancelled or Issued\n\
            `/invoice edit` - Change the due date or notes\n\
            `/invoice list` - List invoices by due date\n\
            `/invoice info` - Show an invoice and its total";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Issues the invoice for a job.
    #[poise::command(slash_command, rename = "issue")]
    pub async fn invoice_issue(
        ctx: Context<'_>,
        #[description = "Job ID"] job_id: i64,
        #[description = "Due date (YYYY-MM-DD); defaults to the payment terms"]
        due_date: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let due_date = match parse_optional_date(due_date.as_deref())? {
            Some(date) => date,
            None => invoice::default_due_date(
                crate::core::today(),
                data.config.company.payment_terms_days,
            ),
        };

        let created = invoice::issue_invoice(
            &data.database,
            InvoiceForm {
                job_id,
                due_date,
                notes,
            },
        )
        .await?;
        let total = costing::invoice_total(&data.database, created.id).await?;

        ctx.say(format!(
            "🧾 {} issued by {}.",
            invoice_line(&created, total),
            data.config.company.name
        ))
        .await?;
        Ok(())
    }

    /// Changes an invoice's status. The job's invoice status follows.
    #[poise::command(slash_command, rename = "status")]
    pub async fn invoice_status(
        ctx: Context<'_>,
        #[description = "Invoice ID"] invoice_id: i64,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_invoice_status"]
        status: String,
    ) -> Result<()> {
        let status = status.parse::<InvoiceStatus>()?;
        let updated = invoice::set_invoice_status(&ctx.data().database, invoice_id, status).await?;

        ctx.say(format!(
            "✅ Invoice #{} is now **{}**.",
            updated.id, updated.status
        ))
        .await?;
        Ok(())
    }

    /// Changes an invoice's due date or notes.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn invoice_edit(
        ctx: Context<'_>,
        #[description = "Invoice ID"] invoice_id: i64,
        #[description = "Due date (YYYY-MM-DD)"] due_date: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let update = InvoiceUpdate {
            due_date: due_date.as_deref().map(parse_date).transpose()?,
            notes,
        };
        let updated = invoice::update_invoice(db, invoice_id, update).await?;
        let total = costing::invoice_total(db, updated.id).await?;

        ctx.say(format!("✅ Updated {}", invoice_line(&updated, total)))
            .await?;
        Ok(())
    }

    /// Lists invoices by due date.
    #[poise::command(slash_command, rename = "list")]
    pub async fn invoice_list(
        ctx: Context<'_>,
        #[description = "Only invoices in this status"]
        #[autocomplete = "autocomplete::autocomplete_invoice_status"]
        status: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;
        let invoices = match status.as_deref() {
            Some(label) => {
                let status = label.parse::<InvoiceStatus>()?;
                invoice::list_invoices_with_status(db, status).await?
            }
            None => invoice::list_invoices(db, data.config.list_policy()).await?,
        };

        if invoices.is_empty() {
            ctx.say("🧾 No invoices found.").await?;
            return Ok(());
        }

        let mut response = format!("🧾 **Invoices** ({})\n\n", invoices.len());
        for inv in &invoices {
            let total = costing::job_total(db, inv.job_id).await?;
            writeln!(&mut response, "{}", invoice_line(inv, total))?;
        }

        ctx.say(truncate_message(response)).await?;
        Ok(())
    }

    /// Shows an invoice and its current total.
    #[poise::command(slash_command, rename = "info")]
    pub async fn invoice_info(
        ctx: Context<'_>,
        #[description = "Invoice ID"] invoice_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let found = invoice::get_invoice_by_id(db, invoice_id)
            .await?
            .ok_or(Error::InvoiceNotFound { id: invoice_id })?;
        let total = costing::invoice_total(db, invoice_id).await?;

        let mut response = format!("🧾 {}\n", invoice_line(&found, total));
        writeln!(&mut response, "Issued: {}", found.created_at.date())?;
        if let Some(notes) = &found.notes {
            writeln!(&mut response, "Notes: {notes}")?;
        }

        ctx.say(response).await?;
        Ok(())
    }
}

pub use inner::*;
