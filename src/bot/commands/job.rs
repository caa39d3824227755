//! Job Discord commands - the `/job` command group.
//!
//! Vocabulary arguments (type, priority, status) are typed as text with autocomplete and
//! parsed against the fixed labels, so an unknown value is rejected with the valid choices.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::utils::{job_line, parse_date, parse_optional_date, truncate_message},
            handlers::autocomplete,
        },
        core::{
            forms::{JobForm, JobUpdate},
            job,
            report::{format_cost_sheet, job_cost_sheet},
        },
        entities::{JobPriority, JobStatus, JobType},
        errors::Result,
    };
    use std::fmt::Write;

    /// Job ledger. Run a subcommand to open, edit, progress or look up jobs.
    #[poise::command(
        slash_command,
        subcommands(
            "job_add",
            "job_edit",
            "job_status",
            "job_cancel",
            "job_list",
            "job_info"
        )
    )]
    pub async fn job(ctx: Context<'_>) -> Result<()> {
        let help_text = "Job commands:\n\
            `/job add` - Open a job for a customer\n\
            `/job edit` - Change a job's details\n\
            `/job status` - Move a job through Open → In Progress → Complete\n\
            `/job cancel` - Cancel a job\n\
            `/job list` - List jobs\n\
            `/job info` - Show a job's line items, total and invoice";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Opens a new job for an active customer.
    #[poise::command(slash_command, rename = "add")]
    pub async fn job_add(
        ctx: Context<'_>,
        #[description = "Customer"]
        #[autocomplete = "autocomplete::autocomplete_customer"]
        customer_id: i64,
        #[description = "What needs doing"] description: String,
        #[description = "Type of work"]
        #[autocomplete = "autocomplete::autocomplete_job_type"]
        job_type: String,
        #[description = "Priority (default Medium)"]
        #[autocomplete = "autocomplete::autocomplete_job_priority"]
        priority: Option<String>,
        #[description = "Planned date (YYYY-MM-DD)"] planned_date: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let form = JobForm {
            customer_id,
            job_type: job_type.parse::<JobType>()?,
            description,
            notes,
            priority: priority
                .as_deref()
                .map(str::parse::<JobPriority>)
                .transpose()?
                .unwrap_or_default(),
            planned_date: parse_optional_date(planned_date.as_deref())?,
        };
        let created = job::create_job(&ctx.data().database, form).await?;

        ctx.say(format!("🔧 Opened {}", job_line(&created))).await?;
        Ok(())
    }

    /// Changes a job's details. Options left out keep their current value.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn job_edit(
        ctx: Context<'_>,
        #[description = "Job ID"] job_id: i64,
        #[description = "What needs doing"] description: Option<String>,
        #[description = "Type of work"]
        #[autocomplete = "autocomplete::autocomplete_job_type"]
        job_type: Option<String>,
        #[description = "Priority"]
        #[autocomplete = "autocomplete::autocomplete_job_priority"]
        priority: Option<String>,
        #[description = "Planned date (YYYY-MM-DD)"] planned_date: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let update = JobUpdate {
            job_type: job_type.as_deref().map(str::parse).transpose()?,
            description,
            notes,
            priority: priority.as_deref().map(str::parse).transpose()?,
            planned_date: planned_date.as_deref().map(parse_date).transpose()?,
        };
        let updated = job::update_job(&ctx.data().database, job_id, update).await?;

        ctx.say(format!("✅ Updated {}", job_line(&updated))).await?;
        Ok(())
    }

    /// Moves a job to a new status.
    #[poise::command(slash_command, rename = "status")]
    pub async fn job_status(
        ctx: Context<'_>,
        #[description = "Job ID"] job_id: i64,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_job_status"]
        status: String,
    ) -> Result<()> {
        let status = status.parse::<JobStatus>()?;
        let updated = job::set_job_status(&ctx.data().database, job_id, status).await?;

        ctx.say(format!("✅ Job #{} is now **{}**.", updated.id, updated.job_status))
            .await?;
        Ok(())
    }

    /// Cancels a job. Its line items and invoice are kept.
    #[poise::command(slash_command, rename = "cancel")]
    pub async fn job_cancel(
        ctx: Context<'_>,
        #[description = "Job ID"] job_id: i64,
    ) -> Result<()> {
        let cancelled = job::cancel_job(&ctx.data().database, job_id).await?;
        ctx.say(format!("🗑️ Job #{} cancelled.", cancelled.id))
            .await?;
        Ok(())
    }

    /// Lists jobs, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn job_list(
        ctx: Context<'_>,
        #[description = "Only this customer's jobs"]
        #[autocomplete = "autocomplete::autocomplete_customer"]
        customer_id: Option<i64>,
        #[description = "Only jobs in this status"]
        #[autocomplete = "autocomplete::autocomplete_job_status"]
        status: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;
        let policy = data.config.list_policy();

        let mut jobs = match customer_id {
            Some(id) => job::list_jobs_for_customer(db, id, policy).await?,
            None => job::list_jobs(db, policy).await?,
        };
        if let Some(status) = status.as_deref() {
            let status = status.parse::<JobStatus>()?;
            if customer_id.is_none() {
                jobs = job::list_jobs_with_status(db, status).await?;
            } else {
                jobs.retain(|j| j.job_status == status);
            }
        }

        if jobs.is_empty() {
            ctx.say("🔧 No jobs found.").await?;
            return Ok(());
        }

        let mut response = format!("🔧 **Jobs** ({})\n\n", jobs.len());
        for j in &jobs {
            writeln!(&mut response, "{}", job_line(j))?;
        }

        ctx.say(truncate_message(response)).await?;
        Ok(())
    }

    /// Shows a job's line items, total and invoice.
    #[poise::command(slash_command, rename = "info")]
    pub async fn job_info(
        ctx: Context<'_>,
        #[description = "Job ID"] job_id: i64,
    ) -> Result<()> {
        let sheet = job_cost_sheet(&ctx.data().database, job_id).await?;
        let text = format_cost_sheet(&sheet)?;

        ctx.say(truncate_message(format!("📋 ```\n{text}\n```")))
            .await?;
        Ok(())
    }
}

pub use inner::*;
