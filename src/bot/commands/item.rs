//! Job item Discord commands - the `/item` command group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::{
            costing,
            forms::{JobItemForm, JobItemUpdate},
            job_item,
            report::format_money,
        },
        errors::Result,
    };

    /// Line items on a job. Run a subcommand to add, edit or remove one.
    #[poise::command(slash_command, subcommands("item_add", "item_edit", "item_remove"))]
    pub async fn item(ctx: Context<'_>) -> Result<()> {
        let help_text = "Line item commands:\n\
            `/item add` - Add a line to a job\n\
            `/item edit` - Change a line's quantity, cost or name\n\
            `/item remove` - Remove a line\n\
            Lines can only change while the job is Open or In Progress.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a billable line to a job.
    #[poise::command(slash_command, rename = "add")]
    pub async fn item_add(
        ctx: Context<'_>,
        #[description = "Job ID"] job_id: i64,
        #[description = "Part or labour name"] name: String,
        #[description = "Quantity (may be fractional, e.g. 1.5 hours)"] quantity: f64,
        #[description = "Cost per unit"] unit_cost: f64,
        #[description = "Extra detail"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let created = job_item::add_job_item(
            db,
            JobItemForm {
                job_id,
                name,
                description,
                quantity,
                unit_cost,
            },
        )
        .await?;
        let total = costing::job_total(db, job_id).await?;

        ctx.say(format!(
            "➕ Added #{} **{}**: {} x {} = {}. Job #{job_id} total is now {}.",
            created.id,
            created.name,
            created.quantity,
            format_money(created.unit_cost),
            format_money(created.total()),
            format_money(total)
        ))
        .await?;
        Ok(())
    }

    /// Changes a line item. Options left out keep their current value.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn item_edit(
        ctx: Context<'_>,
        #[description = "Item ID"] item_id: i64,
        #[description = "Part or labour name"] name: Option<String>,
        #[description = "Quantity"] quantity: Option<f64>,
        #[description = "Cost per unit"] unit_cost: Option<f64>,
        #[description = "Extra detail"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let updated = job_item::update_job_item(
            db,
            item_id,
            JobItemUpdate {
                name,
                description,
                quantity,
                unit_cost,
            },
        )
        .await?;
        let total = costing::job_total(db, updated.job_id).await?;

        ctx.say(format!(
            "✏️ Item #{} is now {} x {} = {}. Job #{} total is now {}.",
            updated.id,
            updated.quantity,
            format_money(updated.unit_cost),
            format_money(updated.total()),
            updated.job_id,
            format_money(total)
        ))
        .await?;
        Ok(())
    }

    /// Removes a line item from its job.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn item_remove(
        ctx: Context<'_>,
        #[description = "Item ID"] item_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let removed = job_item::remove_job_item(db, item_id).await?;
        let total = costing::job_total(db, removed.job_id).await?;

        ctx.say(format!(
            "➖ Removed **{}**. Job #{} total is now {}.",
            removed.name,
            removed.job_id,
            format_money(total)
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
