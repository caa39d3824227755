//! Customer Discord commands - the `/customer` command group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::utils::{customer_line, job_line, truncate_message},
            handlers::autocomplete,
        },
        core::{customer, forms::CustomerForm, job},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Customer registry. Run a subcommand to add, edit, delete or look up customers.
    #[poise::command(
        slash_command,
        subcommands(
            "customer_add",
            "customer_edit",
            "customer_delete",
            "customer_restore",
            "customer_list",
            "customer_info"
        )
    )]
    pub async fn customer(ctx: Context<'_>) -> Result<()> {
        let help_text = "Customer commands:\n\
            `/customer add` - Add a customer\n\
            `/customer edit` - Change a customer's details\n\
            `/customer delete` - Deactivate a customer\n\
            `/customer restore` - Reactivate a customer\n\
            `/customer list` - List or search customers\n\
            `/customer info` - Show a customer and their jobs";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new customer.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn customer_add(
        ctx: Context<'_>,
        #[description = "First name"] first_name: String,
        #[description = "Last name"] last_name: String,
        #[description = "Phone number"] phone: String,
        #[description = "Email address"] email: String,
        #[description = "First line of the address"] first_line_address: String,
        #[description = "Town or city"] city: String,
        #[description = "County"] county: String,
        #[description = "Postal code"] postal_code: String,
        #[description = "Second line of the address"] second_line_address: Option<String>,
        #[description = "How they heard about us"] referral: Option<String>,
    ) -> Result<()> {
        let created = customer::create_customer(
            &ctx.data().database,
            CustomerForm {
                first_name,
                last_name,
                phone,
                email,
                first_line_address,
                second_line_address,
                city,
                county,
                postal_code,
                referral,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ Added customer #{} **{}**.",
            created.id,
            created.full_name()
        ))
        .await?;
        Ok(())
    }

    /// Changes a customer's details. Options left out keep their current value.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn customer_edit(
        ctx: Context<'_>,
        #[description = "Customer"]
        #[autocomplete = "autocomplete::autocomplete_customer"]
        customer_id: i64,
        #[description = "First name"] first_name: Option<String>,
        #[description = "Last name"] last_name: Option<String>,
        #[description = "Phone number"] phone: Option<String>,
        #[description = "Email address"] email: Option<String>,
        #[description = "First line of the address"] first_line_address: Option<String>,
        #[description = "Second line of the address"] second_line_address: Option<String>,
        #[description = "Town or city"] city: Option<String>,
        #[description = "County"] county: Option<String>,
        #[description = "Postal code"] postal_code: Option<String>,
        #[description = "How they heard about us"] referral: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let existing = customer::get_customer_by_id(db, customer_id)
            .await?
            .ok_or(Error::CustomerNotFound { id: customer_id })?;

        let form = CustomerForm {
            first_name: first_name.unwrap_or(existing.first_name),
            last_name: last_name.unwrap_or(existing.last_name),
            phone: phone.unwrap_or(existing.phone),
            email: email.unwrap_or(existing.email),
            first_line_address: first_line_address.unwrap_or(existing.first_line_address),
            second_line_address: second_line_address.or(existing.second_line_address),
            city: city.unwrap_or(existing.city),
            county: county.unwrap_or(existing.county),
            postal_code: postal_code.unwrap_or(existing.postal_code),
            referral: referral.or(existing.referral),
        };
        let updated = customer::update_customer(db, customer_id, form).await?;

        ctx.say(format!("✅ Updated {}", customer_line(&updated)))
            .await?;
        Ok(())
    }

    /// Deactivates a customer. Their record and jobs are kept.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn customer_delete(
        ctx: Context<'_>,
        #[description = "Customer"]
        #[autocomplete = "autocomplete::autocomplete_customer"]
        customer_id: i64,
    ) -> Result<()> {
        let removed = customer::deactivate_customer(&ctx.data().database, customer_id).await?;
        ctx.say(format!(
            "🗑️ **{}** is now inactive. Use `/customer restore` to bring them back.",
            removed.full_name()
        ))
        .await?;
        Ok(())
    }

    /// Reactivates a deleted customer.
    #[poise::command(slash_command, rename = "restore")]
    pub async fn customer_restore(
        ctx: Context<'_>,
        #[description = "Customer ID"] customer_id: i64,
    ) -> Result<()> {
        let restored = customer::reactivate_customer(&ctx.data().database, customer_id).await?;
        ctx.say(format!("♻️ **{}** is active again.", restored.full_name()))
            .await?;
        Ok(())
    }

    /// Lists active customers, optionally filtered by name, phone or postal code.
    #[poise::command(slash_command, rename = "list")]
    pub async fn customer_list(
        ctx: Context<'_>,
        #[description = "Search by name, phone or postal code"] search: Option<String>,
        #[description = "Include inactive customers (ignored when searching)"]
        include_inactive: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let customers = match search.as_deref() {
            Some(partial) if !partial.trim().is_empty() => {
                customer::search_customers(db, partial).await?
            }
            _ if include_inactive.unwrap_or(false) => customer::list_all_customers(db).await?,
            _ => customer::list_active_customers(db).await?,
        };

        if customers.is_empty() {
            ctx.say("📇 No customers found. Add one with `/customer add`.")
                .await?;
            return Ok(());
        }

        let mut response = format!("📇 **Customers** ({})\n\n", customers.len());
        for c in &customers {
            writeln!(&mut response, "{}", customer_line(c))?;
        }

        ctx.say(truncate_message(response)).await?;
        Ok(())
    }

    /// Shows a customer's details and their jobs.
    #[poise::command(slash_command, rename = "info")]
    pub async fn customer_info(
        ctx: Context<'_>,
        #[description = "Customer"]
        #[autocomplete = "autocomplete::autocomplete_customer"]
        customer_id: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let found = customer::get_customer_by_id(&data.database, customer_id)
            .await?
            .ok_or(Error::CustomerNotFound { id: customer_id })?;
        let jobs =
            job::list_jobs_for_customer(&data.database, customer_id, data.config.list_policy())
                .await?;

        let mut response = format!("👤 **{}** (#{})\n", found.full_name(), found.id);
        if !found.is_active {
            writeln!(&mut response, "_Inactive_")?;
        }
        writeln!(&mut response, "📞 {}", found.phone)?;
        writeln!(&mut response, "✉️ {}", found.email)?;
        writeln!(&mut response, "🏠 {}", found.first_line_address)?;
        if let Some(line) = &found.second_line_address {
            writeln!(&mut response, "    {line}")?;
        }
        writeln!(
            &mut response,
            "    {}, {}, {}",
            found.city, found.county, found.postal_code
        )?;
        if let Some(referral) = &found.referral {
            writeln!(&mut response, "Referral: {referral}")?;
        }
        writeln!(&mut response)?;

        if jobs.is_empty() {
            response.push_str("_No jobs yet_\n");
        } else {
            response.push_str("**Jobs:**\n");
            for j in &jobs {
                writeln!(&mut response, "• {}", job_line(j))?;
            }
        }

        ctx.say(truncate_message(response)).await?;
        Ok(())
    }
}

pub use inner::*;
