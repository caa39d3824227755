//! Report Discord commands - the office dashboard.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::report::{self, format_money},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Shows active customers, jobs by status and money owed.
    #[poise::command(slash_command)]
    pub async fn dashboard(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let summary = report::dashboard(&data.database).await?;

        let mut jobs_field = String::new();
        for (status, count) in &summary.jobs_by_status {
            writeln!(&mut jobs_field, "**{status}:** {count}")?;
        }

        let money_field = format!(
            "**Outstanding:** {} across {} invoice{}\n**Paid:** {} across {} invoice{}",
            format_money(summary.outstanding_value),
            summary.outstanding_invoices,
            if summary.outstanding_invoices == 1 { "" } else { "s" },
            format_money(summary.paid_value),
            summary.paid_invoices,
            if summary.paid_invoices == 1 { "" } else { "s" },
        );

        let embed = serenity::CreateEmbed::default()
            .title(format!("📊 {} Dashboard", data.config.company.name))
            .description(format!(
                "As of {} | {} active customer{}",
                crate::core::today(),
                summary.active_customers,
                if summary.active_customers == 1 { "" } else { "s" }
            ))
            .color(0x0034_98DB) // Blue color
            .field("Jobs", jobs_field, true)
            .field("Invoices", money_field, true);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
