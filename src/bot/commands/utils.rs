//! Helpers shared by the command modules: argument parsing and reply formatting.

use crate::{
    bot::Context,
    core::report::format_money,
    entities::{CustomerModel, InvoiceModel, JobModel},
    errors::{Error, Result},
};
use chrono::NaiveDate;

/// Discord rejects messages longer than this many characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Parses a `YYYY-MM-DD` date typed into a command.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| Error::InvalidChoice {
        kind: "date (expected YYYY-MM-DD)",
        value: input.to_string(),
    })
}

/// Parses an optional date argument; a missing or blank value is `None`.
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

/// Cuts `text` to fit in one Discord message, marking the cut.
#[must_use]
pub fn truncate_message(text: String) -> String {
    if text.chars().count() <= MESSAGE_LIMIT {
        return text;
    }
    let mut cut: String = text.chars().take(MESSAGE_LIMIT - 2).collect();
    cut.push_str("\n…");
    cut
}

/// Sends a reply only the caller can see.
pub async fn reply_private(ctx: Context<'_>, text: impl Into<String>) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(truncate_message(text.into()))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// One-line summary of a customer for listings.
#[must_use]
pub fn customer_line(customer: &CustomerModel) -> String {
    let marker = if customer.is_active { "" } else { " (inactive)" };
    format!(
        "#{} **{}**{marker} - {} - {}",
        customer.id,
        customer.full_name(),
        customer.phone,
        customer.postal_code
    )
}

/// One-line summary of a job for listings.
#[must_use]
pub fn job_line(job: &JobModel) -> String {
    let planned = job
        .planned_date
        .map_or_else(String::new, |date| format!(" - planned {date}"));
    format!(
        "#{} [{}] {} ({}, {} priority) - invoice: {}{planned}",
        job.id, job.job_status, job.description, job.job_type, job.priority, job.invoice_status
    )
}

/// One-line summary of an invoice for listings.
#[must_use]
pub fn invoice_line(invoice: &InvoiceModel, total: f64) -> String {
    format!(
        "Invoice #{} for job #{} - {} - {} - due {}",
        invoice.id,
        invoice.job_id,
        invoice.status,
        format_money(total),
        invoice.due_date
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(
            parse_date("29/02/2024"),
            Err(Error::InvalidChoice { .. })
        ));
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert!(parse_optional_date(Some("2024-01-01")).unwrap().is_some());
    }

    #[test]
    fn test_truncate_message() {
        let short = "hello".to_string();
        assert_eq!(truncate_message(short.clone()), short);

        let long = "x".repeat(MESSAGE_LIMIT + 50);
        let cut = truncate_message(long);
        assert_eq!(cut.chars().count(), MESSAGE_LIMIT);
        assert!(cut.ends_with('…'));
    }
}
