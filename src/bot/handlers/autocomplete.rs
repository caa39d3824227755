//! Autocomplete handlers for Discord slash command parameters.
//!
//! Vocabulary parameters (job status, type, priority and invoice status) suggest their
//! fixed labels; customer parameters suggest matching active customers.

use crate::{
    bot::Context,
    core::customer,
    entities::{InvoiceStatus, JobPriority, JobStatus, JobType, status::labels},
};
use poise::serenity_prelude::AutocompleteChoice;
use sea_orm::{ActiveEnum, Iterable};

fn matching_labels<T>(partial: &str) -> Vec<String>
where
    T: ActiveEnum<Value = String> + Iterable,
{
    let partial_lower = partial.to_lowercase();
    labels::<T>()
        .into_iter()
        .filter(|label| label.to_lowercase().contains(&partial_lower))
        .collect()
}

/// Suggests job statuses.
pub async fn autocomplete_job_status(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching_labels::<JobStatus>(partial)
}

/// Suggests job types.
pub async fn autocomplete_job_type(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching_labels::<JobType>(partial)
}

/// Suggests job priorities.
pub async fn autocomplete_job_priority(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching_labels::<JobPriority>(partial)
}

/// Suggests the statuses an existing invoice can be moved to.
pub async fn autocomplete_invoice_status(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    <InvoiceStatus as Iterable>::iter()
        .filter(|status| status.applies_to_invoice())
        .map(|status| status.to_value())
        .filter(|label| label.to_lowercase().contains(&partial_lower))
        .collect()
}

/// Suggests active customers by name, phone or postal code, answering with their ID.
pub async fn autocomplete_customer(ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let Ok(customers) = customer::search_customers(&ctx.data().database, partial).await else {
        return Vec::new();
    };

    customers
        .into_iter()
        .take(25) // Discord autocomplete limit
        .map(|c| {
            AutocompleteChoice::new(format!("{} ({})", c.full_name(), c.postal_code), c.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_labels() {
        assert_eq!(matching_labels::<JobStatus>("prog"), vec!["In Progress"]);
        assert_eq!(matching_labels::<JobStatus>("").len(), 4);
        assert_eq!(matching_labels::<JobPriority>("HIGH"), vec!["High"]);
        assert!(matching_labels::<JobType>("boiler").is_empty());
    }
}
