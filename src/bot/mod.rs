//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the CB Plumbing ledger,
//! including all slash commands, autocomplete handlers, the login gate and bot context.

/// Discord command implementations (account, customer, job, item, invoice, report, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, login checks)
pub mod handlers;

use crate::{config::app::AppConfig, errors::Error};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the loaded configuration.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Company, listing and security settings
    pub config: AppConfig,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and config.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: AppConfig) -> Self {
        Self { database, config }
    }
}

/// Context type every command receives.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = if error.is_notice() {
                warn!(command = %ctx.command().qualified_name, %error, "Command rejected");
                format!("❌ {error}")
            } else {
                error!(command = %ctx.command().qualified_name, ?error, "Command failed");
                "❌ An error occurred. Please try again later.".to_string()
            };
            if let Err(e) = ctx
                .send(poise::CreateReply::default().content(reply).ephemeral(true))
                .await
            {
                error!("Failed to send error message: {e}");
            }
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                error!(?error, "Login check failed");
            }
            let reply = poise::CreateReply::default()
                .content("🔒 You need to log in first. Use `/account login`.")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send login notice: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every command the bot registers. All of them are slash commands.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::account(),
        commands::customer(),
        commands::job(),
        commands::item(),
        commands::invoice(),
        commands::dashboard(),
    ]
}

/// Builds the poise framework and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the connection fails.
pub async fn run_bot(
    token: String,
    database: DatabaseConnection,
    config: AppConfig,
) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            command_check: Some(|ctx| Box::pin(handlers::checks::require_login(ctx))),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))
}

pub use commands::*;
pub use handlers::*;
