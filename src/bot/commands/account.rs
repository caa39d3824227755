//! Account Discord commands - registering office users and binding Discord accounts.
//!
//! All replies are ephemeral since they carry credentials or account details.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::utils::reply_private},
        core::{forms::Registration, user},
        errors::Result,
    };

    /// Office user accounts. Run a subcommand to register, log in or log out.
    #[poise::command(
        slash_command,
        subcommands("account_register", "account_login", "account_logout")
    )]
    pub async fn account(ctx: Context<'_>) -> Result<()> {
        reply_private(
            ctx,
            "Account commands:\n\
            `/account register` - Create an office user\n\
            `/account login` - Link your Discord account to an office user\n\
            `/account logout` - Unlink your Discord account",
        )
        .await
    }

    /// Creates a new office user.
    #[poise::command(slash_command, rename = "register", ephemeral)]
    pub async fn account_register(
        ctx: Context<'_>,
        #[description = "Login name"] username: String,
        #[description = "Email address"] email: String,
        #[description = "Password (at least 8 characters)"] password: String,
        #[description = "Type the password again"] password_confirmation: String,
    ) -> Result<()> {
        let data = ctx.data();
        let created = user::register_user(
            &data.database,
            Registration {
                username,
                email,
                password,
                password_confirmation,
            },
            data.config.security.bcrypt_cost,
        )
        .await?;

        reply_private(
            ctx,
            format!(
                "✅ Registered **{}**. Use `/account login` to start working.",
                created.username
            ),
        )
        .await
    }

    /// Logs in: links your Discord account to an office user.
    #[poise::command(slash_command, rename = "login", ephemeral)]
    pub async fn account_login(
        ctx: Context<'_>,
        #[description = "Login name"] username: String,
        #[description = "Password"] password: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let found = user::authenticate(db, &username, &password).await?;
        user::link_discord_account(db, found.id, &ctx.author().id.to_string()).await?;

        reply_private(ctx, format!("🔓 Logged in as **{}**.", found.username)).await
    }

    /// Logs out: unlinks your Discord account.
    #[poise::command(slash_command, rename = "logout", ephemeral)]
    pub async fn account_logout(ctx: Context<'_>) -> Result<()> {
        let discord_id = ctx.author().id.to_string();
        let reply = match user::unlink_discord_account(&ctx.data().database, &discord_id).await? {
            Some(previous) => format!("🔒 Logged out of **{}**.", previous.username),
            None => "You were not logged in.".to_string(),
        };
        reply_private(ctx, reply).await
    }
}

pub use inner::*;
