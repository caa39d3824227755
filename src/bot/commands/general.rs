//! General Discord commands - ping and help.
//! These commands need no login and no database access.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**CB Plumbing Help**\n\
        Log in once with `/account login`; every other command needs it.\n\n\
        **Account**\n\
        • `/account register|login|logout`\n\n\
        **Customers**\n\
        • `/customer add|edit|delete|restore|list|info`\n\n\
        **Jobs**\n\
        • `/job add|edit|status|cancel|list|info`\n\
        • `/item add|edit|remove` - line items on an open job\n\n\
        **Invoices**\n\
        • `/invoice issue|status|edit|list|info` - one invoice per job\n\n\
        **Reports**\n\
        • `/dashboard` - customers, jobs by status and money owed\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
