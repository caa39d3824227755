//! Login gate for Discord commands.
//!
//! Every command except the account commands, `/ping` and `/help` requires the caller's
//! Discord account to be linked to an office user through `/account login`.

use crate::{
    bot::Context,
    core::user,
    entities::user::Model as UserModel,
    errors::Result,
};

const OPEN_COMMANDS: [&str; 3] = ["ping", "help", "account"];

fn is_open(qualified_name: &str) -> bool {
    let root = qualified_name.split_whitespace().next().unwrap_or_default();
    OPEN_COMMANDS.contains(&root)
}

/// Finds the office user the caller is logged in as.
pub async fn logged_in_user(ctx: Context<'_>) -> Result<Option<UserModel>> {
    let discord_id = ctx.author().id.to_string();
    user::get_user_by_discord_id(&ctx.data().database, &discord_id).await
}

/// Global command check: lets the command run if it is open or the caller is logged in.
pub async fn require_login(ctx: Context<'_>) -> Result<bool> {
    if is_open(&ctx.command().qualified_name) {
        return Ok(true);
    }
    Ok(logged_in_user(ctx).await?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_commands() {
        assert!(is_open("ping"));
        assert!(is_open("account login"));
        assert!(is_open("account register"));
        assert!(!is_open("customer add"));
        assert!(!is_open("invoice issue"));
        assert!(!is_open("accounts"));
    }
}
