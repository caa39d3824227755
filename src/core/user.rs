//! Office users - registration, password login and the Discord account binding.
//!
//! Passwords are hashed with bcrypt on a blocking thread. A Discord account is bound to at
//! most one user at a time; logging in from Discord moves the binding to the new user.

use crate::{
    core::forms::Registration,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};
use validator::Validate;

/// Hashes `password` with bcrypt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// Checks `password` against a stored bcrypt hash.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

/// Finds a user by login name.
pub async fn get_user_by_username<C>(db: &C, username: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the user a Discord account is logged in as, if any.
pub async fn get_user_by_discord_id<C>(db: &C, discord_id: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::DiscordId.eq(discord_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new office user.
///
/// # Errors
/// - `Error::Validation` for a blank username, malformed email, short password or
///   mismatched confirmation
/// - `Error::DuplicateUsername` / `Error::DuplicateEmail` if either is already registered
#[instrument(skip(db, form), fields(username = %form.username))]
pub async fn register_user(
    db: &DatabaseConnection,
    form: Registration,
    bcrypt_cost: u32,
) -> Result<user::Model> {
    let form = form.normalized();
    form.validate()?;

    if get_user_by_username(db, &form.username).await?.is_some() {
        return Err(Error::DuplicateUsername {
            username: form.username,
        });
    }
    let email_taken = User::find()
        .filter(user::Column::Email.eq(form.email.as_str()))
        .one(db)
        .await?
        .is_some();
    if email_taken {
        return Err(Error::DuplicateEmail { email: form.email });
    }

    let password_hash = hash_password(&form.password, bcrypt_cost).await?;

    let new_user = user::ActiveModel {
        username: Set(form.username.clone()),
        email: Set(form.email.clone()),
        password_hash: Set(password_hash),
        discord_id: Set(None),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    // A concurrent registration can still win the race past the checks above
    let created = new_user.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains("email") => {
            Error::DuplicateEmail {
                email: form.email.clone(),
            }
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateUsername {
            username: form.username.clone(),
        },
        _ => Error::from(e),
    })?;

    info!(user_id = created.id, "User registered");
    Ok(created)
}

/// Checks a username and password pair.
///
/// # Errors
/// Returns `Error::InvalidCredentials` for an unknown username or wrong password, without
/// saying which.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let Some(found) = get_user_by_username(db, username).await? else {
        warn!(username, "Login attempt for unknown user");
        return Err(Error::InvalidCredentials);
    };

    if !verify_password(password, &found.password_hash).await? {
        warn!(username, "Login attempt with wrong password");
        return Err(Error::InvalidCredentials);
    }

    Ok(found)
}

/// Binds a Discord account to a user, taking it away from whoever held it before.
///
/// # Errors
/// Returns `Error::UserNotFound` if the user does not exist.
#[instrument(skip(db))]
pub async fn link_discord_account(
    db: &DatabaseConnection,
    user_id: i64,
    discord_id: &str,
) -> Result<user::Model> {
    let txn = db.begin().await?;

    let target = User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    if target.discord_id.as_deref() == Some(discord_id) {
        return Ok(target);
    }

    if let Some(previous) = get_user_by_discord_id(&txn, discord_id).await? {
        let mut active_previous: user::ActiveModel = previous.into();
        active_previous.discord_id = Set(None);
        active_previous.update(&txn).await?;
    }

    let mut active_target: user::ActiveModel = target.into();
    active_target.discord_id = Set(Some(discord_id.to_owned()));
    let linked = active_target.update(&txn).await?;

    txn.commit().await?;

    info!(user_id, "Discord account linked");
    Ok(linked)
}

/// Logs a Discord account out. Returns the user it was bound to, if any.
pub async fn unlink_discord_account(
    db: &DatabaseConnection,
    discord_id: &str,
) -> Result<Option<user::Model>> {
    let Some(current) = get_user_by_discord_id(db, discord_id).await? else {
        return Ok(None);
    };

    let mut active_model: user::ActiveModel = current.into();
    active_model.discord_id = Set(None);
    let updated = active_model.update(db).await?;

    info!(user_id = updated.id, "Discord account unlinked");
    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_hash_and_verify_password() -> Result<()> {
        let hash = hash_password("hunter2hunter2", TEST_BCRYPT_COST).await?;
        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash).await?);
        assert!(!verify_password("hunter3hunter3", &hash).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_user_validation() -> Result<()> {
        // Validation fails before any query is made
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = register_user(
            &db,
            Registration {
                password_confirmation: "something else".to_string(),
                ..test_registration("office")
            },
            TEST_BCRYPT_COST,
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_password_over_bcrypt_limit() -> Result<()> {
        let db = setup_test_db().await?;
        let password = "é".repeat(40);

        let result = register_user(
            &db,
            Registration {
                password: password.clone(),
                password_confirmation: password,
                ..test_registration("office")
            },
            TEST_BCRYPT_COST,
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(get_user_by_username(&db, "office").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_register_user_stores_hash_only() -> Result<()> {
        let db = setup_test_db().await?;
        let form = test_registration("office");
        let password = form.password.clone();

        let user = register_user(&db, form, TEST_BCRYPT_COST).await?;
        assert_eq!(user.username, "office");
        assert_ne!(user.password_hash, password);
        assert!(user.discord_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_username_and_email() -> Result<()> {
        let db = setup_test_db().await?;
        register_test_user(&db, "office").await?;

        let same_name = register_user(
            &db,
            Registration {
                email: "another@example.com".to_string(),
                ..test_registration("office")
            },
            TEST_BCRYPT_COST,
        )
        .await;
        assert!(matches!(same_name, Err(Error::DuplicateUsername { .. })));

        let same_email = register_user(
            &db,
            Registration {
                email: "office@example.com".to_string(),
                ..test_registration("accounts")
            },
            TEST_BCRYPT_COST,
        )
        .await;
        assert!(matches!(same_email, Err(Error::DuplicateEmail { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_test_user(&db, "office").await?;

        let ok = authenticate(&db, "office", TEST_PASSWORD).await?;
        assert_eq!(ok.id, user.id);

        let wrong = authenticate(&db, "office", "not the password").await;
        assert!(matches!(wrong, Err(Error::InvalidCredentials)));

        let unknown = authenticate(&db, "nobody", TEST_PASSWORD).await;
        assert!(matches!(unknown, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_discord_binding_moves_between_users() -> Result<()> {
        let db = setup_test_db().await?;
        let first = register_test_user(&db, "office").await?;
        let second = register_test_user(&db, "accounts").await?;

        link_discord_account(&db, first.id, "1234").await?;
        let bound = get_user_by_discord_id(&db, "1234").await?.unwrap();
        assert_eq!(bound.id, first.id);

        link_discord_account(&db, second.id, "1234").await?;
        let bound = get_user_by_discord_id(&db, "1234").await?.unwrap();
        assert_eq!(bound.id, second.id);

        let first = get_user_by_username(&db, "office").await?.unwrap();
        assert!(first.discord_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_link_unknown_user() -> Result<()> {
        let db = setup_test_db().await?;
        let result = link_discord_account(&db, 99, "1234").await;
        assert!(matches!(result, Err(Error::UserNotFound { id: 99 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_unlink_discord_account() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_test_user(&db, "office").await?;
        link_discord_account(&db, user.id, "1234").await?;

        let unlinked = unlink_discord_account(&db, "1234").await?.unwrap();
        assert_eq!(unlinked.id, user.id);
        assert!(get_user_by_discord_id(&db, "1234").await?.is_none());

        // Logging out twice is harmless
        assert!(unlink_discord_account(&db, "1234").await?.is_none());
        Ok(())
    }
}
