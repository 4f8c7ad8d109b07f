//! Administrator account provisioning.
//!
//! Registration only ever produces regular users; the admin account is
//! created out of band, from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.

use quill_core::domain::{Role, User};
use quill_core::error::RepoError;
use quill_core::ports::{AuthError, BaseRepository, PasswordService, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Outcome of [`ensure_admin`].
#[derive(Debug)]
pub enum AdminProvision {
    Created(User),
    AlreadyPresent(User),
}

/// Create the admin account if no user holds its email yet. Idempotent:
/// re-running against an existing account changes nothing.
pub async fn ensure_admin(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    email: &str,
    password: &str,
) -> Result<AdminProvision, SeedError> {
    if let Some(existing) = users.find_by_email(email).await? {
        tracing::info!(user_id = %existing.id, "Admin account already present");
        return Ok(AdminProvision::AlreadyPresent(existing));
    }

    let password_hash = passwords.hash(password)?;
    let admin = users
        .insert(User::with_role(email.to_owned(), password_hash, Role::Admin))
        .await?;
    tracing::info!(user_id = %admin.id, "Admin account created");

    Ok(AdminProvision::Created(admin))
}

#[cfg(all(test, feature = "auth"))]
mod tests {
    use super::*;
    use crate::auth::Argon2PasswordService;
    use crate::database::InMemoryUserRepository;

    #[tokio::test]
    async fn test_ensure_admin_creates_admin_account() {
        let users = InMemoryUserRepository::new();
        let passwords = Argon2PasswordService::new();

        let outcome = ensure_admin(&users, &passwords, "admin@quill.dev", "s3cret-admin")
            .await
            .unwrap();

        let admin = match outcome {
            AdminProvision::Created(user) => user,
            other => panic!("expected a created account, got {:?}", other),
        };
        assert_eq!(admin.role, Role::Admin);
        assert!(
            passwords
                .verify("s3cret-admin", &admin.password_hash)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let users = InMemoryUserRepository::new();
        let passwords = Argon2PasswordService::new();

        let first = ensure_admin(&users, &passwords, "admin@quill.dev", "s3cret-admin")
            .await
            .unwrap();
        let first_id = match first {
            AdminProvision::Created(user) => user.id,
            other => panic!("expected a created account, got {:?}", other),
        };

        let second = ensure_admin(&users, &passwords, "admin@quill.dev", "different")
            .await
            .unwrap();
        match second {
            AdminProvision::AlreadyPresent(user) => assert_eq!(user.id, first_id),
            other => panic!("expected the existing account, got {:?}", other),
        }
    }
}
