//! Admin account seeder.
//!
//! Creates the administrator account from `ADMIN_EMAIL` / `ADMIN_PASSWORD`
//! (defaults: admin@example.com / admin123). Run once after migrations:
//!
//! ```text
//! cargo run -p api-server --bin seed
//! ```

use std::env;
use std::error::Error;

use quill_infra::auth::Argon2PasswordService;
use quill_infra::database::{DatabaseConfig, DatabaseConnections, PostgresUserRepository, seed};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let url = env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL must be set to seed the admin account")?;
    let config = DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
    };
    let connections = DatabaseConnections::init(&config).await?;

    let users = PostgresUserRepository::new(connections.main);
    let passwords = Argon2PasswordService::new();

    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    seed::ensure_admin(&users, &passwords, &email, &password).await?;

    Ok(())
}
