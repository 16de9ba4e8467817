//! Migrate command handler

use crate::config::settings::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Preview, apply or revert embedded migrations against the configured
    /// database.
    ///
    /// # Errors
    /// - Database configuration is invalid
    /// - The database cannot be reached or a migration fails
    /// - More steps are requested than migrations are applied
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        match (dry_run, rollback) {
            (true, _) => {
                println!("Checking for pending migrations...");
                let pending = pending_migrations(url).await?;
                if pending.is_empty() {
                    println!("✓ No pending migrations - database is up to date");
                } else {
                    println!("Found {} pending migration(s):", pending.len());
                    for name in &pending {
                        println!("  - {}", name);
                    }
                    println!("\nRun without --dry-run to apply them");
                }
            }
            (false, Some(steps)) => {
                println!("Rolling back {} migration(s)...", steps);
                let reverted = revert_migrations(url, steps).await?;
                println!("✓ Reverted {} migration(s)", reverted);
            }
            (false, None) => {
                println!("Running database migrations...");
                let applied = run_pending_migrations(url).await?;
                if applied.is_empty() {
                    println!("✓ No migrations to apply - database is already up to date");
                } else {
                    println!("✓ Applied {} migration(s):", applied.len());
                    for version in &applied {
                        println!("  - {}", version);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_migrate_rejects_invalid_database_url() {
        let mut config = Settings::default();
        config.database.url = "mysql://localhost/users".to_string();

        let result = MigrateCommandHandler::new(config).execute(true, None).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_migrate_rejects_missing_database_url() {
        let result = MigrateCommandHandler::new(Settings::default())
            .execute(false, None)
            .await;
        assert!(result.is_err());
    }
}
