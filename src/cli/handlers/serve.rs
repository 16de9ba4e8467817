//! Serve command handler
//!
//! Only the dry-run path lives here; starting the server is left to
//! `main`, which owns the runtime and the logger handle.

use crate::config::settings::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and report what the server would use.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Request timeout: {}s",
            self.config.server.request_timeout
        );
        println!(
            "✓ Database pool: {}-{} connections{}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            if self.config.database.auto_migrate {
                ", migrations applied on startup"
            } else {
                ""
            }
        );
        println!(
            "✓ Order service: {} (timeout {}s, connect {}s)",
            self.config.order_service.base_url,
            self.config.order_service.timeout,
            self.config.order_service.connect_timeout
        );
        println!("✓ Log level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/users_test".to_string();
        config
    }

    #[test]
    fn test_serve_handler_keeps_config() {
        let config = valid_config();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[test]
    fn test_dry_run_accepts_valid_config() {
        assert!(ServeCommandHandler::new(valid_config()).validate_only().is_ok());
    }

    #[test]
    fn test_dry_run_rejects_invalid_config() {
        let mut config = valid_config();
        config.order_service.base_url = "not a url".to_string();
        assert!(ServeCommandHandler::new(config).validate_only().is_err());
    }
}
