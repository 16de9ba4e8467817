//! Merges CLI flags over file and environment configuration.
//!
//! CLI arguments sit at the top of the precedence chain, so the base settings
//! are loaded unvalidated and only checked once the overrides are applied.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration selected by `--config` and `--env`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the sources cannot be read or parsed.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path.clone()),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Apply CLI overrides to a copy of the base configuration and validate
    /// the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);
        if let Some(command) = &cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        if let Commands::Serve {
            host,
            port,
            log_level,
            ..
        } = command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            // Command-level level beats -v/-q
            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/users_test".to_string();
        config
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_flags_keeps_base_values() {
        let base = valid_base_config();
        let merger = ConfigurationMerger::new(base.clone());

        let merged = merger.merge_cli_args(&parse(&["user-service"])).unwrap();
        assert_eq!(merged, base);
        assert_eq!(merger.config(), &base);
    }

    #[test]
    fn test_verbose_and_quiet_adjust_level() {
        let merger = ConfigurationMerger::new(valid_base_config());

        let merged = merger.merge_cli_args(&parse(&["user-service", "-v"])).unwrap();
        assert_eq!(merged.logger.level, "debug");

        let merged = merger.merge_cli_args(&parse(&["user-service", "-q"])).unwrap();
        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn test_serve_overrides_host_port_and_level() {
        let merger = ConfigurationMerger::new(valid_base_config());
        let cli = parse(&[
            "user-service",
            "-q",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--log-level",
            "trace",
        ]);

        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9000);
        assert_eq!(merged.logger.level, "trace");
    }

    #[test]
    fn test_migrate_leaves_server_untouched() {
        let base = valid_base_config();
        let merger = ConfigurationMerger::new(base.clone());

        let merged = merger
            .merge_cli_args(&parse(&["user-service", "migrate", "--dry-run"]))
            .unwrap();
        assert_eq!(merged.server, base.server);
    }

    #[test]
    fn test_merge_validates_result() {
        // Default settings carry no database URL
        let merger = ConfigurationMerger::new(Settings::default());
        let err = merger
            .merge_cli_args(&parse(&["user-service", "serve"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_cli_can_repair_invalid_base_port() {
        let mut base = valid_base_config();
        base.server.port = 0;
        let merger = ConfigurationMerger::new(base);

        let merged = merger
            .merge_cli_args(&parse(&["user-service", "serve", "--port", "8081"]))
            .unwrap();
        assert_eq!(merged.server.port, 8081);
    }
}
