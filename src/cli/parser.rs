//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Environment as AppEnvironment;

/// User microservice with an order-service side-call
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(about = "CRUD user microservice backed by PostgreSQL")]
#[command(long_about = "
user-service exposes create/read/update/delete endpoints for user records
under /users and forwards order lookups to a separate order service.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    user-service serve

    # Bind to all interfaces on a custom port
    user-service serve --host 0.0.0.0 --port 8080

    # Use one explicit configuration file
    user-service --config /etc/user-service/production.toml serve

    # Check configuration without starting the server
    user-service serve --dry-run

    # Apply, preview or revert embedded migrations
    user-service migrate
    user-service migrate --dry-run
    user-service migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads this single TOML file instead of the layered `config/` directory.
    /// Environment variable overrides still apply.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `config/{environment}.toml` overlay, taking precedence over
    /// USER_SERVICE_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Host address to bind to, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (1-65535)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the given number of most recent migrations (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        Ok(())
    }

    /// True when the selected command only validates configuration.
    pub fn is_dry_run(&self) -> bool {
        matches!(
            self.command,
            Some(Commands::Serve { dry_run: true, .. }) | Some(Commands::Migrate { dry_run: true, .. })
        )
    }
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Test => AppEnvironment::Test,
            Environment::Staging => AppEnvironment::Staging,
            Environment::Production => AppEnvironment::Production,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["user-service"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "user-service",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--log-level",
            "debug",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9090));
                assert_eq!(log_level, Some(LogLevel::Debug));
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_rejects_port_zero() {
        assert!(Cli::try_parse_from(["user-service", "serve", "--port", "0"]).is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["user-service", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_migrate_dry_run_and_rollback_conflict() {
        let result =
            Cli::try_parse_from(["user-service", "migrate", "--dry-run", "--rollback", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_migrate_rollback_bounds() {
        assert!(Cli::try_parse_from(["user-service", "migrate", "--rollback", "0"]).is_err());
        assert!(Cli::try_parse_from(["user-service", "migrate", "--rollback", "101"]).is_err());

        let cli = Cli::try_parse_from(["user-service", "migrate", "--rollback", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(3)
            })
        ));
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["user-service", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));

        let cli = Cli::try_parse_from(["user-service", "--env", "stage"]).unwrap();
        assert_eq!(
            AppEnvironment::from(cli.env.unwrap()),
            AppEnvironment::Staging
        );
    }

    #[test]
    fn test_is_dry_run() {
        let cli = Cli::try_parse_from(["user-service", "serve", "--dry-run"]).unwrap();
        assert!(cli.is_dry_run());

        let cli = Cli::try_parse_from(["user-service", "migrate"]).unwrap();
        assert!(!cli.is_dry_run());
    }

    #[test]
    fn test_log_level_into_string() {
        assert_eq!(String::from(LogLevel::Warn), "warn");
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }
}
