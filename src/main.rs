use clap::Parser;

use user_service::cli::{
    Cli, CommandOutcome, execute_command, init_logger_from_settings, load_and_merge_config,
};
use user_service::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    // Keep the handle alive for the lifetime of the process
    let _log_handle = init_logger_from_settings(&settings)?;

    match execute_command(&cli, settings.clone()).await? {
        CommandOutcome::StartServer => Server::new(settings).run().await,
        CommandOutcome::Completed => Ok(()),
    }
}
