use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use trackwell::adapter::inbound::cli::{self, command::Cli, output};
use trackwell::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!(config = %cli.config.display(), "trackwell starting");

    let command = cli.command;
    let task = tokio::task::spawn_blocking(move || {
        let mut stdout = std::io::stdout().lock();
        cli::execute(command, &config, &mut stdout)
    });

    tokio::select! {
        result = task => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "Command failed");
                    output::error(&e.to_string());
                    std::process::exit(1);
                }
                Err(e) => {
                    error!(error = %e, "Command panicked");
                    std::process::exit(1);
                }
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            std::process::exit(130);
        }
    }
}
