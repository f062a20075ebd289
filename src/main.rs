use clap::Parser;
use helmsman::cli::{self, Cli};
use helmsman::config::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    let config = match Config::resolve(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();

    tokio::select! {
        result = cli::run(args.command, &config) => {
            if let Err(e) = result {
                error!(error = %e, "command failed");
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
}
