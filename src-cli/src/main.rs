//! text-search - search, highlight and replace text from the terminal

mod cli;
mod commands;
mod output;
mod shell;
mod state;

use clap::Parser;
use edit_engine::EditError;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for results
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    tracing::debug!("Parsed arguments: {:?}", cli);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Session errors were already shown by the notifier
            if e.downcast_ref::<EditError>().is_none() {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
