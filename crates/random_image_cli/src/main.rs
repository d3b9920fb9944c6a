//! random-image: fetch a random stock photo from the command line.
//!
//! Usage:
//!   random-image fetch -q "sunset" -w 1920 -H 1080
//!   random-image fetch -p pexels --download ./wallpapers

mod args;
mod env;
mod fetch;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};

/// Filter directives for the stderr log, e.g. `RANDOM_IMAGE_LOG=random_image=debug`.
const LOG_ENV: &str = "RANDOM_IMAGE_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dotenv = env::load_dotenv();
    init_tracing();
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let result = match cli.command {
        Command::Fetch(args) => fetch::execute(args, env::keys_from_env()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());

            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {cause}");
            }

            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
