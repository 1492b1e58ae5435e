use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use user_api::config::build_manager;
use user_api::{Api, ApiResult, Config, SeedStore, User};

/// Fetch or update a user on the backend at $USER_API_BASE_URL.
#[derive(Debug, Parser)]
#[command(name = "user-cli")]
struct Cli {
    /// Answer from seeded JSON in the environment instead of the network.
    ///
    /// Accepted here so clap does not reject it; `Config::from_env` reads it
    /// from the raw launch arguments.
    #[arg(long = "ui-testing", global = true)]
    _ui_testing: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the user with the given id.
    Get { user_id: String },
    /// Replace a user's fields and print the stored copy.
    Update {
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        description: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("invalid configuration")?;
    let api = Api::new(build_manager(&config, SeedStore::from_env()));

    let (tx, rx) = mpsc::channel::<ApiResult<User>>();
    match cli.command {
        Command::Get { user_id } => api.get_user_info(&user_id, move |result| {
            let _ = tx.send(result);
        }),
        Command::Update {
            user_id,
            name,
            email,
            description,
        } => {
            let user = User::new(user_id, name, email, description);
            api.update_user_info(&user, move |result| {
                let _ = tx.send(result);
            });
        }
    }

    match rx.recv().context("request finished without a result")? {
        Ok(user) => {
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        Err(err) => {
            error!(domain = %err.domain, code = err.code, message = %err.message, "request failed");
            bail!(err)
        }
    }
}
