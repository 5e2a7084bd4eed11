use clap::{Parser, Subcommand};
use colored::*;
use onboard_cli::{logging, Config};
use std::process;

mod cli;

#[derive(Parser)]
#[command(name = "onboard")]
#[command(about = "Onboard - conversational onboarding client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal UI (default)
    Tui,
    /// Log in without the UI and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// Print the conversation steps as JSON
    Steps,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match handle_command(cli.command.unwrap_or(Commands::Tui)).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    match command {
        Commands::Tui => {
            logging::init_file(&config.log_file)?;
            cli::tui::start_tui(&config).await
        }
        Commands::Login { email, password } => {
            logging::init_stderr();
            cli::auth::login_command(&config, email, password).await
        }
        Commands::Logout => {
            logging::init_stderr();
            cli::auth::logout_command(&config).await
        }
        Commands::Steps => {
            logging::init_stderr();
            cli::steps::steps_command(&config)
        }
    }
}
