use super::{api_client, login_service};
use colored::*;
use onboard_cli::Config;
use onboard_core::default_steps;
use onboard_tui::{App, AppOptions, AppServices, EventHandler};
use std::sync::Arc;
use tracing::{error, info};

pub async fn start_tui(config: &Config) -> anyhow::Result<()> {
    use crossterm::{execute, terminal};

    println!("{}", "Starting Onboard...".green().bold());
    println!("{} {}", "API:".cyan(), config.api_base_url);

    let client = api_client(config)?;
    let services = AppServices {
        login: login_service(config, client.clone()),
        records: Arc::new(client),
    };
    let options = AppOptions {
        steps: default_steps(config.minimum_age_years),
        error_clear_delay: config.error_clear_delay,
        ..AppOptions::default()
    };

    let mut events = EventHandler::new(options.tick_rate_ms);
    let mut app = App::new(&options, services, events.sender());
    info!("Terminal UI starting against {}", config.api_base_url);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal, &mut events).await;

    // Always restore terminal, even if there was an error
    let cleanup_result = (|| -> std::io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    if let Err(e) = result {
        error!("Terminal UI failed: {}", e);
        eprintln!("TUI application error: {}", e);
    }

    // The input task may still be parked in a blocking poll
    std::process::exit(0);
}
