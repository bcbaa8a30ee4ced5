use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui::{backend::CrosstermBackend, Terminal};

use client_registry::config::{self, Config};
use client_registry::db::{self, ClientRepository, Database};
use client_registry::document::DocumentWriter;
use client_registry::form::ClientFormController;
use client_registry::lookup::ViaCepGateway;
use client_registry::ui::{
    handle_input, render_client_form, ClientFormScreen, FormAction, SharedTerminal, StatusBanner,
    TerminalConfirmation,
};

#[derive(Parser)]
#[command(name = "client_registry", about = "Create, edit, activate and print client records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the client form; without an id a new client is created
    Edit { id: Option<String> },
    /// Render a stored client to the output directory
    Print { id: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::init()?;
    init_logging(&config)?;

    match cli.command {
        Command::Edit { id } => edit_client(&config, id.as_deref()).await,
        Command::Print { id } => print_client(&config, id).await,
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn print_client(config: &Config, id: i32) -> Result<()> {
    let db = db::init(config).await?;
    let record = db
        .find_by_id(id)
        .await?
        .ok_or_else(|| anyhow!("client {} not found", id))?;

    let writer = DocumentWriter::new(&config.output_dir)?;
    let (svg, pdf) = writer.write_client_sheet(&record)?;

    println!("Wrote {}", svg.display());
    if let Some(pdf) = pdf {
        println!("Wrote {}", pdf.display());
    }

    Ok(())
}

async fn edit_client(config: &Config, route_id: Option<&str>) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let shared_terminal: SharedTerminal = Arc::new(Mutex::new(Terminal::new(backend)?));

    let banner = StatusBanner::new();
    let mut controller = ClientFormController::new(
        Arc::new(Database::new(config)),
        Arc::new(ViaCepGateway::from_config(config)),
        Arc::new(TerminalConfirmation::new(shared_terminal.clone())),
        Arc::new(banner.clone()),
    );

    // Load failures are already on the banner; the form stays empty.
    let _ = controller.open(route_id).await;

    let result = run_form(&shared_terminal, &mut controller, &banner).await;

    // Restore terminal
    let mut term = shared_terminal.lock().unwrap_or_else(PoisonError::into_inner);
    terminal::disable_raw_mode()?;
    execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    term.show_cursor()?;

    if let Err(err) = &result {
        println!("Error: {}", err);
    }

    result
}

async fn run_form(
    shared_terminal: &SharedTerminal,
    controller: &mut ClientFormController,
    banner: &StatusBanner,
) -> Result<()> {
    let mut screen = ClientFormScreen::new();

    loop {
        {
            let mut term = shared_terminal.lock().unwrap_or_else(PoisonError::into_inner);
            term.draw(|f| render_client_form(f, &screen, controller.form(), banner.visible()))?;
        }

        let Some(action) = tokio::task::block_in_place(|| {
            handle_input(&mut screen, controller.form(), banner)
        })?
        else {
            continue;
        };

        // Storage failures are logged and shown by the controller.
        match action {
            FormAction::Quit => break,
            FormAction::Edit(field, value) => {
                controller.edit(field, value).await;
            }
            FormAction::Submit => {
                let _ = controller.submit().await;
            }
            FormAction::Activate => {
                let _ = controller.activate().await;
            }
            FormAction::Deactivate => {
                let _ = controller.deactivate().await;
            }
        }
    }

    info!("client form closed");
    Ok(())
}
