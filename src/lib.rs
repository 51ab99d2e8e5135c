pub mod cli;
pub mod config;
pub mod console;
pub mod controller;
pub mod exchange;
pub mod linkify;
pub mod models;
pub mod transcript;

use cli::Args;
use config::WidgetConfig;
use controller::ChatController;
use exchange::HttpAskClient;
use log::info;
use std::error::Error;
use std::sync::Arc;
use tokio::io::BufReader;
use transcript::TerminalSurface;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = WidgetConfig::from_args(&args)?;

    info!("--- Widget Configuration ---");
    info!("Ask URL: {}", config.ask_url());
    info!("Render Mode: {:?}", config.render_mode);
    info!("Placeholder Text: {}", config.placeholder_text);
    info!("Example Questions: {}", config.examples.len());
    if let Some(path) = &args.examples_path {
        info!("Examples Path: {}", path);
    }
    info!("----------------------------");

    let transport = Arc::new(HttpAskClient::from_config(&config));
    let surface = Arc::new(TerminalSurface::stdout());
    let controller = ChatController::new(surface, transport, config);

    let summary = console::run_console(controller, BufReader::new(tokio::io::stdin())).await?;
    info!(
        "Session finished: {} answered, {} failed",
        summary.resolved,
        summary.failed
    );

    Ok(())
}
