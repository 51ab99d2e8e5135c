use clap::Parser;

use crate::config::widget::{ DEFAULT_APOLOGY_TEXT, DEFAULT_ASK_PATH, DEFAULT_PLACEHOLDER_TEXT };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Endpoint Args ---
    /// Base URL of the server that answers questions (e.g., http://127.0.0.1:5000)
    #[arg(long, env = "ASK_ENDPOINT", default_value = "http://127.0.0.1:5000")]
    pub endpoint: String,

    /// Path of the question endpoint on the server.
    #[arg(long, env = "ASK_PATH", default_value = DEFAULT_ASK_PATH)]
    pub ask_path: String,

    // --- Rendering Args ---
    /// How server answers are inserted (markup = verbatim, escaped = only generated links are markup)
    #[arg(long, env = "RENDER_MODE", default_value = "escaped")]
    pub render_mode: String,

    /// Text shown in the loading placeholder while a question is in flight.
    #[arg(long, env = "PLACEHOLDER_TEXT", default_value = DEFAULT_PLACEHOLDER_TEXT)]
    pub placeholder_text: String,

    /// Fixed message shown to the user when an exchange fails.
    #[arg(long, env = "APOLOGY_TEXT", default_value = DEFAULT_APOLOGY_TEXT)]
    pub apology_text: String,

    /// Path to a JSON file with example questions ({"examples": ["..."]}).
    #[arg(long, env = "EXAMPLES_PATH")]
    pub examples_path: Option<String>,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "ASK_WIDGET_DEBUG")]
    pub debug: bool,
}
