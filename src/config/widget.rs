use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use log::info;

use crate::cli::Args;

pub const DEFAULT_ASK_PATH: &str = "/ask";
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "...";
pub const DEFAULT_APOLOGY_TEXT: &str =
    "Sorry, there was a problem with the network connection. Please try again later.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Examples file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Examples JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid render mode '{0}' (expected 'markup' or 'escaped')")]
    InvalidRenderMode(String),
    #[error("Endpoint must start with http:// or https://, got '{0}'")]
    InvalidEndpoint(String),
}

/// How server answers are inserted into the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Answer is inserted as live markup, exactly as the server sent it.
    Markup,
    /// Answer is escaped; only the anchors produced by linkify are markup.
    #[default]
    EscapedText,
}

impl FromStr for RenderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markup" | "html" => Ok(RenderMode::Markup),
            "escaped" | "text" | "escapedtext" => Ok(RenderMode::EscapedText),
            other => Err(ConfigError::InvalidRenderMode(other.to_string())),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
struct ExamplesFile {
    examples: Vec<String>,
}

pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(&path)?;
    let file: ExamplesFile = serde_json::from_str(&content)?;
    info!("Loaded {} example questions from {}", file.examples.len(), path.as_ref().display());
    Ok(file.examples)
}

#[derive(Clone, Debug)]
pub struct WidgetConfig {
    pub endpoint: String,
    pub ask_path: String,
    pub render_mode: RenderMode,
    pub placeholder_text: String,
    pub apology_text: String,
    pub examples: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            ask_path: DEFAULT_ASK_PATH.to_string(),
            render_mode: RenderMode::default(),
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
            apology_text: DEFAULT_APOLOGY_TEXT.to_string(),
            examples: Vec::new(),
        }
    }
}

impl WidgetConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let endpoint = args.endpoint.trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(args.endpoint.clone()));
        }

        let ask_path = if args.ask_path.starts_with('/') {
            args.ask_path.clone()
        } else {
            format!("/{}", args.ask_path)
        };

        let examples = match &args.examples_path {
            Some(path) => load_examples(path)?,
            None => Vec::new(),
        };

        Ok(Self {
            endpoint,
            ask_path,
            render_mode: args.render_mode.parse()?,
            placeholder_text: args.placeholder_text.clone(),
            apology_text: args.apology_text.clone(),
            examples,
        })
    }

    pub fn ask_url(&self) -> String {
        format!("{}{}", self.endpoint, self.ask_path)
    }
}
