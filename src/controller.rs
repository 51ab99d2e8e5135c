use std::sync::Arc;
use log::{ debug, error, info, warn };
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::WidgetConfig;
use crate::exchange::{ AskTransport, ChatError };
use crate::linkify::linkify;
use crate::models::chat::{ MessageBody, MessageNode, PlaceholderId };
use crate::transcript::RenderSurface;

/// Where a submission's loading placeholder ended up. While the exchange is in
/// flight the placeholder is owned by a [`PendingExchange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingState {
    Absent,
    Resolved,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Nothing was submitted (blank input, unknown example, non-Enter key).
    Ignored,
    Resolved {
        placeholder: PlaceholderId,
        answer: String,
    },
    Failed {
        placeholder: PlaceholderId,
        error: ChatError,
    },
}

impl ExchangeOutcome {
    pub fn state(&self) -> LoadingState {
        match self {
            ExchangeOutcome::Ignored => LoadingState::Absent,
            ExchangeOutcome::Resolved { .. } => LoadingState::Resolved,
            ExchangeOutcome::Failed { .. } => LoadingState::Failed,
        }
    }

    pub fn placeholder(&self) -> Option<&PlaceholderId> {
        match self {
            ExchangeOutcome::Ignored => None,
            ExchangeOutcome::Resolved { placeholder, .. } |
            ExchangeOutcome::Failed { placeholder, .. } => Some(placeholder),
        }
    }
}

/// Drives one transcript: submissions in, rendered nodes out.
///
/// Cloning is cheap and every clone draws on the same surface, so overlapping
/// exchanges can run as separate tasks.
#[derive(Clone)]
pub struct ChatController {
    surface: Arc<dyn RenderSurface>,
    transport: Arc<dyn AskTransport>,
    config: Arc<WidgetConfig>,
    session_id: String,
}

impl ChatController {
    pub fn new(
        surface: Arc<dyn RenderSurface>,
        transport: Arc<dyn AskTransport>,
        config: WidgetConfig
    ) -> Self {
        let session_id = Uuid::new_v4().to_string();
        info!("Chat session {} started", session_id);
        Self {
            surface,
            transport,
            config: Arc::new(config),
            session_id,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn examples(&self) -> &[String] {
        &self.config.examples
    }

    /// Brings the transcript into view on first display.
    pub fn initialize(&self) {
        self.surface.scroll_to_bottom();
    }

    fn append(&self, node: MessageNode) {
        self.surface.append(node);
        self.surface.scroll_to_bottom();
    }

    /// Performs the synchronous half of a submission: user node, cleared
    /// input, loading placeholder. The returned exchange has not contacted the
    /// server yet.
    pub fn begin(&self, raw_input: &str) -> Result<PendingExchange, ChatError> {
        let message = raw_input.trim();
        if message.is_empty() {
            debug!("[{}] Ignoring empty submission", self.session_id);
            return Err(ChatError::EmptyInput);
        }

        self.append(MessageNode::user(message));
        self.surface.clear_input();

        let placeholder = PlaceholderId::generate();
        self.append(MessageNode::loading(self.config.placeholder_text.clone(), placeholder.clone()));
        info!("[{}] Question submitted, placeholder {}", self.session_id, placeholder);

        Ok(PendingExchange {
            controller: self.clone(),
            message: message.to_string(),
            placeholder,
        })
    }

    pub async fn submit(&self, raw_input: &str) -> ExchangeOutcome {
        match self.begin(raw_input) {
            Ok(pending) => pending.run().await,
            Err(_) => ExchangeOutcome::Ignored,
        }
    }

    /// Like [`submit`](Self::submit) but the exchange runs on its own task.
    /// Nothing prevents a second spawn while the first is still in flight.
    pub fn spawn(&self, raw_input: &str) -> Result<JoinHandle<ExchangeOutcome>, ChatError> {
        let pending = self.begin(raw_input)?;
        Ok(tokio::spawn(pending.run()))
    }

    /// Submits whatever is currently in the input field.
    pub async fn submit_input(&self) -> ExchangeOutcome {
        let value = self.surface.input_value();
        self.submit(&value).await
    }

    pub async fn handle_key(&self, key: &str) -> ExchangeOutcome {
        if key == "Enter" {
            self.submit_input().await
        } else {
            ExchangeOutcome::Ignored
        }
    }

    pub async fn submit_example(&self, index: usize) -> ExchangeOutcome {
        match self.config.examples.get(index) {
            Some(question) => self.submit(question).await,
            None => {
                warn!(
                    "[{}] No example question at index {} ({} configured)",
                    self.session_id,
                    index,
                    self.config.examples.len()
                );
                ExchangeOutcome::Ignored
            }
        }
    }

    fn remove_placeholder(&self, placeholder: &PlaceholderId) {
        if !self.surface.remove(placeholder) {
            debug!("[{}] Placeholder {} already gone", self.session_id, placeholder);
        }
    }

    fn settle(
        &self,
        placeholder: PlaceholderId,
        result: Result<String, ChatError>
    ) -> ExchangeOutcome {
        self.remove_placeholder(&placeholder);

        match result {
            Ok(answer) => {
                let markup = linkify(&answer, self.config.render_mode);
                self.append(MessageNode::bot(MessageBody::Markup(markup)));
                info!("[{}] Answer rendered for {}", self.session_id, placeholder);
                ExchangeOutcome::Resolved { placeholder, answer }
            }
            Err(error) => {
                match &error {
                    ChatError::ServerError { status } => {
                        error!("[{}] Server returned status {} for {}", self.session_id, status, placeholder);
                    }
                    ChatError::NetworkFailure(e) => {
                        error!("[{}] Network failure for {}: {}", self.session_id, placeholder, e);
                    }
                    other => {
                        error!("[{}] Exchange failed for {}: {}", self.session_id, placeholder, other);
                    }
                }
                self.append(MessageNode::bot(MessageBody::Text(self.config.apology_text.clone())));
                ExchangeOutcome::Failed { placeholder, error }
            }
        }
    }
}

/// A submission whose placeholder is on screen and whose request has not
/// completed. Consumed by [`run`](Self::run), so it settles exactly once.
pub struct PendingExchange {
    controller: ChatController,
    message: String,
    placeholder: PlaceholderId,
}

impl PendingExchange {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn placeholder_id(&self) -> &PlaceholderId {
        &self.placeholder
    }

    pub async fn run(self) -> ExchangeOutcome {
        let PendingExchange { controller, message, placeholder } = self;
        let result = controller.transport
            .ask(&message).await
            .map(|resp| resp.answer);
        controller.settle(placeholder, result)
    }
}
