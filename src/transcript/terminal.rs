use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;
use log::{ debug, warn };

use super::RenderSurface;
use crate::linkify::markup_to_text;
use crate::models::chat::{ MessageBody, MessageNode, PlaceholderId, Sender };

/// Console surface: prints each node as it is appended.
///
/// Printed lines cannot be taken back, so removal only retires the
/// placeholder id.
pub struct TerminalSurface<W: Write + Send> {
    out: Mutex<W>,
    live_placeholders: Mutex<HashSet<PlaceholderId>>,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            live_placeholders: Mutex::new(HashSet::new()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn prefix(sender: Sender) -> &'static str {
        match sender {
            Sender::User => "you> ",
            Sender::Bot => "bot> ",
        }
    }
}

impl<W: Write + Send> RenderSurface for TerminalSurface<W> {
    fn append(&self, node: MessageNode) {
        if let Some(id) = &node.placeholder_id {
            self.live_placeholders
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .insert(id.clone());
        }
        let text = match &node.body {
            MessageBody::Text(s) => s.clone(),
            MessageBody::Markup(s) => markup_to_text(s),
        };
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        if let Err(e) = writeln!(out, "{}{}", Self::prefix(node.sender), text) {
            warn!("Failed to write message to terminal: {}", e);
        }
    }

    fn remove(&self, id: &PlaceholderId) -> bool {
        let removed = self.live_placeholders
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(id);
        debug!("Placeholder {} retired (was live: {})", id, removed);
        removed
    }

    fn input_value(&self) -> String {
        String::new()
    }

    fn clear_input(&self) {}

    fn scroll_to_bottom(&self) {
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        let _ = out.flush();
    }
}
