use std::sync::{ Mutex, MutexGuard };

use super::RenderSurface;
use crate::models::chat::{ MessageNode, PlaceholderId, Sender };

#[derive(Default, Debug)]
struct SurfaceState {
    nodes: Vec<MessageNode>,
    input: String,
    scrolls: usize,
}

/// Headless surface that keeps the transcript in memory.
#[derive(Default, Debug)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_input(&self, value: impl Into<String>) {
        self.lock().input = value.into();
    }

    pub fn nodes(&self) -> Vec<MessageNode> {
        self.lock().nodes.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().nodes.is_empty()
    }

    pub fn nodes_from(&self, sender: Sender) -> Vec<MessageNode> {
        self.lock()
            .nodes
            .iter()
            .filter(|n| n.sender == sender)
            .cloned()
            .collect()
    }

    pub fn placeholders(&self) -> Vec<PlaceholderId> {
        self.lock()
            .nodes
            .iter()
            .filter_map(|n| n.placeholder_id.clone())
            .collect()
    }

    pub fn has_placeholder(&self, id: &PlaceholderId) -> bool {
        self.lock().nodes.iter().any(|n| n.placeholder_id.as_ref() == Some(id))
    }

    pub fn scroll_count(&self) -> usize {
        self.lock().scrolls
    }

    /// The transcript container's inner HTML.
    pub fn render_html(&self) -> String {
        self.lock()
            .nodes
            .iter()
            .map(MessageNode::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl RenderSurface for MemorySurface {
    fn append(&self, node: MessageNode) {
        self.lock().nodes.push(node);
    }

    fn remove(&self, id: &PlaceholderId) -> bool {
        let mut state = self.lock();
        match state.nodes.iter().position(|n| n.placeholder_id.as_ref() == Some(id)) {
            Some(idx) => {
                state.nodes.remove(idx);
                true
            }
            None => false,
        }
    }

    fn input_value(&self) -> String {
        self.lock().input.clone()
    }

    fn clear_input(&self) {
        self.lock().input.clear();
    }

    fn scroll_to_bottom(&self) {
        self.lock().scrolls += 1;
    }
}
