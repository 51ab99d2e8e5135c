mod memory;
mod terminal;

pub use memory::MemorySurface;
pub use terminal::TerminalSurface;

use crate::models::chat::{ MessageNode, PlaceholderId };

/// The page-side collaborator the controller draws on: the transcript
/// container plus the input field.
///
/// Implementations own the transcript. Append order is display order.
pub trait RenderSurface: Send + Sync {
    fn append(&self, node: MessageNode);

    /// Removes the placeholder carrying `id`. Returns `false` and leaves the
    /// transcript untouched when no such node exists.
    fn remove(&self, id: &PlaceholderId) -> bool;

    fn input_value(&self) -> String;

    fn clear_input(&self);

    fn scroll_to_bottom(&self);
}
