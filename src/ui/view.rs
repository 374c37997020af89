use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A keyboard hint shown in the footer
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
  pub key: &'static str,
  pub label: &'static str,
}

impl Shortcut {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self { key, label }
  }
}

/// Actions that a view can request in response to user input
pub enum ViewAction {
  /// No action needed
  None,
  /// Push a new view onto the stack
  Push(Box<dyn View>),
  /// Pop current view from stack (go back)
  Pop,
}

/// Trait for view behavior
///
/// Views handle their own input modes (filter overlays, paging) and
/// return actions for the App to execute. Views that load data
/// asynchronously use Query<T> internally and poll it in tick().
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Get the breadcrumb label for this view
  fn breadcrumb_label(&self) -> String;

  /// Called on each tick to allow views to poll async queries
  fn tick(&mut self) {}

  /// Whether the view is currently capturing free text (e.g. an open
  /// filter overlay), so global activation keys stay out of the way
  fn wants_text_input(&self) -> bool {
    false
  }

  /// Keyboard shortcuts to display in the footer
  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new(":", "command"),
      Shortcut::new("/", "filter"),
      Shortcut::new("q", "back"),
    ]
  }
}
