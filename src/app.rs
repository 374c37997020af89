use crate::api::ApiClient;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::resolver::CollectionResolver;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::renderfns::{draw_footer, draw_header};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{PostListView, UserListView};
use clap::ValueEnum;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

/// Collection to open at startup
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StartView {
  Users,
  Posts,
}

/// Main application state
pub struct App {
  /// Application configuration
  config: Config,

  /// Shared resolver behind every view
  resolver: CollectionResolver<ApiClient>,

  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// Global command palette (`:`)
  command: CommandInput,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config, start: StartView) -> Result<Self> {
    let client = ApiClient::new(&config.api)?;
    let resolver = CollectionResolver::new(client).with_stale_after(config.stale_after());

    let root: Box<dyn View> = match start {
      StartView::Users => Box::new(UserListView::new(resolver.clone(), config.page_size())),
      StartView::Posts => Box::new(PostListView::new(resolver.clone(), config.page_size())),
    };

    Ok(Self {
      config,
      resolver,
      view_stack: vec![root],
      command: CommandInput::new(),
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(250));

    // Main loop
    while !self.should_quit {
      terminal.draw(|frame| self.draw(frame))?;

      if let Some(event) = events.next().await {
        match event {
          Event::Key(key) => self.handle_key(key),
          Event::Tick => {
            if let Some(view) = self.view_stack.last_mut() {
              view.tick();
            }
          }
          Event::Resize => {} // Redrawn at the top of the loop
        }
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Header
        Constraint::Min(1),    // Main content
        Constraint::Length(1), // Footer
      ])
      .split(frame.area());

    draw_header(frame, chunks[0], &self.config.api.url);

    let breadcrumb: Vec<String> = self
      .view_stack
      .iter()
      .map(|v| v.breadcrumb_label())
      .collect();
    let shortcuts = self
      .view_stack
      .last()
      .map(|v| v.shortcuts())
      .unwrap_or_default();

    if let Some(view) = self.view_stack.last_mut() {
      view.render(frame, chunks[1]);
    }

    draw_footer(frame, chunks[2], &breadcrumb, &shortcuts);

    self.command.render_overlay(frame, chunks[1]);
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // An open command palette captures everything
    if self.command.is_active() {
      if let KeyResult::Event(CommandEvent::Submitted(cmd)) = self.command.handle_key(key) {
        self.execute_command(&cmd);
      }
      return;
    }

    // While a view captures text (filter overlay), `:` must not
    // activate the palette
    let capturing = self
      .view_stack
      .last()
      .map(|v| v.wants_text_input())
      .unwrap_or(false);
    if !capturing && matches!(self.command.handle_key(key), KeyResult::Handled) {
      return;
    }

    let Some(view) = self.view_stack.last_mut() else {
      return;
    };
    match view.handle_key(key) {
      ViewAction::Push(next) => self.view_stack.push(next),
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
      ViewAction::None => {}
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    match cmd {
      "users" => {
        self.view_stack.clear();
        self.view_stack.push(Box::new(UserListView::new(
          self.resolver.clone(),
          self.config.page_size(),
        )));
      }
      "posts" => {
        self.view_stack.clear();
        self.view_stack.push(Box::new(PostListView::new(
          self.resolver.clone(),
          self.config.page_size(),
        )));
      }
      "quit" => {
        self.should_quit = true;
      }
      _ => {
        // Unknown command
      }
    }
  }
}
