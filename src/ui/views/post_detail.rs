use crate::api::{ApiClient, Post, User};
use crate::query::{Query, QueryState};
use crate::resolver::CollectionResolver;
use crate::ui::view::{Shortcut, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Detail view for a single post, with its author resolved lazily
pub struct PostDetailView {
  id: i64,
  resolver: CollectionResolver<ApiClient>,
  post: Query<Post>,
  author: Option<Query<User>>,
}

impl PostDetailView {
  pub fn new(id: i64, resolver: CollectionResolver<ApiClient>) -> Self {
    let fetch_resolver = resolver.clone();
    let mut post = Query::new(move || {
      let resolver = fetch_resolver.clone();
      async move { resolver.post(id).await }
    });

    // Start fetching immediately
    post.fetch();

    Self {
      id,
      resolver,
      post,
      author: None,
    }
  }

  fn author_line(&self) -> Line<'_> {
    let label = Style::default().fg(Color::DarkGray);
    match &self.author {
      Some(author) => match author.state() {
        QueryState::Ready(user) => Line::from(vec![
          Span::styled("by ", label),
          Span::styled(user.name.as_str(), Style::default().fg(Color::Cyan)),
          Span::styled(format!(" <{}>", user.email), label),
        ]),
        QueryState::Failed(_) => Line::from(Span::styled("by unknown author", label)),
        _ => Line::from(Span::styled("by ...", label)),
      },
      None => Line::from(Span::styled("by ...", label)),
    }
  }

  fn render_detail(&self, frame: &mut Frame, area: Rect) {
    let title = match self.post.state() {
      QueryState::Loading => format!(" Post {} (loading...) ", self.id),
      QueryState::Failed(e) => format!(" Post {} (error: {}) ", self.id, e),
      _ => format!(" Post {} ", self.id),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if self.post.is_loading() {
      let paragraph =
        Paragraph::new("Loading post...").style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, inner);
      return;
    }

    if let Some(error) = self.post.error() {
      let paragraph = Paragraph::new(format!("Error: {}\n\nPress 'r' to retry.", error))
        .style(Style::default().fg(Color::Red));
      frame.render_widget(paragraph, inner);
      return;
    }

    let post = match self.post.data() {
      Some(post) => post,
      None => return,
    };

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(2), // Title + author
        Constraint::Length(1), // Separator
        Constraint::Min(1),    // Body
      ])
      .split(inner);

    let header = vec![
      Line::from(Span::styled(post.title.as_str(), Style::default().bold())),
      self.author_line(),
    ];
    frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), chunks[0]);

    let sep = Paragraph::new("─".repeat(chunks[1].width as usize))
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, chunks[1]);

    let body = Paragraph::new(post.body.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[2]);
  }
}

impl View for PostDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('r') => {
        self.post.refetch();
        // Author follows the post once it lands again
        self.author = None;
        ViewAction::None
      }
      KeyCode::Char('q') | KeyCode::Esc => ViewAction::Pop,
      _ => ViewAction::None,
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    self.render_detail(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    format!("Post {}", self.id)
  }

  fn tick(&mut self) {
    self.post.poll();

    // The author id is only known once the post has arrived
    if self.author.is_none() {
      if let Some(post) = self.post.data() {
        let user_id = post.user_id;
        let resolver = self.resolver.clone();
        let mut author = Query::new(move || {
          let resolver = resolver.clone();
          async move { resolver.user(user_id).await }
        });
        author.fetch();
        self.author = Some(author);
      }
    }

    if let Some(author) = &mut self.author {
      author.poll();
    }
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![Shortcut::new("r", "refresh"), Shortcut::new("q", "back")]
  }
}
