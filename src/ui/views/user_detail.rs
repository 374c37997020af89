use crate::api::{ApiClient, User};
use crate::query::{Query, QueryState};
use crate::resolver::CollectionResolver;
use crate::ui::view::{Shortcut, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Detail view for a single user, resolved by identifier
pub struct UserDetailView {
  id: i64,
  query: Query<User>,
}

impl UserDetailView {
  pub fn new(id: i64, resolver: CollectionResolver<ApiClient>) -> Self {
    let mut query = Query::new(move || {
      let resolver = resolver.clone();
      async move { resolver.user(id).await }
    });

    // Start fetching immediately
    query.fetch();

    Self { id, query }
  }

  fn render_detail(&self, frame: &mut Frame, area: Rect) {
    let title = match self.query.state() {
      QueryState::Loading => format!(" User {} (loading...) ", self.id),
      QueryState::Failed(e) => format!(" User {} (error: {}) ", self.id, e),
      _ => format!(" User {} ", self.id),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Magenta));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if self.query.is_loading() {
      let paragraph =
        Paragraph::new("Loading user details...").style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, inner);
      return;
    }

    if let Some(error) = self.query.error() {
      let paragraph = Paragraph::new(format!("Error: {}\n\nPress 'r' to retry.", error))
        .style(Style::default().fg(Color::Red));
      frame.render_widget(paragraph, inner);
      return;
    }

    let user = match self.query.data() {
      Some(user) => user,
      None => return,
    };

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(6), // Profile
        Constraint::Length(5), // Address
        Constraint::Min(5),    // Company
      ])
      .split(inner);

    let label = Style::default().fg(Color::DarkGray);

    let profile = vec![
      Line::from(vec![
        Span::styled("Name:    ", label),
        Span::styled(&user.name, Style::default().bold()),
        Span::styled(format!("  (@{})", user.username), label),
      ]),
      Line::from(vec![
        Span::styled("Email:   ", label),
        Span::styled(&user.email, Style::default().fg(Color::Cyan)),
      ]),
      Line::from(vec![Span::styled("Phone:   ", label), Span::raw(&user.phone)]),
      Line::from(vec![
        Span::styled("Website: ", label),
        Span::raw(&user.website),
      ]),
    ];
    let profile_block = Block::default().title(" Profile ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(profile).block(profile_block), chunks[0]);

    let address = vec![
      Line::from(vec![
        Span::styled("Street: ", label),
        Span::raw(format!("{}, {}", user.address.street, user.address.suite)),
      ]),
      Line::from(vec![
        Span::styled("City:   ", label),
        Span::raw(format!("{} {}", user.address.city, user.address.zipcode)),
      ]),
      Line::from(vec![
        Span::styled("Geo:    ", label),
        Span::raw(format!("{}, {}", user.address.geo.lat, user.address.geo.lng)),
      ]),
    ];
    let address_block = Block::default().title(" Address ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(address).block(address_block), chunks[1]);

    let company = vec![
      Line::from(vec![
        Span::styled("Company: ", label),
        Span::styled(&user.company.name, Style::default().bold()),
      ]),
      Line::from(vec![Span::raw(format!("\"{}\"", user.company.catch_phrase))]),
      Line::from(vec![Span::styled(&user.company.bs, label)]),
    ];
    let company_block = Block::default().title(" Company ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(company).block(company_block), chunks[2]);
  }
}

impl View for UserDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('r') => {
        self.query.refetch();
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
    match self.query.data() {
      Some(user) => user.name.clone(),
      None => format!("User {}", self.id),
    }
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![Shortcut::new("r", "refresh"), Shortcut::new("q", "back")]
  }
}
