use crate::api::{ApiClient, User};
use crate::query::{Query, QueryState};
use crate::resolver::{project, CollectionResolver};
use crate::ui::components::{FilterPager, KeyResult, SearchEvent, SearchInput};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{initial, truncate};
use crate::ui::view::{Shortcut, View, ViewAction};
use crate::ui::views::UserDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Paged, filterable list of users
pub struct UserListView {
  resolver: CollectionResolver<ApiClient>,
  query: Query<Vec<User>>,
  pager: FilterPager,
  search: SearchInput,
  list_state: ListState,
}

impl UserListView {
  pub fn new(resolver: CollectionResolver<ApiClient>, page_size: usize) -> Self {
    let fetch_resolver = resolver.clone();
    let mut query = Query::new(move || {
      let resolver = fetch_resolver.clone();
      async move { resolver.users().await }
    });

    // Start fetching immediately
    query.fetch();

    Self {
      resolver,
      query,
      pager: FilterPager::new(page_size),
      search: SearchInput::new(),
      list_state: ListState::default(),
    }
  }
}

impl View for UserListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    // The filter overlay gets the key first
    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(query)) => {
        self.pager.set_query(&query);
        self.list_state.select(Some(0));
        return ViewAction::None;
      }
      KeyResult::Event(SearchEvent::Submitted) | KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
      }
      KeyCode::Char('l') | KeyCode::Right => {
        let users = self.query.data().map(Vec::as_slice).unwrap_or(&[]);
        let total = project(users, self.pager.query(), 1, self.pager.page_size()).total_pages;
        self.pager.next_page(total);
        self.list_state.select(Some(0));
      }
      KeyCode::Char('h') | KeyCode::Left => {
        self.pager.prev_page();
        self.list_state.select(Some(0));
      }
      KeyCode::Char('r') => {
        self.query.refetch();
      }
      KeyCode::Enter => {
        if let Some(idx) = self.list_state.selected() {
          let users = self.query.data().map(Vec::as_slice).unwrap_or(&[]);
          let projected = project(
            users,
            self.pager.query(),
            self.pager.page(),
            self.pager.page_size(),
          );
          if let Some(user) = projected.items.get(idx) {
            return ViewAction::Push(Box::new(UserDetailView::new(
              user.id,
              self.resolver.clone(),
            )));
          }
        }
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let users = self.query.data().map(Vec::as_slice).unwrap_or(&[]);
    let projected = project(
      users,
      self.pager.query(),
      self.pager.page(),
      self.pager.page_size(),
    );
    let page_len = projected.items.len();

    let title = match self.query.state() {
      QueryState::Loading => " Users (loading...) ".to_string(),
      QueryState::Failed(e) => format!(" Users (error: {}) ", e),
      _ => format!(
        " Users ({} items, page {}/{}) ",
        projected.total_matches,
        self.pager.page(),
        projected.total_pages.max(1)
      ),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Magenta));

    if projected.items.is_empty() {
      let content = if self.query.is_loading() {
        "Loading users..."
      } else if self.query.error().is_some() {
        "Failed to load users. Press 'r' to retry."
      } else if !self.pager.query().is_empty() {
        "No users match the filter."
      } else {
        "No users found."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      self.search.render_overlay(frame, area);
      return;
    }

    let items: Vec<ListItem> = projected
      .items
      .iter()
      .map(|user| {
        let line = Line::from(vec![
          Span::styled(
            format!(" {} ", initial(&user.name)),
            Style::default().fg(Color::Magenta).bold(),
          ),
          Span::styled(
            format!("{:<22}", truncate(&user.name, 20)),
            Style::default().fg(Color::White),
          ),
          Span::styled(
            format!("{:<16}", truncate(&format!("@{}", user.username), 15)),
            Style::default().fg(Color::DarkGray),
          ),
          Span::styled(
            format!("{:<28}", truncate(&user.email, 26)),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(truncate(&user.company.name, 24)),
        ]);
        ListItem::new(line)
      })
      .collect();

    ensure_valid_selection(&mut self.list_state, page_len);

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);

    self.search.render_overlay(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    "Users".to_string()
  }

  fn tick(&mut self) {
    if self.query.poll() {
      let users = self.query.data().map(Vec::as_slice).unwrap_or(&[]);
      let total = project(users, self.pager.query(), 1, self.pager.page_size()).total_pages;
      self.pager.clamp(total);
    }
  }

  fn wants_text_input(&self) -> bool {
    self.search.is_active()
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new("/", "filter"),
      Shortcut::new("h/l", "page"),
      Shortcut::new("Enter", "open"),
      Shortcut::new("r", "refresh"),
      Shortcut::new("q", "back"),
    ]
  }
}
