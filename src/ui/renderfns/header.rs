use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with app name and API host
pub fn draw_header(frame: &mut Frame, area: Rect, api_url: &str) {
  let host = extract_host(api_url);

  let header = Line::from(vec![
    Span::styled(" demodash ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", host), Style::default().fg(Color::White)),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Extract the host from the API base URL
fn extract_host(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_host() {
    assert_eq!(
      extract_host("https://jsonplaceholder.typicode.com"),
      "jsonplaceholder.typicode.com"
    );
    assert_eq!(extract_host("https://api.example.com/v1"), "api.example.com");
    assert_eq!(extract_host("http://localhost:3000"), "localhost:3000");
  }
}
