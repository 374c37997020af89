/// Filter text and 1-based page of a list view.
///
/// Changing the filter snaps back to the first page, so the page can
/// never point past the newly filtered result set.
#[derive(Debug, Clone)]
pub struct FilterPager {
  query: String,
  page: usize,
  page_size: usize,
}

impl FilterPager {
  pub fn new(page_size: usize) -> Self {
    Self {
      query: String::new(),
      page: 1,
      page_size: page_size.max(1),
    }
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn page(&self) -> usize {
    self.page
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  /// Update the filter text. Any change resets to page 1.
  pub fn set_query(&mut self, query: &str) {
    if self.query != query {
      self.query = query.to_string();
      self.page = 1;
    }
  }

  /// Advance one page, stopping at `total_pages`.
  pub fn next_page(&mut self, total_pages: usize) {
    if self.page < total_pages {
      self.page += 1;
    }
  }

  pub fn prev_page(&mut self) {
    if self.page > 1 {
      self.page -= 1;
    }
  }

  /// Pull the page back into range after the underlying data shrank
  /// (e.g. a refetch returned fewer items).
  pub fn clamp(&mut self, total_pages: usize) {
    if total_pages > 0 && self.page > total_pages {
      self.page = total_pages;
    }
  }
}
