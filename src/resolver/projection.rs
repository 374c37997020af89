/// Text fields an entity exposes to the substring filter.
pub trait Searchable {
  fn search_fields(&self) -> Vec<&str>;
}

/// One page of a filtered collection.
#[derive(Debug)]
pub struct Projected<'a, T> {
  /// Items on the requested page, original collection order preserved.
  pub items: Vec<&'a T>,
  /// Pages the filtered set spans; 0 when nothing matches.
  pub total_pages: usize,
  /// Items that matched the filter across all pages.
  pub total_matches: usize,
}

/// Case-insensitive substring filter plus a fixed-size page slice.
///
/// An entity matches when the case-folded query occurs in any one of its
/// search fields; the empty query matches everything. `page` is 1-based
/// and clamped to the available range: an out-of-range page yields an
/// empty slice, not an error. Pure function of its inputs.
pub fn project<'a, T: Searchable>(
  collection: &'a [T],
  query: &str,
  page: usize,
  page_size: usize,
) -> Projected<'a, T> {
  let page_size = page_size.max(1);
  let needle = query.to_lowercase();

  let matched: Vec<&T> = collection
    .iter()
    .filter(|entity| {
      needle.is_empty()
        || entity
          .search_fields()
          .iter()
          .any(|field| field.to_lowercase().contains(&needle))
    })
    .collect();

  let total_matches = matched.len();
  let total_pages = total_matches.div_ceil(page_size);
  let start = page.saturating_sub(1).saturating_mul(page_size);

  Projected {
    items: matched.into_iter().skip(start).take(page_size).collect(),
    total_pages,
    total_matches,
  }
}

#[cfg(test)]
mod tests {
  use crate::api::Post;

  use super::*;

  fn post(id: i64, title: &str, body: &str) -> Post {
    Post {
      id,
      user_id: 1,
      title: title.to_string(),
      body: body.to_string(),
    }
  }

  fn numbered_posts(n: i64) -> Vec<Post> {
    (1..=n)
      .map(|i| post(i, &format!("post {}", i), "lorem ipsum"))
      .collect()
  }

  #[test]
  fn test_filter_is_case_insensitive_across_fields() {
    let posts = vec![
      post(1, "Foo rises", "plain"),
      post(2, "unrelated", "contains FOO inside"),
      post(3, "nothing here", "still nothing"),
    ];

    let projected = project(&posts, "foo", 1, 6);

    assert_eq!(projected.total_matches, 2);
    assert_eq!(
      projected.items.iter().map(|p| p.id).collect::<Vec<_>>(),
      vec![1, 2],
      "matches keep collection order"
    );
  }

  #[test]
  fn test_empty_query_matches_everything() {
    let posts = numbered_posts(4);
    let projected = project(&posts, "", 1, 6);
    assert_eq!(projected.total_matches, 4);
    assert_eq!(projected.total_pages, 1);
  }

  #[test]
  fn test_pagination_math_for_thirteen_items() {
    let posts = numbered_posts(13);

    assert_eq!(project(&posts, "", 1, 6).total_pages, 3);
    assert_eq!(project(&posts, "", 3, 6).items.len(), 1);
    assert_eq!(project(&posts, "", 4, 6).items.len(), 0, "past the end is empty, not an error");
  }

  #[test]
  fn test_second_page_of_twelve() {
    let posts = numbered_posts(12);

    let projected = project(&posts, "", 2, 6);

    assert_eq!(projected.total_pages, 2);
    assert_eq!(
      projected.items.iter().map(|p| p.id).collect::<Vec<_>>(),
      vec![7, 8, 9, 10, 11, 12]
    );
  }

  #[test]
  fn test_no_matches_means_zero_pages() {
    let posts = numbered_posts(3);
    let projected = project(&posts, "absent needle", 1, 6);
    assert_eq!(projected.total_matches, 0);
    assert_eq!(projected.total_pages, 0);
    assert!(projected.items.is_empty());
  }
}
