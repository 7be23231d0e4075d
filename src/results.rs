//! Result set controller: the collection currently on screen, its section
//! title, and its load status.
//!
//! Three sources can populate the view — trending, search, and the bookmark
//! snapshot. Fetches are spawned onto the runtime and polled by
//! `check_pending`; each carries the section it was issued for, and a late
//! response is applied only while that section is still active.

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::bookmarks::Bookmarks;
use crate::catalog::{CatalogClient, CatalogError};
use crate::constants::constants;
use crate::media::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
  Loading,
  Success,
  Error,
  Empty,
}

/// Which data source currently populates the result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
  Trending,
  Search(String),
  Bookmarks,
}

type FetchOutcome = Result<Vec<Item>, CatalogError>;

pub struct Results {
  items: Vec<Item>,
  pub status: LoadStatus,
  pub section_title: String,
  section: Section,
  pending: Option<(Section, oneshot::Receiver<FetchOutcome>)>,
}

impl Results {
  pub fn new() -> Self {
    Self {
      items: Vec::new(),
      status: LoadStatus::Loading,
      section_title: constants().trending_title.clone(),
      section: Section::Trending,
      pending: None,
    }
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn section(&self) -> &Section {
    &self.section
  }

  /// Switch to the trending section and kick off the fetch. Status goes to
  /// loading before the request is issued.
  pub fn show_trending(&mut self, catalog: &CatalogClient) {
    info!("section: trending");
    self.section = Section::Trending;
    self.section_title = constants().trending_title.clone();
    self.status = LoadStatus::Loading;

    let client = catalog.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(client.fetch_trending().await);
    });
    self.pending = Some((Section::Trending, rx));
  }

  /// Search the catalog. A query that trims to empty is a no-op: nothing
  /// about the current view changes. Returns whether a search was issued.
  pub fn search(&mut self, catalog: &CatalogClient, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
      return false;
    }
    info!(query = %query, "section: search");
    let section = Section::Search(query.to_string());
    self.section = section.clone();
    self.section_title = format!("Results for \"{}\"", query);
    self.status = LoadStatus::Loading;

    let client = catalog.clone();
    let owned = query.to_string();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(client.search_multi(&owned).await);
    });
    self.pending = Some((section, rx));
    true
  }

  /// Switch to the bookmarks section: a synchronous copy of the bookmark
  /// list in insertion order, no fetch involved. Any in-flight fetch for a
  /// previous section is left to the identity guard.
  pub fn show_bookmarks(&mut self, bookmarks: &Bookmarks) {
    info!(count = bookmarks.items().len(), "section: bookmarks");
    self.section = Section::Bookmarks;
    self.section_title = constants().bookmarks_title.clone();
    self.items = bookmarks.items().to_vec();
    self.status = if self.items.is_empty() { LoadStatus::Empty } else { LoadStatus::Success };
  }

  /// Poll the in-flight fetch, if any. Returns true when the result set was
  /// replaced (the view resets its selection).
  pub fn check_pending(&mut self) -> bool {
    let Some((requested, mut rx)) = self.pending.take() else { return false };
    match rx.try_recv() {
      Ok(outcome) => self.apply(requested, outcome),
      Err(oneshot::error::TryRecvError::Empty) => {
        self.pending = Some((requested, rx));
        false
      }
      Err(oneshot::error::TryRecvError::Closed) => {
        warn!("fetch task dropped without a result");
        if requested == self.section {
          self.status = LoadStatus::Error;
        }
        false
      }
    }
  }

  /// Apply a completed fetch. The response is disregarded when the section it
  /// was issued for is no longer active; on failure the previous result set
  /// is left untouched and only the status flips to error.
  fn apply(&mut self, requested: Section, outcome: FetchOutcome) -> bool {
    if requested != self.section {
      debug!(?requested, current = ?self.section, "stale fetch response disregarded");
      return false;
    }
    match outcome {
      Ok(items) => {
        self.status = if items.is_empty() { LoadStatus::Empty } else { LoadStatus::Success };
        self.items = items;
        true
      }
      Err(e) => {
        warn!(err = %e, "fetch failed");
        self.status = LoadStatus::Error;
        false
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bookmarks::{BookmarkStore, Bookmarks};
  use crate::media::MediaType;

  struct NullStore;

  impl BookmarkStore for NullStore {
    fn read(&self, _key: &str) -> Option<String> {
      None
    }
    fn write(&self, _key: &str, _value: &str) {}
  }

  fn item(id: u64, title: &str) -> Item {
    Item {
      id,
      media_type: Some(MediaType::Movie),
      title: Some(title.to_string()),
      name: None,
      poster_path: None,
      backdrop_path: None,
      vote_average: 7.2,
      release_date: None,
      first_air_date: None,
      genres: Vec::new(),
      overview: String::new(),
    }
  }

  #[test]
  fn empty_query_is_a_noop() {
    let catalog = CatalogClient::new("test-key".to_string());
    let mut results = Results::new();
    results.status = LoadStatus::Success;
    results.section_title = "Trending Now".to_string();

    assert!(!results.search(&catalog, "   "));
    assert_eq!(results.status, LoadStatus::Success);
    assert_eq!(results.section_title, "Trending Now");
    assert_eq!(results.section(), &Section::Trending);
  }

  #[tokio::test]
  async fn search_sets_title_and_loading_synchronously() {
    let catalog = CatalogClient::new("test-key".to_string());
    let mut results = Results::new();

    assert!(results.search(&catalog, "  blade runner  "));
    assert_eq!(results.section_title, "Results for \"blade runner\"");
    assert_eq!(results.status, LoadStatus::Loading);
    assert_eq!(results.section(), &Section::Search("blade runner".to_string()));
  }

  #[tokio::test]
  async fn trending_sets_title_and_loading_synchronously() {
    let catalog = CatalogClient::new("test-key".to_string());
    let mut results = Results::new();
    results.status = LoadStatus::Error;

    results.show_trending(&catalog);
    assert_eq!(results.section_title, "Trending Now");
    assert_eq!(results.status, LoadStatus::Loading);
  }

  #[test]
  fn successful_fetch_replaces_the_result_set() {
    let mut results = Results::new();
    assert!(results.apply(Section::Trending, Ok(vec![item(1, "A")])));
    assert_eq!(results.status, LoadStatus::Success);
    assert_eq!(results.items().len(), 1);
    assert_eq!(results.section_title, "Trending Now");
  }

  #[test]
  fn empty_fetch_yields_empty_status() {
    let mut results = Results::new();
    results.apply(Section::Trending, Ok(Vec::new()));
    assert_eq!(results.status, LoadStatus::Empty);
  }

  #[test]
  fn failed_fetch_leaves_previous_items_untouched() {
    let mut results = Results::new();
    results.apply(Section::Trending, Ok(vec![item(1, "A")]));

    results.status = LoadStatus::Loading;
    results.apply(Section::Trending, Err(CatalogError::Transport("unreachable".to_string())));
    assert_eq!(results.status, LoadStatus::Error);
    assert_eq!(results.items().len(), 1);
  }

  #[test]
  fn stale_response_for_another_section_is_disregarded() {
    let mut results = Results::new();
    results.section = Section::Search("new".to_string());
    results.section_title = "Results for \"new\"".to_string();
    results.status = LoadStatus::Loading;

    // A trending response from before the section switch arrives late.
    assert!(!results.apply(Section::Trending, Ok(vec![item(1, "A")])));
    assert!(results.items().is_empty());
    assert_eq!(results.status, LoadStatus::Loading);
  }

  #[test]
  fn stale_response_for_old_query_is_disregarded() {
    let mut results = Results::new();
    results.section = Section::Search("second".to_string());
    assert!(!results.apply(Section::Search("first".to_string()), Ok(vec![item(1, "A")])));
    assert!(results.items().is_empty());
  }

  #[test]
  fn bookmarks_snapshot_is_synchronous() {
    let mut bookmarks = Bookmarks::load(Box::new(NullStore));
    bookmarks.toggle(&item(1, "A"));
    bookmarks.toggle(&item(2, "B"));

    let mut results = Results::new();
    results.show_bookmarks(&bookmarks);
    assert_eq!(results.section_title, "My Bookmarks");
    assert_eq!(results.status, LoadStatus::Success);
    let titles: Vec<_> = results.items().iter().map(Item::display_title).collect();
    assert_eq!(titles, vec!["A", "B"]);
  }

  #[test]
  fn empty_bookmarks_snapshot_is_empty_status() {
    let bookmarks = Bookmarks::load(Box::new(NullStore));
    let mut results = Results::new();
    results.show_bookmarks(&bookmarks);
    assert_eq!(results.status, LoadStatus::Empty);
    assert!(results.items().is_empty());
  }
}
