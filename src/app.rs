use image::DynamicImage;
use ratatui::widgets::ListState;

use crate::bookmarks::{BookmarkStore, Bookmarks};
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::detail::DetailView;
use crate::display::DisplayMode;
use crate::media::{Item, ItemKey};
use crate::results::{Results, Section};
use crate::theme::{THEMES, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Input,
  Results,
}

pub struct App {
  pub catalog: CatalogClient,
  pub results: Results,
  pub detail: DetailView,
  pub bookmarks: Bookmarks,
  pub mode: AppMode,
  pub input: String,
  pub cursor_position: usize,
  pub input_scroll: usize,
  pub list_state: ListState,
  pub theme_index: usize,
  pub display_mode: DisplayMode,
  pub should_quit: bool,
  /// Backdrop resized for the current modal area, keyed by item identity so a
  /// selection or layout change invalidates it.
  pub cached_resized_backdrop: Option<(ItemKey, u16, u16, DynamicImage)>,
  /// API key as it appeared in the prefs file, round-tripped on save.
  config_api_key: Option<String>,
}

impl App {
  pub fn new(api_key: String, display_mode: DisplayMode, store: Box<dyn BookmarkStore>) -> Self {
    let config = Config::load();
    let theme_index =
      if let Some(ref name) = config.theme_name { THEMES.iter().position(|t| t.name == name).unwrap_or(0) } else { 0 };

    Self {
      catalog: CatalogClient::new(api_key),
      results: Results::new(),
      detail: DetailView::default(),
      bookmarks: Bookmarks::load(store),
      mode: AppMode::Results,
      input: String::new(),
      cursor_position: 0,
      input_scroll: 0,
      list_state: ListState::default(),
      theme_index,
      display_mode,
      should_quit: false,
      cached_resized_backdrop: None,
      config_api_key: config.api_key,
    }
  }

  pub fn theme(&self) -> &'static Theme {
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.save_config();
  }

  fn save_config(&self) {
    let config = Config {
      api_key: self.config_api_key.clone(),
      theme_name: Some(self.theme().name.to_string()),
      display_mode: Some(self.display_mode.label().to_lowercase()),
    };
    config.save();
  }

  /// Poll in-flight fetches and fold completed ones into state. Runs once per
  /// frame on the main loop; all state mutation happens here or in key
  /// handlers, never in spawned tasks.
  pub fn check_pending(&mut self) {
    if self.results.check_pending() {
      self.reset_selection();
    }
    self.detail.check_pending();
  }

  fn reset_selection(&mut self) {
    self.list_state.select(if self.results.items().is_empty() { None } else { Some(0) });
  }

  fn clamp_selection(&mut self) {
    let len = self.results.items().len();
    if len == 0 {
      self.list_state.select(None);
    } else if self.list_state.selected().is_none_or(|i| i >= len) {
      self.list_state.select(Some(len - 1));
    }
  }

  /// The item under the cursor in the result list.
  pub fn selected_item(&self) -> Option<&Item> {
    self.results.items().get(self.list_state.selected()?)
  }

  pub fn trigger_search(&mut self) {
    let query = self.input.clone();
    if self.results.search(&self.catalog, &query) {
      self.mode = AppMode::Results;
    }
  }

  pub fn show_trending(&mut self) {
    self.results.show_trending(&self.catalog);
    self.mode = AppMode::Results;
  }

  pub fn show_bookmarks(&mut self) {
    self.results.show_bookmarks(&self.bookmarks);
    self.mode = AppMode::Results;
    self.reset_selection();
  }

  pub fn open_selected_detail(&mut self) {
    let Some(item) = self.selected_item().cloned() else { return };
    self.cached_resized_backdrop = None;
    self.detail.open(&self.catalog, &item);
  }

  pub fn close_detail(&mut self) {
    self.detail.close();
    self.cached_resized_backdrop = None;
  }

  /// Toggle a bookmark and, when the bookmarks section is on screen, refresh
  /// the displayed result set so the list reflects the change at once.
  pub fn toggle_bookmark(&mut self, item: &Item) {
    self.bookmarks.toggle(item);
    if *self.results.section() == Section::Bookmarks {
      self.results.show_bookmarks(&self.bookmarks);
      self.clamp_selection();
    }
  }

  pub fn toggle_selected_bookmark(&mut self) {
    if let Some(item) = self.selected_item().cloned() {
      self.toggle_bookmark(&item);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::media::MediaType;
  use crate::results::LoadStatus;

  struct NullStore;

  impl BookmarkStore for NullStore {
    fn read(&self, _key: &str) -> Option<String> {
      None
    }
    fn write(&self, _key: &str, _value: &str) {}
  }

  fn app() -> App {
    App::new("test-key".to_string(), DisplayMode::Ascii, Box::new(NullStore))
  }

  fn item(id: u64, title: &str) -> Item {
    Item {
      id,
      media_type: Some(MediaType::Movie),
      title: Some(title.to_string()),
      name: None,
      poster_path: None,
      backdrop_path: None,
      vote_average: 7.0,
      release_date: None,
      first_air_date: None,
      genres: Vec::new(),
      overview: String::new(),
    }
  }

  #[test]
  fn bookmarks_section_refreshes_on_toggle() {
    let mut app = app();
    app.show_bookmarks();
    assert_eq!(app.results.status, LoadStatus::Empty);

    app.toggle_bookmark(&item(1, "A"));
    assert_eq!(app.results.status, LoadStatus::Success);
    assert_eq!(app.results.items().len(), 1);

    // Un-bookmarking the displayed item empties the list again.
    app.toggle_bookmark(&item(1, "A"));
    assert_eq!(app.results.status, LoadStatus::Empty);
    assert!(app.results.items().is_empty());
    assert_eq!(app.list_state.selected(), None);
  }

  #[test]
  fn other_sections_do_not_refresh_on_toggle() {
    let mut app = app();
    // Default section is trending; the (empty) result set must stay put.
    app.toggle_bookmark(&item(1, "A"));
    assert!(app.results.items().is_empty());
    assert_eq!(app.results.status, LoadStatus::Loading);
  }

  #[test]
  fn selection_clamps_after_removal() {
    let mut app = app();
    app.toggle_bookmark(&item(1, "A"));
    app.toggle_bookmark(&item(2, "B"));
    app.show_bookmarks();
    app.list_state.select(Some(1));

    app.toggle_bookmark(&item(2, "B"));
    assert_eq!(app.list_state.selected(), Some(0));
  }

  #[test]
  fn empty_search_stays_put() {
    let mut app = app();
    app.mode = AppMode::Input;
    app.input = "   ".to_string();
    app.trigger_search();
    assert_eq!(app.mode, AppMode::Input);
    assert_eq!(app.results.section(), &Section::Trending);
  }
}
