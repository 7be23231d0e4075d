//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available —
//! no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // TMDB endpoints
  pub api_base_url: String,
  pub image_base_url: String,
  pub youtube_watch_url: String,

  // Section titles
  pub trending_title: String,
  pub bookmarks_title: String,

  // Bookmark persistence
  pub bookmark_store_key: String,

  // Trailer selection
  pub trailer_type: String,
  pub trailer_site: String,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this is a build-time error.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
