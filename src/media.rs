use serde::{Deserialize, Serialize};

/// Classification of a catalog entry. TMDB keeps separate id namespaces for
/// movies and shows, so an id alone never identifies an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
  Movie,
  Tv,
}

impl MediaType {
  /// The path segment TMDB uses for this media type (`/movie/{id}`, `/tv/{id}`).
  pub fn path(self) -> &'static str {
    match self {
      MediaType::Movie => "movie",
      MediaType::Tv => "tv",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
  pub id: u64,
  pub name: String,
}

/// A single movie or TV show catalog entry, kept close to the TMDB wire shape
/// so bookmarks round-trip losslessly through serde_json.
///
/// TMDB names the display field asymmetrically: movies carry `title`, shows
/// carry `name`. Both are kept as options and resolved on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub media_type: Option<MediaType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default)]
  pub poster_path: Option<String>,
  #[serde(default)]
  pub backdrop_path: Option<String>,
  #[serde(default)]
  pub vote_average: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub release_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_air_date: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub genres: Vec<Genre>,
  #[serde(default)]
  pub overview: String,
}

/// Identity of an item: the `(id, media_type)` pair. Used for bookmark
/// membership, selection guards, and everywhere equality matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
  pub id: u64,
  pub media_type: MediaType,
}

impl Item {
  /// The explicit media type if present, otherwise inferred from field shape:
  /// an entry carrying `title` is a movie, anything else is a show.
  pub fn resolved_media_type(&self) -> MediaType {
    self.media_type.unwrap_or(if self.title.is_some() { MediaType::Movie } else { MediaType::Tv })
  }

  pub fn key(&self) -> ItemKey {
    ItemKey { id: self.id, media_type: self.resolved_media_type() }
  }

  pub fn display_title(&self) -> &str {
    self.title.as_deref().or(self.name.as_deref()).unwrap_or("(untitled)")
  }

  /// Release year as the leading 4 characters of whichever date is present.
  pub fn release_year(&self) -> Option<&str> {
    let date = self.release_date.as_deref().or(self.first_air_date.as_deref())?;
    date.get(..4).filter(|y| !y.is_empty())
  }

  /// Stamp the resolved media type onto the item so it is explicit from here
  /// on. Bookmarked items always carry one; re-inference after a round trip
  /// through storage would be ambiguous.
  pub fn with_resolved_media_type(mut self) -> Self {
    self.media_type = Some(self.resolved_media_type());
    self
  }
}
