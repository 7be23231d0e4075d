//! TMDB catalog client: trending, multi search, and detail-with-videos.
//!
//! All remote data enters through this module. Responses are deserialized
//! straight into [`Item`]s; list entries that aren't movies or shows (TMDB
//! multi search also returns people) are dropped row by row rather than
//! failing the whole response.

use image::DynamicImage;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::constants::constants;
use crate::media::{Item, MediaType};

/// Failures surfaced by the catalog client. The UI collapses both variants
/// into a single error status; the distinction exists for logging.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
  #[error("network error: {0}")]
  Transport(String),
  #[error("malformed response: {0}")]
  Parse(String),
}

/// One entry of a TMDB videos list.
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
  pub key: String,
  pub site: String,
  #[serde(rename = "type")]
  pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
  #[serde(default)]
  pub results: Vec<Video>,
}

/// Detail response for a single item, with its videos appended
/// (`append_to_response=videos`).
#[derive(Debug, Clone, Deserialize)]
pub struct Detail {
  #[serde(flatten)]
  pub item: Item,
  #[serde(default)]
  pub videos: VideoList,
}

impl Detail {
  /// The first video that is a trailer hosted on YouTube, if any.
  pub fn trailer_key(&self) -> Option<&str> {
    let c = constants();
    self.videos.results.iter().find(|v| v.kind == c.trailer_type && v.site == c.trailer_site).map(|v| v.key.as_str())
  }
}

/// Paged list response shape shared by trending and search endpoints.
/// Rows are kept as raw JSON so a single odd entry can be skipped.
#[derive(Debug, Deserialize)]
struct Page {
  #[serde(default)]
  results: Vec<serde_json::Value>,
}

fn parse_rows(page: Page) -> Vec<Item> {
  page.results.into_iter().filter_map(|row| serde_json::from_value::<Item>(row).ok()).collect()
}

#[derive(Clone)]
pub struct CatalogClient {
  http: Client,
  api_key: String,
  base_url: String,
}

impl CatalogClient {
  pub fn new(api_key: String) -> Self {
    Self { http: Client::new(), api_key, base_url: constants().api_base_url.clone() }
  }

  async fn fetch_json<T: for<'de> Deserialize<'de>>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<T, CatalogError> {
    let url = format!("{}{}", self.base_url, path);
    let response = self
      .http
      .get(&url)
      .query(&[("api_key", self.api_key.as_str())])
      .query(query)
      .send()
      .await
      .map_err(|e| CatalogError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(CatalogError::Transport(format!("HTTP {}", status.as_u16())));
    }

    response.json().await.map_err(|e| CatalogError::Parse(e.to_string()))
  }

  /// This week's trending movies and shows, mixed.
  pub async fn fetch_trending(&self) -> Result<Vec<Item>, CatalogError> {
    let page: Page = self.fetch_json("/trending/all/week", &[]).await?;
    let items = parse_rows(page);
    debug!(count = items.len(), "trending fetched");
    Ok(items)
  }

  /// Multi-type search across movies and shows. The query is sent exactly as
  /// given; trimming is the caller's concern.
  pub async fn search_multi(&self, query: &str) -> Result<Vec<Item>, CatalogError> {
    let page: Page = self.fetch_json("/search/multi", &[("query", query)]).await?;
    let items = parse_rows(page);
    debug!(query = %query, count = items.len(), "search fetched");
    Ok(items)
  }

  /// Full detail for one item with its videos list appended. The returned
  /// item is stamped with the requested media type (detail responses omit it).
  pub async fn fetch_detail(&self, media_type: MediaType, id: u64) -> Result<Detail, CatalogError> {
    let path = format!("/{}/{}", media_type.path(), id);
    let mut detail: Detail = self.fetch_json(&path, &[("append_to_response", "videos")]).await?;
    detail.item.media_type = Some(media_type);
    Ok(detail)
  }

  /// Fetch and decode a poster/backdrop from the TMDB image CDN.
  pub async fn fetch_image(&self, image_path: &str) -> Result<DynamicImage, CatalogError> {
    let url = format!("{}{}", constants().image_base_url, image_path);
    let response = self.http.get(&url).send().await.map_err(|e| CatalogError::Transport(e.to_string()))?;
    if !response.status().is_success() {
      return Err(CatalogError::Transport(format!("HTTP {}", response.status().as_u16())));
    }
    let bytes = response.bytes().await.map_err(|e| CatalogError::Transport(e.to_string()))?;
    image::load_from_memory(&bytes).map_err(|e| CatalogError::Parse(e.to_string()))
  }
}

/// Watch-page URL for a trailer key, suitable for opening in a browser.
pub fn trailer_watch_url(key: &str) -> String {
  format!("{}{}", constants().youtube_watch_url, key)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_rows_skip_people_and_malformed_entries() {
    let json = r#"{
      "page": 1,
      "results": [
        {"id": 1, "media_type": "movie", "title": "A", "vote_average": 7.2},
        {"id": 2, "media_type": "person", "name": "Someone Famous"},
        {"id": "not-a-number", "media_type": "tv", "name": "Broken"},
        {"id": 3, "media_type": "tv", "name": "B", "first_air_date": "2019-04-01"}
      ]
    }"#;
    let page: Page = serde_json::from_str(json).unwrap();
    let items = parse_rows(page);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].resolved_media_type(), MediaType::Movie);
    assert_eq!(items[1].id, 3);
    assert_eq!(items[1].resolved_media_type(), MediaType::Tv);
  }

  #[test]
  fn detail_parses_flattened_item_and_videos() {
    let json = r#"{
      "id": 550,
      "title": "Fight Club",
      "vote_average": 8.4,
      "release_date": "1999-10-15",
      "genres": [{"id": 18, "name": "Drama"}],
      "overview": "A ticking-time-bomb insomniac.",
      "videos": {"results": [{"key": "abc123", "site": "YouTube", "type": "Trailer"}]}
    }"#;
    let detail: Detail = serde_json::from_str(json).unwrap();
    assert_eq!(detail.item.id, 550);
    assert_eq!(detail.item.genres[0].name, "Drama");
    assert_eq!(detail.trailer_key(), Some("abc123"));
  }

  #[test]
  fn trailer_key_requires_type_and_site() {
    let json = r#"{
      "id": 1,
      "title": "A",
      "videos": {"results": [
        {"key": "teaser1", "site": "YouTube", "type": "Teaser"},
        {"key": "vimeo1", "site": "Vimeo", "type": "Trailer"},
        {"key": "good1", "site": "YouTube", "type": "Trailer"},
        {"key": "good2", "site": "YouTube", "type": "Trailer"}
      ]}
    }"#;
    let detail: Detail = serde_json::from_str(json).unwrap();
    // First matching entry wins.
    assert_eq!(detail.trailer_key(), Some("good1"));
  }

  #[test]
  fn trailer_key_none_when_videos_missing() {
    let detail: Detail = serde_json::from_str(r#"{"id": 1, "title": "A"}"#).unwrap();
    assert_eq!(detail.trailer_key(), None);
  }
}
