//! Detail/trailer controller: the selected item behind the modal and its
//! asynchronously resolved trailer.
//!
//! Selection is set synchronously so the modal opens at once; the detail
//! lookup (and backdrop image fetch) runs in the background. A response is
//! applied only while the selection still has the identity the request was
//! made for, so switching items or closing the modal quietly drops late
//! responses.

use image::DynamicImage;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogClient, CatalogError, Detail};
use crate::media::{Item, ItemKey};

struct DetailOutcome {
  detail: Result<Detail, CatalogError>,
  backdrop: Option<DynamicImage>,
}

#[derive(Default)]
pub struct DetailView {
  selected: Option<Item>,
  trailer_key: Option<String>,
  backdrop: Option<DynamicImage>,
  pending: Option<(ItemKey, oneshot::Receiver<DetailOutcome>)>,
}

impl DetailView {
  pub fn selected(&self) -> Option<&Item> {
    self.selected.as_ref()
  }

  pub fn trailer_key(&self) -> Option<&str> {
    self.trailer_key.as_deref()
  }

  pub fn backdrop(&self) -> Option<&DynamicImage> {
    self.backdrop.as_ref()
  }

  pub fn is_open(&self) -> bool {
    self.selected.is_some()
  }

  /// Select an item and request its detail + videos. The media type is the
  /// item's explicit one, or inferred from its field shape when absent.
  pub fn open(&mut self, catalog: &CatalogClient, item: &Item) {
    let key = item.key();
    info!(id = key.id, media_type = ?key.media_type, title = %item.display_title(), "detail opened");
    self.selected = Some(item.clone());
    self.trailer_key = None;
    self.backdrop = None;

    let image_path = item.backdrop_path.clone().or_else(|| item.poster_path.clone());
    let client = catalog.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let detail = client.fetch_detail(key.media_type, key.id).await;
      let backdrop = match image_path {
        Some(path) => client.fetch_image(&path).await.ok(),
        None => None,
      };
      let _ = tx.send(DetailOutcome { detail, backdrop });
    });
    self.pending = Some((key, rx));
  }

  /// Clear selection and trailer key together.
  pub fn close(&mut self) {
    self.selected = None;
    self.trailer_key = None;
    self.backdrop = None;
    self.pending = None;
  }

  pub fn check_pending(&mut self) {
    let Some((requested, mut rx)) = self.pending.take() else { return };
    match rx.try_recv() {
      Ok(outcome) => self.apply(requested, outcome),
      Err(oneshot::error::TryRecvError::Empty) => {
        self.pending = Some((requested, rx));
      }
      Err(oneshot::error::TryRecvError::Closed) => {
        // Same degradation as a failed fetch: the modal stays image-only.
        warn!("detail task dropped without a result");
      }
    }
  }

  /// Apply a completed detail response. Fetch failures are swallowed — the
  /// modal keeps showing whatever the list row carried.
  fn apply(&mut self, requested: ItemKey, outcome: DetailOutcome) {
    let still_current = self.selected.as_ref().is_some_and(|s| s.key() == requested);
    if !still_current {
      debug!(id = requested.id, "stale detail response disregarded");
      return;
    }
    match outcome.detail {
      Ok(detail) => {
        self.trailer_key = detail.trailer_key().map(str::to_string);
        // The detail response carries genres and a full overview that list
        // rows lack; keep the richer copy under the same identity.
        self.selected = Some(detail.item);
      }
      Err(e) => {
        warn!(err = %e, id = requested.id, "detail fetch failed, showing image only");
      }
    }
    self.backdrop = outcome.backdrop;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{Video, VideoList};
  use crate::media::MediaType;

  fn item(id: u64, title: Option<&str>, name: Option<&str>) -> Item {
    Item {
      id,
      media_type: None,
      title: title.map(str::to_string),
      name: name.map(str::to_string),
      poster_path: None,
      backdrop_path: None,
      vote_average: 0.0,
      release_date: None,
      first_air_date: None,
      genres: Vec::new(),
      overview: String::new(),
    }
  }

  fn outcome_with_trailer(item: Item, key: &str) -> DetailOutcome {
    DetailOutcome {
      detail: Ok(Detail {
        item,
        videos: VideoList {
          results: vec![Video { key: key.to_string(), site: "YouTube".to_string(), kind: "Trailer".to_string() }],
        },
      }),
      backdrop: None,
    }
  }

  #[tokio::test]
  async fn open_sets_selection_immediately_and_infers_movie() {
    let catalog = CatalogClient::new("test-key".to_string());
    let mut view = DetailView::default();

    view.open(&catalog, &item(9, Some("X"), None));
    assert!(view.is_open());
    assert_eq!(view.trailer_key(), None);
    // The request was issued for (movie, 9) because the item carries `title`.
    let (requested, _) = view.pending.as_ref().unwrap();
    assert_eq!(*requested, ItemKey { id: 9, media_type: MediaType::Movie });
  }

  #[tokio::test]
  async fn open_infers_tv_without_title() {
    let catalog = CatalogClient::new("test-key".to_string());
    let mut view = DetailView::default();

    view.open(&catalog, &item(4, None, Some("Show")));
    let (requested, _) = view.pending.as_ref().unwrap();
    assert_eq!(requested.media_type, MediaType::Tv);
  }

  #[test]
  fn close_clears_selection_and_trailer_together() {
    let mut view = DetailView::default();
    view.selected = Some(item(1, Some("A"), None));
    view.trailer_key = Some("abc".to_string());

    view.close();
    assert!(!view.is_open());
    assert_eq!(view.trailer_key(), None);
  }

  #[test]
  fn matching_response_sets_trailer() {
    let mut view = DetailView::default();
    let selected = item(9, Some("X"), None);
    view.selected = Some(selected.clone());

    view.apply(selected.key(), outcome_with_trailer(selected.with_resolved_media_type(), "abc123"));
    assert_eq!(view.trailer_key(), Some("abc123"));
  }

  #[test]
  fn stale_response_after_selection_change_is_disregarded() {
    let mut view = DetailView::default();
    let first = item(9, Some("X"), None);
    let second = item(10, Some("Y"), None);
    view.selected = Some(second.clone());

    // The response for the first item arrives after the user moved on.
    view.apply(first.key(), outcome_with_trailer(first.with_resolved_media_type(), "late"));
    assert_eq!(view.trailer_key(), None);
    assert_eq!(view.selected().unwrap().id, 10);
  }

  #[test]
  fn stale_response_after_close_is_disregarded() {
    let mut view = DetailView::default();
    let selected = item(9, Some("X"), None);

    view.apply(selected.key(), outcome_with_trailer(selected.with_resolved_media_type(), "late"));
    assert!(!view.is_open());
    assert_eq!(view.trailer_key(), None);
  }

  #[test]
  fn failed_fetch_leaves_modal_open_without_trailer() {
    let mut view = DetailView::default();
    let selected = item(9, Some("X"), None);
    view.selected = Some(selected.clone());

    view.apply(
      selected.key(),
      DetailOutcome { detail: Err(CatalogError::Transport("unreachable".to_string())), backdrop: None },
    );
    assert!(view.is_open());
    assert_eq!(view.trailer_key(), None);
  }

  #[test]
  fn response_without_trailer_keeps_key_none() {
    let mut view = DetailView::default();
    let selected = item(9, Some("X"), None);
    view.selected = Some(selected.clone());

    view.apply(
      selected.key(),
      DetailOutcome {
        detail: Ok(Detail { item: selected.with_resolved_media_type(), videos: VideoList::default() }),
        backdrop: None,
      },
    );
    assert_eq!(view.trailer_key(), None);
  }
}
