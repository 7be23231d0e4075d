//! Bookmark list with write-through persistence.
//!
//! The canonical bookmark set lives in memory as an insertion-ordered list
//! keyed by `(id, media_type)`. Every toggle re-serializes the whole list and
//! writes it to the store, so storage is always a snapshot of the most recent
//! mutation.

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::constants::constants;
use crate::media::{Item, ItemKey};

/// Durable string storage for the serialized bookmark list. Injected so tests
/// can swap in an in-memory fake.
pub trait BookmarkStore {
  fn read(&self, key: &str) -> Option<String>;
  fn write(&self, key: &str, value: &str);
}

/// Store backed by a JSON file in the platform data directory.
/// I/O failures are logged and swallowed; bookmarks degrade to session-only.
pub struct FileStore;

impl FileStore {
  fn path_for(key: &str) -> Option<std::path::PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "movievault")?;
    let data_dir = proj_dirs.data_dir();
    if let Err(e) = std::fs::create_dir_all(data_dir) {
      warn!(err = %e, "could not create data dir");
      return None;
    }
    Some(data_dir.join(format!("{}.json", key)))
  }
}

impl BookmarkStore for FileStore {
  fn read(&self, key: &str) -> Option<String> {
    let path = Self::path_for(key)?;
    std::fs::read_to_string(path).ok()
  }

  fn write(&self, key: &str, value: &str) {
    if let Some(path) = Self::path_for(key)
      && let Err(e) = std::fs::write(&path, value)
    {
      warn!(err = %e, path = %path.display(), "failed to persist bookmarks");
    }
  }
}

pub struct Bookmarks {
  store: Box<dyn BookmarkStore>,
  items: Vec<Item>,
}

impl Bookmarks {
  /// Seed the list from the store. Missing or corrupt data yields an empty
  /// list, never an error.
  pub fn load(store: Box<dyn BookmarkStore>) -> Self {
    let key = &constants().bookmark_store_key;
    let items = match store.read(key) {
      Some(raw) => match serde_json::from_str::<Vec<Item>>(&raw) {
        Ok(items) => items,
        Err(e) => {
          warn!(err = %e, "stored bookmarks were unreadable, starting empty");
          Vec::new()
        }
      },
      None => Vec::new(),
    };
    info!(count = items.len(), "bookmarks loaded");
    Self { store, items }
  }

  /// Bookmarked items in insertion order.
  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn contains(&self, key: ItemKey) -> bool {
    self.items.iter().any(|b| b.key() == key)
  }

  /// Add or remove by identity. Inserted items are stamped with their
  /// resolved media type so a bookmark never needs re-inference later.
  /// The full list is written back to the store after every change.
  pub fn toggle(&mut self, item: &Item) {
    let key = item.key();
    if let Some(pos) = self.items.iter().position(|b| b.key() == key) {
      self.items.remove(pos);
      info!(id = key.id, media_type = ?key.media_type, "bookmark removed");
    } else {
      self.items.push(item.clone().with_resolved_media_type());
      info!(id = key.id, media_type = ?key.media_type, "bookmark added");
    }
    self.persist();
  }

  fn persist(&self) {
    match serde_json::to_string(&self.items) {
      Ok(raw) => self.store.write(&constants().bookmark_store_key, &raw),
      Err(e) => warn!(err = %e, "failed to serialize bookmarks"),
    }
  }
}
