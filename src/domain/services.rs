//! Persisted collection management.
//!
//! `CollectionStore` is the only owner of the stored album list. It keeps
//! no state of its own: every call reads the slot, works on the decoded
//! list in memory and, for mutations, writes the whole list back.

use super::errors::{DomainError, DomainResult};
use super::models::Album;
use super::storage::KeyValueStorage;
use log::{debug, warn};

/// Slot holding the JSON-encoded album list.
pub const ALBUMS_KEY: &str = "albums";

/// Read/modify/write access to the persisted album collection.
///
/// # Examples
///
/// ```
/// use albumlist::domain::{Album, CollectionStore};
/// use albumlist::infrastructure::MemoryStorage;
///
/// let mut store = CollectionStore::new(MemoryStorage::default());
/// assert!(store.get_all().unwrap().is_empty());
///
/// let album = Album::new("OK Computer", "Radiohead", "Rock", "1").unwrap();
/// store.add(album.clone()).unwrap();
/// assert_eq!(store.get_all().unwrap(), vec![album]);
/// assert!(store.has_duplicate("1").unwrap());
/// ```
#[derive(Debug)]
pub struct CollectionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CollectionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, ALBUMS_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the whole collection.
    ///
    /// A slot that was never written is an empty collection. Anything that
    /// is not a JSON array of albums yields `DomainError::CorruptStorage`.
    pub fn get_all(&self) -> DomainResult<Vec<Album>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str::<Vec<Album>>(&raw).map_err(|e| {
            warn!("slot `{}` holds unreadable data: {}", self.key, e);
            DomainError::CorruptStorage(e.to_string())
        })
    }

    /// Appends `album` to the end of the collection.
    ///
    /// Identifiers are not checked here; call [`Self::has_duplicate`] first.
    pub fn add(&mut self, album: Album) -> DomainResult<()> {
        let mut albums = self.get_all()?;
        debug!("adding album_id={} at position {}", album.album_id, albums.len());
        albums.push(album);
        self.write_all(&albums)
    }

    /// Removes every album whose identifier equals `album_id`.
    ///
    /// Returns how many were removed. Zero is not an error.
    pub fn remove(&mut self, album_id: &str) -> DomainResult<usize> {
        let mut albums = self.get_all()?;
        let before = albums.len();
        albums.retain(|album| album.album_id != album_id);
        let removed = before - albums.len();
        debug!("removing album_id={} matched {} record(s)", album_id, removed);
        self.write_all(&albums)?;
        Ok(removed)
    }

    pub fn has_duplicate(&self, album_id: &str) -> DomainResult<bool> {
        let mut is_duplicate = false;
        for album in self.get_all()? {
            if album.album_id == album_id {
                is_duplicate = true;
                break;
            }
        }
        Ok(is_duplicate)
    }

    fn write_all(&mut self, albums: &[Album]) -> DomainResult<()> {
        let json = serde_json::to_string(albums)
            .map_err(|e| DomainError::CorruptStorage(format!("serialization failed: {}", e)))?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StorageError;
    use crate::infrastructure::MemoryStorage;
    use std::cell::Cell;

    fn album(title: &str, album_id: &str) -> Album {
        Album::new(title, "Radiohead", "Rock", album_id).unwrap()
    }

    fn ids(albums: &[Album]) -> Vec<&str> {
        albums.iter().map(|a| a.album_id.as_str()).collect()
    }

    fn store_with(albums: &[Album]) -> CollectionStore<MemoryStorage> {
        let mut storage = MemoryStorage::default();
        storage
            .set(ALBUMS_KEY, &serde_json::to_string(albums).unwrap())
            .unwrap();
        CollectionStore::new(storage)
    }

    /// Wraps a storage and counts reads so tests can see that nothing is cached.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        reads: Cell<usize>,
        writes: usize,
    }

    impl KeyValueStorage for CountingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.reads.set(self.reads.get() + 1);
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }
    }

    #[test]
    fn test_get_all_empty_storage() {
        let store = CollectionStore::new(MemoryStorage::default());
        assert_eq!(store.get_all().unwrap(), Vec::<Album>::new());
    }

    #[test]
    fn test_add_then_get_all() {
        let mut store = CollectionStore::new(MemoryStorage::default());
        let ok_computer = Album::new("OK Computer", "Radiohead", "Rock", "1").unwrap();

        store.add(ok_computer.clone()).unwrap();

        assert_eq!(store.get_all().unwrap(), vec![ok_computer]);
    }

    #[test]
    fn test_add_grows_by_one_and_appends() {
        let mut store = store_with(&[album("A", "1"), album("B", "2")]);
        let before = store.get_all().unwrap().len();

        store.add(album("C", "3")).unwrap();

        let albums = store.get_all().unwrap();
        assert_eq!(albums.len(), before + 1);
        assert_eq!(ids(&albums), vec!["1", "2", "3"]);
        assert_eq!(albums.iter().filter(|a| a.album_id == "3").count(), 1);
    }

    #[test]
    fn test_add_does_not_enforce_uniqueness() {
        let mut store = CollectionStore::new(MemoryStorage::default());
        let record = album("OK Computer", "1");

        store.add(record.clone()).unwrap();
        store.add(record.clone()).unwrap();

        assert_eq!(store.get_all().unwrap(), vec![record.clone(), record]);
    }

    #[test]
    fn test_remove_drops_all_matches() {
        let mut store = store_with(&[album("A", "1"), album("B", "2"), album("C", "1")]);

        let removed = store.remove("1").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.get_all().unwrap(), vec![album("B", "2")]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = store_with(&[album("A", "1")]);

        assert_eq!(store.remove("42").unwrap(), 0);
        assert_eq!(store.get_all().unwrap(), vec![album("A", "1")]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = store_with(&[album("A", "1"), album("B", "2"), album("C", "3")]);

        store.remove("2").unwrap();
        let once = store.get_all().unwrap();
        store.remove("2").unwrap();

        assert_eq!(store.get_all().unwrap(), once);
        assert_eq!(ids(&once), vec!["1", "3"]);
    }

    #[test]
    fn test_has_duplicate() {
        let store = store_with(&[album("A", "1"), album("B", "2")]);
        assert!(store.has_duplicate("1").unwrap());
        assert!(store.has_duplicate("2").unwrap());
        assert!(!store.has_duplicate("99").unwrap());
        assert!(!store.has_duplicate("").unwrap());
    }

    #[test]
    fn test_has_duplicate_on_empty_storage() {
        let store = CollectionStore::new(MemoryStorage::default());
        assert!(!store.has_duplicate("1").unwrap());
    }

    #[test]
    fn test_every_operation_rereads_storage() {
        let mut store = CollectionStore::new(CountingStorage::default());

        store.get_all().unwrap();
        store.has_duplicate("1").unwrap();
        store.add(album("A", "1")).unwrap();
        store.remove("1").unwrap();

        assert_eq!(store.storage().reads.get(), 4);
        assert_eq!(store.storage().writes, 2);
    }

    #[test]
    fn test_sees_writes_made_behind_its_back() {
        let mut store = CollectionStore::new(MemoryStorage::default());
        store.add(album("A", "1")).unwrap();

        let raw = serde_json::to_string(&[album("Z", "9")]).unwrap();
        store.storage.set(ALBUMS_KEY, &raw).unwrap();

        assert_eq!(ids(&store.get_all().unwrap()), vec!["9"]);
    }

    #[test]
    fn test_corrupt_storage_not_json() {
        let mut storage = MemoryStorage::default();
        storage.set(ALBUMS_KEY, "{not json").unwrap();
        let mut store = CollectionStore::new(storage);

        assert!(matches!(store.get_all(), Err(DomainError::CorruptStorage(_))));
        assert!(matches!(store.has_duplicate("1"), Err(DomainError::CorruptStorage(_))));
        assert!(matches!(store.add(album("A", "1")), Err(DomainError::CorruptStorage(_))));
        // the bad slot is left untouched for inspection
        assert_eq!(store.storage().get(ALBUMS_KEY).unwrap().unwrap(), "{not json");
    }

    #[test]
    fn test_corrupt_storage_wrong_shape() {
        for raw in [
            r#"{"title":"A"}"#,
            r#"[{"title":"A","artist":"B","genre":"C"}]"#,
            r#"[{"title":"A","artist":"B","genre":"C","albumId":1}]"#,
            r#"["just a string"]"#,
        ] {
            let mut storage = MemoryStorage::default();
            storage.set(ALBUMS_KEY, raw).unwrap();
            let store = CollectionStore::new(storage);
            assert!(
                matches!(store.get_all(), Err(DomainError::CorruptStorage(_))),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn test_reads_existing_layout() {
        let mut storage = MemoryStorage::default();
        storage
            .set(
                ALBUMS_KEY,
                r#"[{"title":"OK Computer","artist":"Radiohead","genre":"Rock","albumId":"1"}]"#,
            )
            .unwrap();
        let store = CollectionStore::new(storage);

        assert_eq!(
            store.get_all().unwrap(),
            vec![Album::new("OK Computer", "Radiohead", "Rock", "1").unwrap()]
        );
    }

    #[test]
    fn test_write_back_keeps_unknown_keys() {
        let mut storage = MemoryStorage::default();
        storage
            .set(
                ALBUMS_KEY,
                r#"[{"title":"A","artist":"B","genre":"C","albumId":"1","year":"1997"},{"title":"X","artist":"Y","genre":"Z","albumId":"9"}]"#,
            )
            .unwrap();
        let mut store = CollectionStore::new(storage);

        store.add(Album::new("D", "E", "F", "2").unwrap()).unwrap();
        store.remove("9").unwrap();

        let raw = store.storage().get(ALBUMS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"title":"A","artist":"B","genre":"C","albumId":"1","year":"1997"},{"title":"D","artist":"E","genre":"F","albumId":"2"}]"#
        );
    }

    #[test]
    fn test_custom_key_isolated() {
        let mut store = CollectionStore::with_key(MemoryStorage::default(), "wishlist");
        store.add(album("A", "1")).unwrap();

        assert!(store.storage().get(ALBUMS_KEY).unwrap().is_none());
        assert!(store.storage().get("wishlist").unwrap().is_some());
    }

    #[test]
    fn test_storage_failure_propagates() {
        let mut store = CollectionStore::new(FailingStorage);
        assert!(matches!(store.get_all(), Err(DomainError::Storage(_))));
        assert!(matches!(store.remove("1"), Err(DomainError::Storage(_))));
    }
}
