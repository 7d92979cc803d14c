use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{DomainError, DomainResult};

/// One album entry in the collection.
///
/// Serialized with the `albumId` key so stored lists stay readable by
/// anything that already wrote them in that shape. Keys this app does not
/// know about are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    pub artist: String,
    pub genre: String,
    #[serde(rename = "albumId")]
    pub album_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Album {
    /// Builds an album from raw form input.
    ///
    /// Every field is trimmed; a field that is empty afterwards is reported
    /// in the returned `DomainError::Validation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use albumlist::domain::Album;
    ///
    /// let album = Album::new(" OK Computer ", "Radiohead", "Rock", "1").unwrap();
    /// assert_eq!(album.title, "OK Computer");
    /// assert!(Album::new("", "Radiohead", "Rock", "1").is_err());
    /// ```
    pub fn new(title: &str, artist: &str, genre: &str, album_id: &str) -> DomainResult<Self> {
        let fields = [
            ("title", title.trim()),
            ("artist", artist.trim()),
            ("genre", genre.trim()),
            ("album ID", album_id.trim()),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::Validation { missing });
        }

        Ok(Self {
            title: fields[0].1.to_string(),
            artist: fields[1].1.to_string(),
            genre: fields[2].1.to_string(),
            album_id: fields[3].1.to_string(),
            extra: Map::new(),
        })
    }
}

/// Input fields of the album form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Artist,
    Genre,
    AlbumId,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Artist,
        FormField::Genre,
        FormField::AlbumId,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Artist => "Artist",
            FormField::Genre => "Genre",
            FormField::AlbumId => "Album ID",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Artist,
            FormField::Artist => FormField::Genre,
            FormField::Genre => FormField::AlbumId,
            FormField::AlbumId => FormField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::AlbumId,
            FormField::Artist => FormField::Title,
            FormField::Genre => FormField::Artist,
            FormField::AlbumId => FormField::Genre,
        }
    }
}

/// Text typed into the album form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumForm {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub album_id: String,
}

impl AlbumForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Artist => &self.artist,
            FormField::Genre => &self.genre,
            FormField::AlbumId => &self.album_id,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Artist => &mut self.artist,
            FormField::Genre => &mut self.genre,
            FormField::AlbumId => &mut self.album_id,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_album(&self) -> DomainResult<Album> {
        Album::new(&self.title, &self.artist, &self.genre, &self.album_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_new_trims_fields() {
        let album = Album::new("  Kid A", "Radiohead  ", " Electronic ", " 2 ").unwrap();
        assert_eq!(album.title, "Kid A");
        assert_eq!(album.artist, "Radiohead");
        assert_eq!(album.genre, "Electronic");
        assert_eq!(album.album_id, "2");
    }

    #[test]
    fn test_album_new_reports_every_empty_field() {
        let err = Album::new("", "Radiohead", "   ", "").unwrap_err();
        match err {
            DomainError::Validation { missing } => {
                assert_eq!(missing, vec!["title", "genre", "album ID"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_album_serializes_album_id_key() {
        let album = Album::new("OK Computer", "Radiohead", "Rock", "1").unwrap();
        let json = serde_json::to_string(&album).unwrap();
        assert_eq!(
            json,
            r#"{"title":"OK Computer","artist":"Radiohead","genre":"Rock","albumId":"1"}"#
        );
    }

    #[test]
    fn test_album_keeps_unknown_keys() {
        let raw = r#"{"title":"A","artist":"B","genre":"C","albumId":"1","year":"1997"}"#;
        let album: Album = serde_json::from_str(raw).unwrap();
        assert_eq!(album.album_id, "1");
        assert_eq!(album.extra.get("year"), Some(&Value::from("1997")));
        assert!(!album.extra.contains_key("albumId"));

        let json = serde_json::to_string(&album).unwrap();
        assert_eq!(json, raw);
    }

    #[test]
    fn test_form_field_cycle() {
        let mut field = FormField::Title;
        for _ in 0..FormField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.previous(), FormField::AlbumId);
        assert_eq!(FormField::AlbumId.next(), FormField::Title);
    }

    #[test]
    fn test_form_field_access_and_clear() {
        let mut form = AlbumForm::default();
        form.field_mut(FormField::Artist).push_str("Björk");
        assert_eq!(form.field(FormField::Artist), "Björk");
        assert_eq!(form.field(FormField::Title), "");

        form.clear();
        assert_eq!(form, AlbumForm::default());
    }
}
