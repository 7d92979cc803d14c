use super::models::Album;

pub const COLUMN_HEADERS: [&str; 5] = ["#", "Title", "Artist", "Genre", "Album ID"];

/// Display form of one album in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRow {
    /// 1-based position in the collection.
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Identifier handed to the store when this row is deleted.
    pub album_id: String,
}

impl AlbumRow {
    pub fn cells(&self) -> [String; 5] {
        [
            self.position.to_string(),
            self.title.clone(),
            self.artist.clone(),
            self.genre.clone(),
            self.album_id.clone(),
        ]
    }
}

/// Maps the collection to table rows, preserving order.
pub fn album_rows(albums: &[Album]) -> Vec<AlbumRow> {
    albums
        .iter()
        .enumerate()
        .map(|(index, album)| AlbumRow {
            position: index + 1,
            title: album.title.clone(),
            artist: album.artist.clone(),
            genre: album.genre.clone(),
            album_id: album.album_id.clone(),
        })
        .collect()
}
