//! Application state management for the album list.
//!
//! This module contains the main application state, mode management and
//! the user workflows (add, delete, alerts) that sit between the terminal
//! UI and the collection store.

use crate::domain::{
    album_rows, AlbumForm, AlbumRow, CollectionStore, DomainError, FormField, KeyValueStorage,
};
use log::{error, info};
use std::time::{Duration, Instant};

/// How long success and danger alerts stay on screen.
pub const ALERT_DURATION: Duration = Duration::from_secs(3);

pub const WELCOME_MESSAGE: &str =
    "Enter any album in the input form below and add it to your album list";
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields";
pub const DUPLICATE_MESSAGE: &str =
    "An album with that ID already exists. Please enter a different ID.";
pub const ADDED_MESSAGE: &str = "Album added successfully";
pub const DELETED_MESSAGE: &str = "Album deleted successfully!";

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Table navigation - arrow keys move the selected row
    Normal,
    /// The album form is open and receives typed input
    Form,
    /// Help screen is displayed
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
    /// Storage is unusable; stays until storage reads cleanly again.
    Fatal,
}

/// A banner message shown above the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    pub shown_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.kind != AlertKind::Fatal && now.duration_since(self.shown_at) >= ALERT_DURATION
    }
}

/// Main application state.
///
/// Holds the collection store, the rows currently displayed, and the form
/// and alert state needed to render the terminal UI.
///
/// # Examples
///
/// ```
/// use albumlist::application::{App, AppMode};
/// use albumlist::domain::CollectionStore;
/// use albumlist::infrastructure::MemoryStorage;
///
/// let app = App::new(CollectionStore::new(MemoryStorage::default()));
/// assert!(app.rows.is_empty());
/// assert_eq!(app.mode, AppMode::Normal);
/// ```
#[derive(Debug)]
pub struct App<S> {
    store: CollectionStore<S>,
    /// Rows rendered in the album table
    pub rows: Vec<AlbumRow>,
    /// Currently selected table row (zero-based)
    pub selected_row: usize,
    pub mode: AppMode,
    /// Form input buffers
    pub form: AlbumForm,
    /// Form field receiving input
    pub focused_field: FormField,
    /// Cursor position within the focused field, in characters
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Transient banner message, if any
    pub alert: Option<Alert>,
    /// Storage failure banner; outlives transient alerts
    pub fatal: Option<Alert>,
}

impl<S: KeyValueStorage> App<S> {
    /// Creates the app and performs the initial display.
    ///
    /// The welcome alert is shown once the collection has been read; if the
    /// stored list is unreadable a fatal alert is shown instead.
    pub fn new(store: CollectionStore<S>) -> Self {
        let mut app = Self {
            store,
            rows: Vec::new(),
            selected_row: 0,
            mode: AppMode::Normal,
            form: AlbumForm::default(),
            focused_field: FormField::Title,
            cursor_position: 0,
            help_scroll: 0,
            alert: None,
            fatal: None,
        };

        if app.refresh() {
            app.show_alert(WELCOME_MESSAGE, AlertKind::Success);
        }
        app
    }

    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// Re-reads the collection and rebuilds the rows.
    ///
    /// Returns false when storage could not be read; a fatal alert is shown.
    /// A successful read clears any earlier fatal alert.
    pub fn refresh(&mut self) -> bool {
        match self.store.get_all() {
            Ok(albums) => {
                self.fatal = None;
                self.rows = album_rows(&albums);
                self.clamp_selection();
                true
            }
            Err(e) => {
                self.report_error(&e);
                false
            }
        }
    }

    /// Shows a banner. Fatal alerts go to their own slot so later success
    /// or danger alerts never hide them.
    pub fn show_alert(&mut self, message: impl Into<String>, kind: AlertKind) {
        let alert = Alert {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        };
        if kind == AlertKind::Fatal {
            self.fatal = Some(alert);
        } else {
            self.alert = Some(alert);
        }
    }

    /// Drops the transient alert if it has been shown long enough.
    pub fn tick(&mut self, now: Instant) {
        if self.alert.as_ref().is_some_and(|alert| alert.is_expired(now)) {
            self.alert = None;
        }
    }

    /// Opens the form with focus on the first field.
    pub fn open_form(&mut self) {
        self.mode = AppMode::Form;
        self.focus_field(FormField::Title);
    }

    /// Closes the form, keeping whatever was typed.
    pub fn close_form(&mut self) {
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.focused_field = field;
        self.cursor_position = self.form.field(field).chars().count();
    }

    pub fn focus_next_field(&mut self) {
        self.focus_field(self.focused_field.next());
    }

    pub fn focus_previous_field(&mut self) {
        self.focus_field(self.focused_field.previous());
    }

    /// Validates the form and adds the album.
    ///
    /// Empty fields and duplicate identifiers abort with a danger alert
    /// before anything is written. On success the fields are cleared and
    /// focus returns to the first field.
    pub fn submit_form(&mut self) {
        let album = match self.form.to_album() {
            Ok(album) => album,
            Err(e) => {
                self.report_error(&e);
                return;
            }
        };

        match self.store.has_duplicate(&album.album_id) {
            Ok(false) => {}
            Ok(true) => {
                info!("rejected duplicate album_id={}", album.album_id);
                self.report_error(&DomainError::DuplicateIdentifier(album.album_id));
                return;
            }
            Err(e) => {
                self.report_error(&e);
                return;
            }
        }

        let album_id = album.album_id.clone();
        if let Err(e) = self.store.add(album) {
            self.report_error(&e);
            return;
        }
        info!("added album_id={}", album_id);

        if self.refresh() {
            self.selected_row = self.rows.len().saturating_sub(1);
            self.show_alert(ADDED_MESSAGE, AlertKind::Success);
        }
        self.form.clear();
        self.focus_field(FormField::Title);
    }

    /// Deletes every album sharing the selected row's identifier.
    pub fn delete_selected(&mut self) {
        let Some(row) = self.rows.get(self.selected_row) else {
            return;
        };
        let album_id = row.album_id.clone();

        match self.store.remove(&album_id) {
            Ok(removed) => {
                info!("deleted album_id={} ({} record(s))", album_id, removed);
                if self.refresh() {
                    self.show_alert(DELETED_MESSAGE, AlertKind::Success);
                }
            }
            Err(e) => self.report_error(&e),
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_row + 1 < self.rows.len() {
            self.selected_row += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.rows.len().saturating_sub(1);
    }

    pub fn insert_char(&mut self, c: char) {
        let position = self.cursor_position;
        let field = self.form.field_mut(self.focused_field);
        let index = byte_index(field, position);
        field.insert(index, c);
        self.cursor_position += 1;
    }

    /// Removes the character before the cursor.
    pub fn delete_char_before_cursor(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let position = self.cursor_position - 1;
        let field = self.form.field_mut(self.focused_field);
        let index = byte_index(field, position);
        field.remove(index);
        self.cursor_position = position;
    }

    /// Removes the character under the cursor.
    pub fn delete_char_at_cursor(&mut self) {
        let position = self.cursor_position;
        let field = self.form.field_mut(self.focused_field);
        if position < field.chars().count() {
            let index = byte_index(field, position);
            field.remove(index);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.form.field(self.focused_field).chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.form.field(self.focused_field).chars().count();
    }

    fn clamp_selection(&mut self) {
        if self.selected_row >= self.rows.len() {
            self.selected_row = self.rows.len().saturating_sub(1);
        }
    }

    fn report_error(&mut self, err: &DomainError) {
        match err {
            DomainError::Validation { .. } => self.show_alert(VALIDATION_MESSAGE, AlertKind::Danger),
            DomainError::DuplicateIdentifier(_) => {
                self.show_alert(DUPLICATE_MESSAGE, AlertKind::Danger)
            }
            DomainError::CorruptStorage(_) | DomainError::Storage(_) => {
                error!("storage unusable: {}", err);
                self.show_alert(err.to_string(), AlertKind::Fatal);
            }
        }
    }
}

fn byte_index(s: &str, char_position: usize) -> usize {
    s.char_indices()
        .nth(char_position)
        .map(|(index, _)| index)
        .unwrap_or(s.len())
}
