//! Document provider contract.
//!
//! The platform's content provider subsystem is a black box keyed by URI: a
//! query returns a cursor over provider-defined columns. The only column the
//! bridge reads is `_data`, which many providers fill with a filesystem path.

use std::path::{Path, PathBuf};

use crate::uri::ResourceUri;

/// Column holding the backing file path.
pub const DATA_COLUMN: &str = "_data";

/// A `WHERE` clause with `?` placeholders and their arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub clause: String,
    pub args: Vec<String>,
}

impl Selection {
    pub fn new(clause: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }
}

/// A query result handle. Must be closed once the caller is done with it.
pub trait Cursor {
    /// Move to the first row. Returns false if there are no rows.
    fn move_to_first(&mut self) -> Result<bool, String>;
    fn column_index(&mut self, name: &str) -> Result<Option<usize>, String>;
    fn get_string(&mut self, index: usize) -> Result<Option<String>, String>;
    fn close(&mut self);
}

pub trait DocumentProvider {
    /// Query `uri`. `Ok(None)` means the provider returned no cursor at all.
    fn query(
        &self,
        uri: &ResourceUri,
        projection: &[&str],
        selection: Option<&Selection>,
    ) -> Result<Option<Box<dyn Cursor + '_>>, String>;

    /// Whether `uri` is backed by a document provider.
    fn is_document_uri(&self, uri: &ResourceUri) -> bool {
        uri.is_document_shaped()
    }

    /// Root of the primary shared storage volume.
    fn external_storage_directory(&self) -> Option<PathBuf>;

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Closes the wrapped cursor when dropped.
pub struct CursorGuard<'a> {
    cursor: Box<dyn Cursor + 'a>,
}

impl<'a> CursorGuard<'a> {
    pub fn new(cursor: Box<dyn Cursor + 'a>) -> Self {
        Self { cursor }
    }

    /// String value of `column` in the first row.
    pub fn first_string(&mut self, column: &str) -> Result<Option<String>, String> {
        if !self.cursor.move_to_first()? {
            return Ok(None);
        }
        match self.cursor.column_index(column)? {
            Some(index) => self.cursor.get_string(index),
            None => Ok(None),
        }
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.cursor.close();
    }
}

/// Value of the `_data` column for `uri`, if the provider has one.
pub fn query_data_column<P: DocumentProvider + ?Sized>(
    provider: &P,
    uri: &ResourceUri,
    selection: Option<&Selection>,
) -> Option<String> {
    let cursor = match provider.query(uri, &[DATA_COLUMN], selection) {
        Ok(Some(cursor)) => cursor,
        Ok(None) => {
            log::debug!("No cursor for {}", uri);
            return None;
        }
        Err(e) => {
            log::warn!("Query failed for {}: {}", uri, e);
            return None;
        }
    };

    let mut guard = CursorGuard::new(cursor);
    match guard.first_string(DATA_COLUMN) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Reading {} failed for {}: {}", DATA_COLUMN, uri, e);
            None
        }
    }
}
