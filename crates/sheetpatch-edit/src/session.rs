use sheetpatch_io::{load_from_bytes, save_to_bytes, CodecError, SpreadsheetCodec};
use sheetpatch_model::{CellValue, Document};
use thiserror::Error;

use crate::{merge, Grid, InvalidAddressError, MergeError};

/// Errors raised when saving a session.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The reconstructed container, ready for an external delivery mechanism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedArtifact {
    /// User-facing label for the artifact.
    pub file_name: String,
    /// Serialized container bytes.
    pub bytes: Vec<u8>,
}

/// One editing session: an immutable original document plus the live grid
/// derived from its first sheet.
///
/// Sessions own their state; any number of them coexist independently.
/// Saving merges the grid back against the original and serializes the
/// result; the original document is untouched, so a session can keep
/// editing (and saving again) after a save.
#[derive(Clone, Debug)]
pub struct EditSession {
    original: Document,
    grid: Grid,
    file_name: String,
}

impl EditSession {
    /// Load a container and start editing its first sheet.
    ///
    /// `file_name` is used only to label the saved artifact. A document
    /// with no sheets opens fine (there is nothing to project); the
    /// missing-sheet error surfaces on save, from the merge.
    pub fn open(
        codec: &dyn SpreadsheetCodec,
        bytes: &[u8],
        file_name: impl Into<String>,
    ) -> Result<Self, CodecError> {
        let original = load_from_bytes(codec, bytes)?;
        let grid = original.first_sheet().map(Grid::from_sheet).unwrap_or_default();
        Ok(Self {
            original,
            grid,
            file_name: file_name.into(),
        })
    }

    /// The loaded document, as parsed.
    pub fn document(&self) -> &Document {
        &self.original
    }

    /// The live editing grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The label the next [`EditSession::save`] will use.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Apply one cell edit.
    ///
    /// A rejected address leaves the session untouched and editable.
    pub fn set_cell(
        &mut self,
        row: u32,
        col: u32,
        value: impl Into<CellValue>,
    ) -> Result<(), InvalidAddressError> {
        self.grid.set_cell(row, col, value)
    }

    /// Merge and serialize under the session's file name.
    pub fn save(&self, codec: &dyn SpreadsheetCodec) -> Result<SavedArtifact, SaveError> {
        self.save_as(codec, self.file_name.clone())
    }

    /// Merge and serialize under a caller-chosen name.
    pub fn save_as(
        &self,
        codec: &dyn SpreadsheetCodec,
        file_name: impl Into<String>,
    ) -> Result<SavedArtifact, SaveError> {
        let output = merge(&self.original, &self.grid)?;
        let bytes = save_to_bytes(codec, &output)?;
        Ok(SavedArtifact {
            file_name: file_name.into(),
            bytes,
        })
    }
}
