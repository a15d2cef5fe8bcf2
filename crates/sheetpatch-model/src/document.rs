use serde::{Deserialize, Serialize};

use crate::{Sheet, WorkbookMetadata};

fn default_schema_version() -> u32 {
    crate::SCHEMA_VERSION
}

/// One parsed spreadsheet file.
///
/// A document is constructed once per load and treated as immutable
/// afterwards: edits happen on a values-only grid projection, and saving
/// reconstructs a new output document instead of mutating this one. That
/// convention is what makes "copy everything not explicitly overridden" a
/// structural guarantee rather than a per-field chore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Serialization schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ordered worksheets. The first sheet is the editing target.
    #[serde(default)]
    pub sheets: Vec<Sheet>,

    /// Opaque workbook-level metadata, reattached verbatim on save.
    #[serde(default, skip_serializing_if = "WorkbookMetadata::is_empty")]
    pub workbook_metadata: WorkbookMetadata,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document with no sheets.
    pub fn new() -> Self {
        Self {
            schema_version: crate::SCHEMA_VERSION,
            sheets: Vec::new(),
            workbook_metadata: WorkbookMetadata::new(),
        }
    }

    /// Create a document holding a single sheet.
    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheets: vec![sheet],
            ..Self::new()
        }
    }

    /// The first sheet, if any.
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Look up a sheet by name.
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}
