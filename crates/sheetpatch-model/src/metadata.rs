use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CellRef, Range};

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_true(v: &bool) -> bool {
    *v
}

fn default_true() -> bool {
    true
}

/// A document part carried through the pipeline verbatim.
///
/// Payloads are never interpreted; the name is whatever the source container
/// calls the part. Preserving part bytes unchanged is the whole contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreservedPart {
    /// Part name within the source container.
    pub name: String,
    /// Raw payload, byte-for-byte as loaded.
    #[serde(with = "crate::serde_b64::bytes")]
    pub bytes: Vec<u8>,
}

impl PreservedPart {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A comment anchored to a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The cell the comment is attached to.
    pub cell: CellRef,
    /// Display name of the comment author.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Plain-text comment body.
    pub text: String,
}

/// Page margins, in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        // Excel's "Normal" margin preset.
        Self {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// Sheet protection state.
///
/// Modeled as the enable flag plus the subset of allow-flags the source
/// formats agree on; preserved as-is, never enforced by the editing layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetProtection {
    /// Whether sheet protection is enabled.
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Allow selecting locked cells while protected. Defaults to true.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub select_locked_cells: bool,

    /// Allow selecting unlocked cells while protected. Defaults to true.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub select_unlocked_cells: bool,

    /// Allow formatting cells.
    #[serde(skip_serializing_if = "is_false")]
    pub format_cells: bool,

    /// Allow sorting.
    #[serde(skip_serializing_if = "is_false")]
    pub sort: bool,

    /// Allow using autofilter.
    #[serde(skip_serializing_if = "is_false")]
    pub auto_filter: bool,

    /// Allow editing embedded objects.
    #[serde(skip_serializing_if = "is_false")]
    pub edit_objects: bool,
}

impl Default for SheetProtection {
    fn default() -> Self {
        Self {
            enabled: false,
            select_locked_cells: true,
            select_unlocked_cells: true,
            format_cells: false,
            sort: false,
            auto_filter: false,
            edit_objects: false,
        }
    }
}

/// Structural sheet properties not owned by any individual cell.
///
/// Every field is preserved independently across a load-edit-save cycle;
/// none of them is derived from (or re-validated against) cell content.
/// Value edits change values, never structural layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetMetadata {
    /// Merged cell regions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merged_ranges: Vec<Range>,

    /// Explicit column widths, keyed by 0-indexed column.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub col_widths: BTreeMap<u32, f64>,

    /// Explicit row heights, keyed by 0-indexed row.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub row_heights: BTreeMap<u32, f64>,

    /// Page margins, when the source specifies them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<PageMargins>,

    /// Row outline (grouping) levels, 0-7, keyed by 0-indexed row.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outline_rows: BTreeMap<u32, u8>,

    /// Column outline (grouping) levels, 0-7, keyed by 0-indexed column.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outline_cols: BTreeMap<u32, u8>,

    /// Sheet protection state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection: Option<SheetProtection>,

    /// Autofilter range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofilter: Option<Range>,

    /// Embedded images and drawing parts, carried verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drawings: Vec<PreservedPart>,

    /// Cell comments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    /// Pivot table definition parts, carried verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pivot_parts: Vec<PreservedPart>,

    /// Page header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    /// Page footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl SheetMetadata {
    /// Returns true if every field is at its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// The opaque workbook-level metadata bag.
///
/// Holds every workbook property not tied to a single cell or sheet: theme
/// parts, style definitions, macro payloads, file-level feature flags.
/// Loaded verbatim, never interpreted, reattached verbatim to the output
/// document. `BTreeMap` keeps part ordering deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookMetadata {
    #[serde(default, with = "crate::serde_b64::part_map")]
    parts: BTreeMap<String, Vec<u8>>,
}

impl WorkbookMetadata {
    /// An empty metadata bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the bag holds no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look up a part's payload by name.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    /// Insert or replace a part.
    pub fn set_part(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.parts.insert(name.into(), bytes.into());
    }

    /// Iterate part names in deterministic order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Iterate parts in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.parts
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }
}
