use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{CellRef, CellValue};

/// Maximum rows per sheet (Excel-compatible, 1,048,576).
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum columns per sheet (Excel-compatible, 16,384).
pub const MAX_COLS: u32 = 16_384;

const COL_BITS: u32 = 14; // 2^14 = 16,384 columns.
const COL_MASK: u64 = (1u64 << COL_BITS) - 1;

/// Compact key used for sparse cell storage.
///
/// The key packs a `(row, col)` pair into a `u64`:
///
/// ```text
/// key = (row << 14) | col
/// ```
///
/// This supports the maximum sheet dimensions while keeping the key within
/// 34 bits (JSON-safe for JavaScript numbers). Ordering is row-major, which
/// keeps sparse-map iteration deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
pub struct CellKey(u64);

impl CellKey {
    /// Encode a `(row, col)` coordinate into a compact [`CellKey`].
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        assert!(row < MAX_ROWS, "row out of sheet bounds: {row}");
        assert!(col < MAX_COLS, "col out of sheet bounds: {col}");
        Self(((row as u64) << COL_BITS) | (col as u64))
    }

    /// Decode the row component (0-indexed).
    #[inline]
    pub const fn row(self) -> u32 {
        (self.0 >> COL_BITS) as u32
    }

    /// Decode the column component (0-indexed).
    #[inline]
    pub const fn col(self) -> u32 {
        (self.0 & COL_MASK) as u32
    }

    /// Convert to a [`CellRef`].
    #[inline]
    pub const fn to_ref(self) -> CellRef {
        CellRef::new(self.row(), self.col())
    }

    /// Create a key from a [`CellRef`].
    #[inline]
    pub fn from_ref(cell: CellRef) -> Self {
        Self::new(cell.row, cell.col)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let row = raw >> COL_BITS;
        let col = raw & COL_MASK;

        if row >= MAX_ROWS as u64 {
            return Err(D::Error::custom(format!(
                "cell key row out of sheet bounds: {row}"
            )));
        }
        if col >= MAX_COLS as u64 {
            return Err(D::Error::custom(format!(
                "cell key col out of sheet bounds: {col}"
            )));
        }

        Ok(CellKey(raw))
    }
}

impl From<CellRef> for CellKey {
    fn from(value: CellRef) -> Self {
        Self::from_ref(value)
    }
}

impl From<CellKey> for u64 {
    fn from(value: CellKey) -> Self {
        value.0
    }
}

/// Everything attached to a cell other than its scalar value.
///
/// The editing layer treats this as opaque cargo: a value edit replaces
/// [`Cell::value`] and carries the formatting channel through byte-for-byte.
/// Fields reference workbook-level resources (style parts, comment records)
/// without interpreting them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellFormatting {
    /// Index into the workbook's preserved style definitions.
    #[serde(skip_serializing_if = "is_zero")]
    pub style_id: u32,

    /// Number format string, if the cell overrides its style's format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,

    /// Formula text whose cached result is the cell's value.
    ///
    /// Never recalculated; an edit to the value orphans the formula, which
    /// is the source document's problem to reconcile on next open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Anchor into the owning sheet's comment records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_ref: Option<u32>,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl CellFormatting {
    /// Returns true if every field is at its default.
    pub fn is_default(&self) -> bool {
        self.style_id == 0
            && self.number_format.is_none()
            && self.formula.is_none()
            && self.comment_ref.is_none()
    }
}

/// A single cell record.
///
/// Cells are stored sparsely: when a cell is "truly empty" (no value, default
/// formatting), it is removed from the sheet map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    /// The cell's displayed/editable value.
    pub value: CellValue,

    /// The preserved formatting channel.
    #[serde(skip_serializing_if = "CellFormatting::is_default")]
    pub formatting: CellFormatting,
}

impl Cell {
    /// Create a new cell with the given value and default formatting.
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            formatting: CellFormatting::default(),
        }
    }

    /// Create a new cell with the given value and formatting.
    pub fn with_formatting(value: impl Into<CellValue>, formatting: CellFormatting) -> Self {
        Self {
            value: value.into(),
            formatting,
        }
    }

    /// Returns true if this cell has no observable content or formatting.
    ///
    /// Such cells should not be stored in the sparse map.
    pub fn is_truly_empty(&self) -> bool {
        self.value.is_empty() && self.formatting.is_default()
    }
}
