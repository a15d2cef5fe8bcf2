use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Cell, CellKey, CellRef, CellValue, SheetMetadata};

/// One worksheet: a sparse cell map plus its preserved structural metadata.
///
/// Cells are stored sparsely in row-major key order; a cell with an empty
/// value and default formatting is not stored at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// User-visible sheet name.
    pub name: String,

    /// Sparse cell storage, keyed by packed `(row, col)`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    cells: BTreeMap<CellKey, Cell>,

    /// Structural metadata preserved across edits.
    #[serde(default, skip_serializing_if = "SheetMetadata::is_default")]
    pub metadata: SheetMetadata,
}

impl Sheet {
    /// Create a new empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            metadata: SheetMetadata::default(),
        }
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cells are stored.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Look up a cell record.
    pub fn cell(&self, cell_ref: CellRef) -> Option<&Cell> {
        self.cells.get(&CellKey::from_ref(cell_ref))
    }

    /// The cell's value, or [`CellValue::Empty`] when nothing is stored.
    pub fn value(&self, cell_ref: CellRef) -> CellValue {
        self.cell(cell_ref)
            .map(|cell| cell.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Insert or replace a full cell record.
    ///
    /// Truly-empty cells are removed from the map instead of stored.
    pub fn set_cell(&mut self, cell_ref: CellRef, cell: Cell) {
        let key = CellKey::from_ref(cell_ref);
        if cell.is_truly_empty() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, cell);
        }
    }

    /// Set a cell's value, keeping any existing formatting in place.
    pub fn set_value(&mut self, cell_ref: CellRef, value: impl Into<CellValue>) {
        let formatting = self
            .cell(cell_ref)
            .map(|cell| cell.formatting.clone())
            .unwrap_or_default();
        self.set_cell(cell_ref, Cell::with_formatting(value, formatting));
    }

    /// Iterate stored cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().map(|(key, cell)| (key.to_ref(), cell))
    }

    /// Maximum `(row, col)` index among stored cells, if any.
    ///
    /// Note the extent is component-wise: the maximum row and maximum column
    /// need not come from the same cell.
    pub fn used_extent(&self) -> Option<(u32, u32)> {
        if self.cells.is_empty() {
            return None;
        }
        let mut max_row = 0;
        let mut max_col = 0;
        for key in self.cells.keys() {
            max_row = max_row.max(key.row());
            max_col = max_col.max(key.col());
        }
        Some((max_row, max_col))
    }
}
