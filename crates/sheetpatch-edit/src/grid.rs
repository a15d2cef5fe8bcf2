use sheetpatch_model::{CellValue, Sheet, MAX_COLS, MAX_ROWS};
use thiserror::Error;

/// An edit targeted an address outside the editable area.
///
/// Coordinates are unsigned, so "negative index" is unrepresentable; the
/// bounds check covers addresses at or beyond the maximum sheet
/// dimensions. The error is local and recoverable: a session rejects the
/// single edit and stays alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("cell address ({row}, {col}) is outside the editable area")]
pub struct InvalidAddressError {
    pub row: u32,
    pub col: u32,
}

/// The live editing surface: a jagged, values-only projection of a sheet.
///
/// Rows are ordered sequences of scalar values. A grid carries no
/// formatting, merged regions, or sizing, so by construction it cannot
/// express a structural edit, which is what makes the merge step's
/// "copy every metadata field verbatim" safe.
///
/// Rows shorter than the widest row simply end early; absent trailing
/// addresses are not materialized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a sheet's cell values into a grid.
    ///
    /// Extents follow the maximum row/column index among cells with a
    /// non-empty value; formatting-only cells do not extend the grid (their
    /// addresses read back as empty, exactly as they display).
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let mut grid = Self::new();
        for (cell_ref, cell) in sheet.iter_cells() {
            if cell.value.is_empty() {
                continue;
            }
            grid.place(cell_ref.row, cell_ref.col, cell.value.clone());
        }
        grid
    }

    /// Number of rows currently materialized.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The materialized rows, jagged.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// The value at `(row, col)`, or [`CellValue::Empty`] outside current
    /// bounds.
    pub fn value(&self, row: u32, col: u32) -> CellValue {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    /// Set the value at `(row, col)`, growing the grid with empty cells as
    /// needed.
    ///
    /// This is the only way new addresses enter the system. Addresses at or
    /// beyond the maximum sheet dimensions are rejected.
    pub fn set_cell(
        &mut self,
        row: u32,
        col: u32,
        value: impl Into<CellValue>,
    ) -> Result<(), InvalidAddressError> {
        if row >= MAX_ROWS || col >= MAX_COLS {
            return Err(InvalidAddressError { row, col });
        }
        self.place(row, col, value.into());
        Ok(())
    }

    /// Iterate every materialized position in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, value)| (row as u32, col as u32, value))
        })
    }

    fn place(&mut self, row: u32, col: u32, value: CellValue) {
        let row = row as usize;
        let col = col as usize;
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, || CellValue::Empty);
        }
        cells[col] = value;
    }
}
