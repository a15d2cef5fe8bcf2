use sheetpatch_model::{Cell, CellRef, Document, Sheet};
use thiserror::Error;

use crate::Grid;

/// Errors raised by [`merge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The original document has no sheets to merge into.
    #[error("document has no sheets")]
    SheetMissing,
}

/// Reconcile an edited grid against the original document.
///
/// Produces a new output document; the original is never mutated. The
/// algorithm is deliberately metadata-agnostic: it copies both metadata
/// layers wholesale and splices in only the value channel, so nothing it
/// does not understand can be corrupted:
///
/// 1. Workbook metadata is copied verbatim.
/// 2. The first sheet's structural metadata (and name) is copied verbatim.
/// 3. Every cell of the original sheet is carried into the output, so an
///    address the grid does not cover keeps its cell unchanged (a grid
///    derived from the sheet never shrinks below it, but a smaller grid
///    must not delete data).
/// 4. Every address the grid materializes takes its value from the grid:
///    where an original cell exists, its formatting is kept and only the
///    value is replaced (clearing a value never clears formatting); where
///    the grid grew past the original extent, a new cell with default
///    formatting is created for any non-empty value.
/// 5. Sheets beyond the first are carried through unchanged.
///
/// The output cell map is therefore the union of original and edited
/// addresses, with one exception: a cell whose value is empty and whose
/// formatting is default carries no information, and the sparse cell map
/// does not store it.
///
/// Size mismatches between grid and sheet are never an error; growth past
/// the original extent is how new cells are born.
pub fn merge(original: &Document, edited: &Grid) -> Result<Document, MergeError> {
    let source = original.sheets.first().ok_or(MergeError::SheetMissing)?;

    let mut sheet = Sheet::new(source.name.clone());
    sheet.metadata = source.metadata.clone();

    for (cell_ref, cell) in source.iter_cells() {
        sheet.set_cell(cell_ref, cell.clone());
    }

    for (row, col, value) in edited.iter() {
        let cell_ref = CellRef::new(row, col);
        match source.cell(cell_ref) {
            Some(existing) => {
                sheet.set_cell(
                    cell_ref,
                    Cell::with_formatting(value.clone(), existing.formatting.clone()),
                );
            }
            None => {
                if !value.is_empty() {
                    sheet.set_cell(cell_ref, Cell::new(value.clone()));
                }
            }
        }
    }

    let mut sheets = Vec::with_capacity(original.sheets.len());
    sheets.push(sheet);
    sheets.extend(original.sheets.iter().skip(1).cloned());

    Ok(Document {
        schema_version: original.schema_version,
        sheets,
        workbook_metadata: original.workbook_metadata.clone(),
    })
}
