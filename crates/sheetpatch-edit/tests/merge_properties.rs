//! Property tests for the merge algorithm's algebraic contract: identity
//! without edits, metadata invariance under any edits, and address-union
//! completeness.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sheetpatch_edit::{merge, Grid};
use sheetpatch_model::{
    Cell, CellFormatting, CellRef, CellValue, Document, Range, Sheet,
};

fn value_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        (-1.0e6..1.0e6f64).prop_map(CellValue::Number),
        "[a-z]{0,6}".prop_map(CellValue::Text),
        any::<bool>().prop_map(CellValue::Boolean),
    ]
}

fn formatting_strategy() -> impl Strategy<Value = CellFormatting> {
    (0u32..4, proptest::option::of("[#0.,]{1,5}")).prop_map(|(style_id, number_format)| {
        CellFormatting {
            style_id,
            number_format,
            formula: None,
            comment_ref: None,
        }
    })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    proptest::collection::btree_map(
        (0u32..6, 0u32..6),
        (value_strategy(), formatting_strategy()),
        0..18,
    )
    .prop_map(|cells| {
        let mut sheet = Sheet::new("Sheet1");
        for ((row, col), (value, formatting)) in cells {
            sheet.set_cell(CellRef::new(row, col), Cell::with_formatting(value, formatting));
        }
        sheet
            .metadata
            .merged_ranges
            .push(Range::new(CellRef::new(0, 0), CellRef::new(0, 1)));
        sheet.metadata.col_widths.insert(2, 11.5);
        sheet.metadata.header = Some("&C fixture".to_string());

        let mut document = Document::with_sheet(sheet);
        document
            .workbook_metadata
            .set_part("styles.xml", b"<styleSheet/>".to_vec());
        document
    })
}

fn edits_strategy() -> impl Strategy<Value = Vec<(u32, u32, CellValue)>> {
    proptest::collection::vec((0u32..8, 0u32..8, value_strategy()), 0..12)
}

/// True if the jagged grid materializes the given position.
fn grid_covers(grid: &Grid, row: u32, col: u32) -> bool {
    grid.rows()
        .get(row as usize)
        .is_some_and(|cells| (col as usize) < cells.len())
}

proptest! {
    #[test]
    fn merging_an_unedited_projection_is_identity(document in document_strategy()) {
        let grid = Grid::from_sheet(&document.sheets[0]);
        let output = merge(&document, &grid).unwrap();
        prop_assert_eq!(output, document);
    }

    #[test]
    fn metadata_survives_any_edit_sequence(
        document in document_strategy(),
        edits in edits_strategy(),
    ) {
        let mut grid = Grid::from_sheet(&document.sheets[0]);
        for (row, col, value) in edits {
            grid.set_cell(row, col, value).unwrap();
        }

        let output = merge(&document, &grid).unwrap();
        prop_assert_eq!(&output.workbook_metadata, &document.workbook_metadata);
        prop_assert_eq!(&output.sheets[0].metadata, &document.sheets[0].metadata);
        prop_assert_eq!(&output.sheets[0].name, &document.sheets[0].name);
    }

    #[test]
    fn cell_reconciliation_matches_the_contract(
        document in document_strategy(),
        edits in edits_strategy(),
    ) {
        let mut grid = Grid::from_sheet(&document.sheets[0]);
        for (row, col, value) in edits {
            grid.set_cell(row, col, value).unwrap();
        }

        let original = &document.sheets[0];
        let output = merge(&document, &grid).unwrap();
        let merged = &output.sheets[0];

        let original_addresses: BTreeSet<(u32, u32)> =
            original.iter_cells().map(|(r, _)| (r.row, r.col)).collect();

        // Originals the grid never covered are carried through unchanged.
        for (cell_ref, cell) in original.iter_cells() {
            if !grid_covers(&grid, cell_ref.row, cell_ref.col) {
                prop_assert_eq!(merged.cell(cell_ref), Some(cell));
            }
        }

        // Covered addresses take the grid's value and keep original
        // formatting; a cell left with no value and no formatting is not
        // stored.
        for (row, col, value) in grid.iter() {
            let cell_ref = CellRef::new(row, col);
            match original.cell(cell_ref) {
                Some(existing) => {
                    if value.is_empty() && existing.formatting.is_default() {
                        prop_assert_eq!(merged.cell(cell_ref), None);
                    } else {
                        let cell = merged.cell(cell_ref).expect("covered original kept");
                        prop_assert_eq!(&cell.value, value);
                        prop_assert_eq!(&cell.formatting, &existing.formatting);
                    }
                }
                None if value.is_empty() => {
                    prop_assert_eq!(merged.cell(cell_ref), None);
                }
                None => {
                    let cell = merged.cell(cell_ref).expect("new address materialized");
                    prop_assert_eq!(&cell.value, value);
                    prop_assert_eq!(&cell.formatting, &CellFormatting::default());
                }
            }
        }

        // No stray addresses: everything in the output came from one side.
        for (cell_ref, _) in merged.iter_cells() {
            let address = (cell_ref.row, cell_ref.col);
            prop_assert!(
                original_addresses.contains(&address)
                    || grid_covers(&grid, cell_ref.row, cell_ref.col)
            );
        }
    }
}
