use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use sheetpatch_edit::{merge, Grid, MergeError};
use sheetpatch_model::{
    Cell, CellFormatting, CellRef, CellValue, Comment, Document, PreservedPart, Range, Sheet,
};

fn bold() -> CellFormatting {
    CellFormatting {
        style_id: 1,
        ..CellFormatting::default()
    }
}

fn italic() -> CellFormatting {
    CellFormatting {
        style_id: 2,
        ..CellFormatting::default()
    }
}

/// A 3x3 sheet with formatting on the diagonal, plus assorted metadata.
fn original_document() -> Document {
    let mut sheet = Sheet::new("Sheet1");
    for row in 0..3u32 {
        for col in 0..3u32 {
            let formatting = if row == col { bold() } else { CellFormatting::default() };
            sheet.set_cell(
                CellRef::new(row, col),
                Cell::with_formatting(format!("r{row}c{col}"), formatting),
            );
        }
    }
    sheet.metadata.merged_ranges.push(Range::from_a1("A1:B1").unwrap());
    sheet.metadata.col_widths.insert(0, 14.0);
    sheet.metadata.comments.push(Comment {
        cell: CellRef::new(1, 1),
        author: "auditor".to_string(),
        text: "verified".to_string(),
    });
    sheet
        .metadata
        .pivot_parts
        .push(PreservedPart::new("pivotTable1.xml", b"<pivotTableDefinition/>".to_vec()));

    let mut document = Document::with_sheet(sheet);
    document
        .workbook_metadata
        .set_part("macros/project.bin", vec![0xd0, 0xcf, 0x11, 0xe0]);
    document
}

fn addresses(sheet: &Sheet) -> BTreeSet<(u32, u32)> {
    sheet.iter_cells().map(|(r, _)| (r.row, r.col)).collect()
}

#[test]
fn round_trip_identity_with_no_edits() {
    let original = original_document();
    let grid = Grid::from_sheet(&original.sheets[0]);

    let output = merge(&original, &grid).unwrap();
    assert_eq!(output, original);
}

#[test]
fn value_only_mutation_keeps_formatting() {
    let original = original_document();
    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(1, 1, "changed").unwrap();

    let output = merge(&original, &grid).unwrap();
    let cell = output.sheets[0].cell(CellRef::new(1, 1)).unwrap();
    assert_eq!(cell.value, CellValue::Text("changed".to_string()));
    assert_eq!(cell.formatting, bold());
}

#[test]
fn metadata_is_invariant_under_edits() {
    let original = original_document();
    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(0, 0, "a").unwrap();
    grid.set_cell(2, 2, 3.5).unwrap();
    grid.set_cell(7, 7, true).unwrap();

    let output = merge(&original, &grid).unwrap();
    assert_eq!(output.workbook_metadata, original.workbook_metadata);
    assert_eq!(output.sheets[0].metadata, original.sheets[0].metadata);
    assert_eq!(output.sheets[0].name, original.sheets[0].name);
}

#[test]
fn output_addresses_are_the_union_of_both_sides() {
    let original = original_document();
    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(4, 1, "new").unwrap();

    let output = merge(&original, &grid).unwrap();
    let mut expected = addresses(&original.sheets[0]);
    expected.insert((4, 1));
    assert_eq!(addresses(&output.sheets[0]), expected);
}

#[test]
fn growth_past_the_original_extent_creates_default_formatted_cells() {
    let original = original_document();
    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(5, 5, "X").unwrap();

    let output = merge(&original, &grid).unwrap();

    let grown = output.sheets[0].cell(CellRef::new(5, 5)).unwrap();
    assert_eq!(grown.value, CellValue::Text("X".to_string()));
    assert_eq!(grown.formatting, CellFormatting::default());

    // All nine original cells are unchanged.
    for (cell_ref, cell) in original.sheets[0].iter_cells() {
        assert_eq!(output.sheets[0].cell(cell_ref), Some(cell));
    }
}

#[test]
fn edit_inside_a_merged_range_keeps_the_range_and_neighbor_formatting() {
    let mut sheet = Sheet::new("Sheet1");
    sheet.set_cell(CellRef::new(0, 0), Cell::with_formatting("Old", bold()));
    sheet.set_cell(CellRef::new(0, 1), Cell::with_formatting("Keep", italic()));
    sheet.metadata.merged_ranges.push(Range::from_a1("A1:B1").unwrap());
    let original = Document::with_sheet(sheet);

    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(0, 0, "New").unwrap();

    let output = merge(&original, &grid).unwrap();
    let a1 = output.sheets[0].cell(CellRef::new(0, 0)).unwrap();
    assert_eq!(a1.value, CellValue::Text("New".to_string()));
    assert_eq!(a1.formatting, bold());

    let b1 = output.sheets[0].cell(CellRef::new(0, 1)).unwrap();
    assert_eq!(b1.value, CellValue::Text("Keep".to_string()));
    assert_eq!(b1.formatting, italic());

    assert_eq!(
        output.sheets[0].metadata.merged_ranges,
        vec![Range::from_a1("A1:B1").unwrap()]
    );
}

#[test]
fn a_grid_smaller_than_the_sheet_deletes_nothing() {
    let original = original_document();
    // A projection that never covered most of the sheet.
    let mut grid = Grid::new();
    grid.set_cell(0, 0, "only edit").unwrap();

    let output = merge(&original, &grid).unwrap();
    assert_eq!(addresses(&output.sheets[0]), addresses(&original.sheets[0]));
    assert_eq!(
        output.sheets[0].value(CellRef::new(2, 2)),
        CellValue::Text("r2c2".to_string())
    );
}

#[test]
fn clearing_a_value_keeps_formatting_and_the_address() {
    let original = original_document();
    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(0, 0, CellValue::Empty).unwrap();

    let output = merge(&original, &grid).unwrap();
    let cell = output.sheets[0].cell(CellRef::new(0, 0)).unwrap();
    assert_eq!(cell.value, CellValue::Empty);
    assert_eq!(cell.formatting, bold());
}

#[test]
fn sheets_beyond_the_first_are_carried_through() {
    let mut original = original_document();
    let mut second = Sheet::new("Archive");
    second.set_cell(CellRef::new(0, 0), Cell::new("old data"));
    original.sheets.push(second.clone());

    let mut grid = Grid::from_sheet(&original.sheets[0]);
    grid.set_cell(0, 0, "edited").unwrap();

    let output = merge(&original, &grid).unwrap();
    assert_eq!(output.sheets.len(), 2);
    assert_eq!(output.sheets[1], second);
}

#[test]
fn merge_against_a_document_with_no_sheets_fails() {
    let empty = Document::new();
    let mut grid = Grid::new();
    grid.set_cell(0, 0, "x").unwrap();

    assert_eq!(merge(&empty, &grid), Err(MergeError::SheetMissing));
}
