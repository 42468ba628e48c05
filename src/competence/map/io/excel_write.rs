use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{TableColumn, Workbook};

use crate::competence::map::error::Result;
use crate::competence::map::io::write_atomically;
use crate::competence::map::model::Table;

/// Writes the table to a single autofiltered worksheet at `path`.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let bytes = workbook_bytes(table)?;
    write_atomically(path, |writer| Ok(writer.write_all(&bytes)?))
}

fn workbook_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.source_name)?;

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, value)?;
            }
        }
    }

    if !table.rows.is_empty() {
        let headers: Vec<TableColumn> = table
            .columns
            .iter()
            .map(|header| TableColumn::new().set_header(header))
            .collect();
        let mut excel_table = rust_xlsxwriter::Table::new();
        excel_table.set_autofilter(true).set_columns(&headers);
        let col_end = (table.columns.len() as u16).saturating_sub(1);
        let row_end = table.rows.len() as u32;
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
    }

    Ok(workbook.save_to_buffer()?)
}
