use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::competence::map::error::{MapError, Result};
use crate::competence::map::io::csv_read::display_name;
use crate::competence::map::model::{Cell, Table};

/// Reads the first worksheet of an `.xlsx` workbook; the first row is the
/// header.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let source_name = display_name(path);

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MapError::InvalidWorkbook(format!("no worksheet in '{source_name}'")))?;
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| MapError::InvalidWorkbook(format!("missing sheet '{sheet}'")))?
        .map_err(MapError::from)?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_to_string(Some(cell)))
            .collect(),
        None => Vec::new(),
    };
    let width = columns.len();

    let mut table = Table::new(source_name, columns);
    for row in rows {
        let mut cells: Vec<Cell> = row
            .iter()
            .map(|cell| Some(cell_to_string(Some(cell))).filter(|value| !value.is_empty()))
            .collect();
        cells.resize(width.max(cells.len()), None);
        table.rows.push(cells);
    }

    Ok(table)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
