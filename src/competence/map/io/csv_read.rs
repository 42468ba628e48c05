use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::competence::map::error::{MapError, Result};
use crate::competence::map::model::Table;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads a comma-separated file with a header row.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    read_table_from(BufReader::new(file), &display_name(path))
}

/// Reads comma-separated UTF-8 text with a header row from any reader.
///
/// A leading byte-order mark is skipped, empty fields become `None`, and
/// short rows are padded to the header width.
pub fn read_table_from<R: Read>(mut reader: R, source_name: &str) -> Result<Table> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(content);

    let malformed = |source: csv::Error| MapError::MalformedInput {
        source_name: source_name.to_string(),
        source,
    };

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();
    let mut table = Table::new(source_name, columns);

    for record in csv_reader.records() {
        let record = record.map_err(malformed)?;
        let mut cells: Vec<_> = record
            .iter()
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        cells.resize(width.max(cells.len()), None);
        table.rows.push(cells);
    }

    Ok(table)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
