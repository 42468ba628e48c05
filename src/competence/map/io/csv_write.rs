use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::competence::map::error::Result;
use crate::competence::map::io::write_atomically;
use crate::competence::map::model::Table;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the table to `path` as comma-separated UTF-8 with a byte-order mark.
/// The file only appears once every row has been written.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    write_atomically(path, |writer| write_table_to(writer, table))
}

/// Writes the header row followed by every row; `None` cells become empty
/// fields.
pub fn write_table_to<W: Write>(mut writer: W, table: &Table) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or_default()))?;
    }
    csv_writer.flush()?;
    Ok(())
}
