use crate::competence::map::model::Table;

/// Strips leading and trailing whitespace, full-width spaces included, from
/// every column label.
pub fn normalize_columns(mut table: Table) -> Table {
    for column in &mut table.columns {
        let trimmed = column.trim();
        if trimmed.len() != column.len() {
            *column = trimmed.to_string();
        }
    }
    table
}
