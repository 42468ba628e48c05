use std::collections::HashSet;

use tracing::debug;

use crate::competence::map::error::{MapError, Result};
use crate::competence::map::flatten::expand::ExpandedRows;
use crate::competence::map::model::columns::{METADATA_COLUMNS, TAG_COLUMN, level_code_columns};
use crate::competence::map::model::{MapMetadata, OutputRow, RowKind, Table, tag_rank};

/// Name given to the assembled table.
pub const MAP_TABLE_NAME: &str = "competence_map";

/// Final rows in output order together with their tabular rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledMap {
    pub rows: Vec<OutputRow>,
    pub table: Table,
}

/// Merges the expanded tables into the final import table.
///
/// Rows are ordered by category path, then by kind (category marker, skill,
/// education, license), keeping input order among equals. Only the first
/// category marker per path survives. Metadata columns lead every row.
pub fn assemble(expanded: &[ExpandedRows], metadata: &MapMetadata) -> Result<AssembledMap> {
    if expanded.is_empty() {
        return Err(MapError::NoInputData);
    }

    let mut ordered: Vec<&ExpandedRows> = expanded.iter().collect();
    ordered.sort_by_key(|rows| rows.kind);

    let mut keyed: Vec<(String, u8, &OutputRow)> = ordered
        .iter()
        .flat_map(|expanded| expanded.rows.iter())
        .map(|row| (row.codes.joined_path(), tag_rank(row.kind.tag()), row))
        .collect();
    keyed.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0).then(lhs.1.cmp(&rhs.1)));

    let total = keyed.len();
    let mut seen_markers: HashSet<String> = HashSet::new();
    let rows: Vec<OutputRow> = keyed
        .into_iter()
        .filter(|(key, _, row)| {
            row.kind != RowKind::CategoryMarker || seen_markers.insert(key.clone())
        })
        .map(|(_, _, row)| row.clone())
        .collect();
    debug!(
        merged = total,
        kept = rows.len(),
        "collapsed duplicate category rows"
    );

    let table = render_table(&rows, &metadata.trimmed());
    Ok(AssembledMap { rows, table })
}

fn render_table(rows: &[OutputRow], metadata: &MapMetadata) -> Table {
    let mut columns: Vec<String> = METADATA_COLUMNS.iter().map(|name| name.to_string()).collect();
    columns.push(TAG_COLUMN.to_string());
    columns.extend(level_code_columns());

    let stamp = [
        Some(metadata.principal_project.clone()),
        Some(metadata.map_code.clone()),
        Some(metadata.map_name.clone()),
        Some(metadata.folder_name.clone()),
        None,
        None,
    ];

    let mut table = Table::new(MAP_TABLE_NAME, columns);
    for row in rows {
        let mut cells = Vec::with_capacity(table.column_count());
        cells.extend(stamp.iter().cloned());
        cells.push(Some(row.kind.tag().to_string()));
        cells.extend(row.codes.iter().cloned());
        table.rows.push(cells);
    }
    table
}
