use std::collections::HashMap;

use tracing::{debug, warn};

use crate::competence::map::error::Result;
use crate::competence::map::model::columns::{
    PATH_COLUMN, TAG_COLUMN, level_code_columns, level_name_columns,
};
use crate::competence::map::model::{ItemKind, LEVEL_COUNT, LevelSlots, OutputRow, RowKind, Table};

/// Rows produced for one item table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedRows {
    pub kind: ItemKind,
    pub rows: Vec<OutputRow>,
    /// Item codes that found no free level slot under their category.
    pub dropped_codes: usize,
}

impl ExpandedRows {
    /// Number of item rows, category markers excluded.
    pub fn item_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.kind != RowKind::CategoryMarker)
            .count()
    }

    /// Tabular view: tag column followed by the level-code columns.
    pub fn to_table(&self) -> Table {
        let mut columns = Vec::with_capacity(1 + LEVEL_COUNT);
        columns.push(TAG_COLUMN.to_string());
        columns.extend(level_code_columns());

        let mut table = Table::new(self.kind.to_string(), columns);
        for row in &self.rows {
            let mut cells = Vec::with_capacity(table.column_count());
            cells.push(Some(row.kind.tag().to_string()));
            cells.extend(row.codes.iter().cloned());
            table.rows.push(cells);
        }
        table
    }
}

/// Emits, for each taxonomy row in order, a category marker row followed by
/// one row per item whose path equals the category path.
///
/// Both tables must already carry path columns. `level_columns` are the
/// taxonomy's level-name columns in level order, as returned by
/// [`build_paths`](crate::competence::map::flatten::build_paths). Item codes go
/// into the first level slot the category leaves empty; when the category fills
/// every slot the code is dropped and counted in
/// [`ExpandedRows::dropped_codes`].
pub fn expand_rows(
    items: &Table,
    taxonomy: &Table,
    level_columns: &[String],
    kind: ItemKind,
    code_column: &str,
) -> Result<ExpandedRows> {
    let item_path = items.require_column(PATH_COLUMN)?;
    let item_code = items.require_column(code_column)?;
    let category_path = taxonomy.require_column(PATH_COLUMN)?;

    // Positional: a level absent from `level_columns` stays null in its slot.
    let level_indices: Vec<Option<usize>> = level_name_columns()
        .iter()
        .map(|name| {
            if level_columns.contains(name) {
                taxonomy.column_index(name)
            } else {
                None
            }
        })
        .collect();

    let mut items_by_path: HashMap<&str, Vec<usize>> = HashMap::new();
    for row in 0..items.row_count() {
        let path = items.cell(row, item_path).unwrap_or_default();
        items_by_path.entry(path).or_default().push(row);
    }

    let mut rows = Vec::new();
    let mut dropped_codes = 0;

    for category in 0..taxonomy.row_count() {
        let levels = LevelSlots::from_values(
            level_indices
                .iter()
                .map(|column| column.and_then(|index| taxonomy.cell(category, index)))
                .map(|value| value.map(str::to_string)),
        );

        rows.push(OutputRow {
            kind: RowKind::CategoryMarker,
            codes: levels.clone(),
        });

        let path = taxonomy.cell(category, category_path).unwrap_or_default();
        let Some(matches) = items_by_path.get(path) else {
            continue;
        };

        for &item in matches {
            let mut codes = levels.clone();
            let code = items.cell(item, item_code).map(str::to_string);
            if !codes.fill_first_unset(code) {
                dropped_codes += 1;
            }
            rows.push(OutputRow {
                kind: RowKind::Item(kind),
                codes,
            });
        }
    }

    if dropped_codes > 0 {
        warn!(
            %kind,
            dropped_codes,
            "item codes dropped because their category uses every level slot"
        );
    }
    debug!(%kind, rows = rows.len(), "expanded item table");

    Ok(ExpandedRows {
        kind,
        rows,
        dropped_codes,
    })
}
