use crate::competence::map::model::columns::{PATH_COLUMN, level_name_columns};
use crate::competence::map::model::{Table, join_path};

/// Appends the category path column built from the level-name columns that
/// are present, in level order.
///
/// Returns the table and the level columns that contributed to the path.
pub fn build_paths(mut table: Table) -> (Table, Vec<String>) {
    let present: Vec<(String, usize)> = level_name_columns()
        .into_iter()
        .filter_map(|name| table.column_index(&name).map(|index| (name, index)))
        .collect();

    let paths = (0..table.row_count())
        .map(|row| {
            let levels = present.iter().map(|(_, index)| table.cell(row, *index));
            Some(join_path(levels))
        })
        .collect();
    table.set_column(PATH_COLUMN, paths);

    let used = present.into_iter().map(|(name, _)| name).collect();
    (table, used)
}
