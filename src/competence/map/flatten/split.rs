use tracing::debug;

use crate::competence::map::error::Result;
use crate::competence::map::model::columns::{CATEGORY_COLUMN, level_name_columns};
use crate::competence::map::model::{HIERARCHY_DELIMITER, LEVEL_COUNT, LevelSlots, Table};

/// Appends the [`LEVEL_COUNT`] level-name columns derived from the category
/// column.
///
/// Levels past the ceiling are dropped. Rows without a category get all-null
/// levels.
pub fn split_categories(mut table: Table) -> Result<Table> {
    let category = table.require_column(CATEGORY_COLUMN)?;

    let levels: Vec<LevelSlots> = (0..table.row_count())
        .map(|row| split_levels(table.cell(row, category).unwrap_or_default()))
        .collect();

    let truncated = (0..table.row_count())
        .filter(|&row| level_depth(table.cell(row, category).unwrap_or_default()) > LEVEL_COUNT)
        .count();
    if truncated > 0 {
        debug!(
            source = %table.source_name,
            rows = truncated,
            "category levels beyond the ceiling were dropped"
        );
    }

    for (index, name) in level_name_columns().into_iter().enumerate() {
        let values = levels
            .iter()
            .map(|slots| slots.get(index).map(str::to_string))
            .collect();
        table.set_column(name, values);
    }

    Ok(table)
}

/// Splits one category string into left-packed level slots.
pub fn split_levels(raw: &str) -> LevelSlots {
    LevelSlots::from_values(level_tokens(raw).map(|token| Some(token.to_string())))
}

fn level_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(HIERARCHY_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn level_depth(raw: &str) -> usize {
    level_tokens(raw).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competence::map::model::columns::level_name_column;

    #[test]
    fn splits_and_trims_levels() {
        let slots = split_levels(" A ＞B　＞ C");
        assert_eq!(slots.get(0), Some("A"));
        assert_eq!(slots.get(1), Some("B"));
        assert_eq!(slots.get(2), Some("C"));
        assert_eq!(slots.get(3), None);
        assert_eq!(slots.joined_path(), "A＞B＞C");
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let slots = split_levels("A＞＞B＞");
        assert_eq!(slots.joined_path(), "A＞B");
        assert_eq!(slots.first_unset(), Some(2));
    }

    #[test]
    fn keeps_only_the_first_twenty_levels() {
        let raw: Vec<String> = (1..=21).map(|level| format!("L{level}")).collect();
        let slots = split_levels(&raw.join("＞"));
        assert_eq!(slots.get(LEVEL_COUNT - 1), Some("L20"));
        assert!(slots.iter().all(|slot| slot.as_deref() != Some("L21")));
    }

    #[test]
    fn missing_category_yields_null_levels() {
        let mut table = Table::new("categories.csv", vec![CATEGORY_COLUMN.to_string()]);
        table.rows.push(vec![None]);
        table.rows.push(vec![Some("A＞B".into())]);

        let split = split_categories(table).expect("category column present");

        assert_eq!(split.column_count(), 1 + LEVEL_COUNT);
        assert!(split.rows[0][1..].iter().all(Option::is_none));
        let level_two = split
            .column_index(&level_name_column(2).unwrap())
            .expect("level 2 column");
        assert_eq!(split.cell(1, level_two), Some("B"));
    }

    #[test]
    fn missing_category_column_is_reported() {
        let table = Table::new("skills.csv", vec!["other".to_string()]);
        let error = split_categories(table).unwrap_err();
        assert!(error.to_string().contains(CATEGORY_COLUMN));
        assert!(error.to_string().contains("skills.csv"));
    }
}
