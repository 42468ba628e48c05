//! Column labels shared by the readers, the reshaping steps, and the writers.
//!
//! Every generated label follows the destination convention
//! `<human label>  ###[<machine token>]###`.

/// Maximum hierarchy depth carried by a category.
pub const LEVEL_COUNT: usize = 20;

/// Separator between hierarchy levels inside a category string.
pub const HIERARCHY_DELIMITER: char = '＞';

/// Column holding the raw hierarchical category string.
pub const CATEGORY_COLUMN: &str = "力量カテゴリー  ###[competence_category]###";

/// Column holding the row kind tag in the expanded and final tables.
pub const TAG_COLUMN: &str = "種別  ###[type]###";

/// Internal column carrying the reconstructed category path.
pub const PATH_COLUMN: &str = "__category_path__";

pub const PRINCIPAL_PROJECT_COLUMN: &str = "主管プロジェクト  ###[principal_project]###";
pub const MAP_CODE_COLUMN: &str = "力量マップコード  ###[competence_map_code]###";
pub const MAP_NAME_COLUMN: &str = "力量マップ名  ###[competence_map_name]###";
pub const FOLDER_NAME_COLUMN: &str = "フォルダ名  ###[folder_name]###";
pub const REQUIRED_LEVEL_COLUMN: &str = "必要レベル  ###[required_level]###";
pub const REQUIRED_HEADCOUNT_COLUMN: &str = "必要人数  ###[required_headcount]###";

/// Metadata columns in the order they lead every output row.
pub const METADATA_COLUMNS: [&str; 6] = [
    PRINCIPAL_PROJECT_COLUMN,
    MAP_CODE_COLUMN,
    MAP_NAME_COLUMN,
    FOLDER_NAME_COLUMN,
    REQUIRED_LEVEL_COLUMN,
    REQUIRED_HEADCOUNT_COLUMN,
];

/// Default name of the generated import file.
pub const OUTPUT_FILE_NAME: &str = "competence_map_related_item_for_map.csv";

/// Label of the taxonomy level-name column for the 1-based `level`.
///
/// Returns `None` outside `1..=LEVEL_COUNT`.
pub fn level_name_column(level: usize) -> Option<String> {
    level_in_range(level).then(|| {
        format!("力量カテゴリー名_階層{level}  ###[competence_category_level_{level}]###")
    })
}

/// Label of the output level-code column for the 1-based `level`.
///
/// Returns `None` outside `1..=LEVEL_COUNT`.
pub fn level_code_column(level: usize) -> Option<String> {
    level_in_range(level).then(|| format!("コード_階層{level}  ###[code_level_{level}]###"))
}

/// All level-name labels, level 1 first.
pub fn level_name_columns() -> Vec<String> {
    (1..=LEVEL_COUNT).filter_map(level_name_column).collect()
}

/// All level-code labels, level 1 first.
pub fn level_code_columns() -> Vec<String> {
    (1..=LEVEL_COUNT).filter_map(level_code_column).collect()
}

fn level_in_range(level: usize) -> bool {
    (1..=LEVEL_COUNT).contains(&level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_every_level() {
        for level in 1..=LEVEL_COUNT {
            let name = level_name_column(level).expect("level in range");
            assert!(name.contains(&format!("###[competence_category_level_{level}]###")));
            let code = level_code_column(level).expect("level in range");
            assert!(code.contains(&format!("###[code_level_{level}]###")));
        }
    }

    #[test]
    fn names_stop_at_the_ceiling() {
        assert!(level_name_column(0).is_none());
        assert!(level_code_column(0).is_none());
        assert!(level_name_column(LEVEL_COUNT).is_some());
        assert!(level_name_column(LEVEL_COUNT + 1).is_none());
        assert!(level_code_column(LEVEL_COUNT + 1).is_none());
    }

    #[test]
    fn labels_are_unique() {
        let mut names = level_name_columns();
        names.extend(level_code_columns());
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, LEVEL_COUNT * 2);
    }
}
