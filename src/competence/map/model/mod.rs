pub mod columns;

use serde::{Deserialize, Serialize};

use crate::competence::map::error::{MapError, Result};

pub use columns::{HIERARCHY_DELIMITER, LEVEL_COUNT};

/// A single cell. Empty input cells are stored as `None`.
pub type Cell = Option<String>;

/// In-memory table with labelled columns, as read from or written to a sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Human readable origin used in error messages, e.g. a file name.
    pub source_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new(source_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            source_name: source_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Index of the column labelled exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Like [`Table::column_index`] but fails with [`MapError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| MapError::MissingColumn {
                column: name.to_string(),
                source_name: self.source_name.clone(),
            })
    }

    /// Cell at `row`/`column`, treating ragged rows as null-padded.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// Sets a column, replacing the values of an existing column with the
    /// same label or appending a new one. `values` must hold one cell per row.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        let name = name.into();
        let (index, width) = match self.column_index(&name) {
            Some(index) => (index, self.columns.len()),
            None => {
                self.columns.push(name);
                (self.columns.len() - 1, self.columns.len())
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() < width {
                row.resize(width, None);
            }
            row[index] = value;
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Fixed-width hierarchy slots, level 1 first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSlots([Cell; LEVEL_COUNT]);

impl LevelSlots {
    /// Builds slots from leading values; extra values beyond the ceiling are dropped.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut slots = Self::default();
        for (slot, value) in slots.0.iter_mut().zip(values) {
            *slot = value;
        }
        slots
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.0.iter()
    }

    /// Index of the first unset slot, if any.
    pub fn first_unset(&self) -> Option<usize> {
        self.0.iter().position(Option::is_none)
    }

    /// Writes `value` into the first unset slot. Returns `false` when all
    /// slots are occupied and the value was not stored.
    pub fn fill_first_unset(&mut self, value: Cell) -> bool {
        match self.first_unset() {
            Some(index) => {
                self.0[index] = value;
                true
            }
            None => false,
        }
    }

    /// Non-empty slot values joined with [`HIERARCHY_DELIMITER`].
    pub fn joined_path(&self) -> String {
        join_path(self.0.iter().map(|slot| slot.as_deref()))
    }
}

/// Joins the non-empty values in order with [`HIERARCHY_DELIMITER`].
pub fn join_path<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut path = String::new();
    for value in values.into_iter().flatten().filter(|value| !value.is_empty()) {
        if !path.is_empty() {
            path.push(HIERARCHY_DELIMITER);
        }
        path.push_str(value);
    }
    path
}

/// Kinds of competence item files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Skill,
    Education,
    License,
}

impl ItemKind {
    /// All kinds in output order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Skill, ItemKind::Education, ItemKind::License];

    pub fn tag(self) -> &'static str {
        match self {
            ItemKind::Skill => "SKILL",
            ItemKind::Education => "EDUCATION",
            ItemKind::License => "LICENSE",
        }
    }

    /// Column holding the item code in files of this kind.
    pub fn code_column(self) -> &'static str {
        match self {
            ItemKind::Skill => "力量コード  ###[skill_code]###",
            ItemKind::Education => "力量コード  ###[education_code]###",
            ItemKind::License => "力量コード  ###[license_code]###",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Skill => write!(f, "skill"),
            ItemKind::Education => write!(f, "education"),
            ItemKind::License => write!(f, "license"),
        }
    }
}

/// Tag of an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    CategoryMarker,
    Item(ItemKind),
}

impl RowKind {
    pub const CATEGORY_TAG: &'static str = "CATEGORY_IN_MAP";

    pub fn tag(self) -> &'static str {
        match self {
            RowKind::CategoryMarker => Self::CATEGORY_TAG,
            RowKind::Item(kind) => kind.tag(),
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            Self::CATEGORY_TAG => Some(RowKind::CategoryMarker),
            "SKILL" => Some(RowKind::Item(ItemKind::Skill)),
            "EDUCATION" => Some(RowKind::Item(ItemKind::Education)),
            "LICENSE" => Some(RowKind::Item(ItemKind::License)),
            _ => None,
        }
    }

    /// Tie-break order for rows sharing a sort key.
    pub fn rank(self) -> u8 {
        match self {
            RowKind::CategoryMarker => 0,
            RowKind::Item(ItemKind::Skill) => 1,
            RowKind::Item(ItemKind::Education) => 2,
            RowKind::Item(ItemKind::License) => 3,
        }
    }
}

/// Tie-break rank of a raw tag string; unknown tags sort last.
pub fn tag_rank(tag: &str) -> u8 {
    RowKind::from_tag(tag).map_or(99, RowKind::rank)
}

/// Row of an expanded table: a tag plus the level-code chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub kind: RowKind,
    pub codes: LevelSlots,
}

/// Values stamped onto every row of the final table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapMetadata {
    pub principal_project: String,
    pub map_code: String,
    pub map_name: String,
    pub folder_name: String,
}

impl MapMetadata {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            principal_project: self.principal_project.trim().to_string(),
            map_code: self.map_code.trim().to_string(),
            map_name: self.map_name.trim().to_string(),
            folder_name: self.folder_name.trim().to_string(),
        }
    }
}
