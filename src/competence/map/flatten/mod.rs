//! Reshaping steps that turn the category taxonomy and the competence item
//! tables into the flattened import table.
//!
//! Data flows [`normalize`] → [`split`] → [`path`] → [`expand`] (once per item
//! table) → [`assemble`] (once over all expanded tables).

pub mod assemble;
pub mod expand;
pub mod normalize;
pub mod path;
pub mod split;

pub use assemble::{AssembledMap, assemble};
pub use expand::{ExpandedRows, expand_rows};
pub use normalize::normalize_columns;
pub use path::build_paths;
pub use split::split_categories;
