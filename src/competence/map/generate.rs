use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::competence::map::error::{MapError, Result};
use crate::competence::map::flatten::{
    ExpandedRows, assemble, build_paths, expand_rows, normalize_columns, split_categories,
};
use crate::competence::map::io;
use crate::competence::map::model::{ItemKind, MapMetadata, RowKind, Table};

/// Everything one run needs: the metadata, the category taxonomy, and the
/// competence item tables that were supplied.
#[derive(Debug, Clone, Default)]
pub struct MapRequest {
    pub metadata: MapMetadata,
    pub taxonomy: Table,
    pub items: BTreeMap<ItemKind, Table>,
}

/// Final import table and the counts reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOutput {
    pub table: Table,
    pub summary: MapSummary,
}

/// Row and column counts of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    pub rows: usize,
    pub columns: usize,
    pub category_rows: usize,
    pub item_rows: BTreeMap<ItemKind, usize>,
    /// Item codes lost because their category already filled every level.
    pub dropped_codes: usize,
}

impl MapSummary {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Input file locations for [`generate_map_file`].
#[derive(Debug, Clone)]
pub struct MapFiles {
    pub taxonomy: PathBuf,
    pub items: BTreeMap<ItemKind, PathBuf>,
}

impl MapFiles {
    /// Collects the supplied item files, checking that every path exists.
    ///
    /// Fails with [`MapError::MissingInput`] for the first absent path and with
    /// [`MapError::NoInputData`] when no item file was supplied at all.
    pub fn resolve<I>(taxonomy: PathBuf, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ItemKind, Option<PathBuf>)>,
    {
        require_existing(&taxonomy)?;

        let mut resolved = BTreeMap::new();
        for (kind, path) in items {
            if let Some(path) = path {
                require_existing(&path)?;
                resolved.insert(kind, path);
            }
        }
        if resolved.is_empty() {
            return Err(MapError::NoInputData);
        }

        Ok(Self {
            taxonomy,
            items: resolved,
        })
    }
}

/// Metadata values given explicitly; each one replaces the configured value.
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub principal_project: Option<String>,
    pub map_code: Option<String>,
    pub map_name: Option<String>,
    pub folder_name: Option<String>,
}

/// Merges the optional JSON config with explicit overrides.
///
/// Project, map code and map name must end up non-blank; the folder name may
/// stay empty.
pub fn resolve_metadata(
    config: Option<&Path>,
    overrides: &MetadataOverrides,
) -> Result<MapMetadata> {
    let mut metadata = match config {
        Some(path) => {
            require_existing(path)?;
            load_metadata(path)?
        }
        None => MapMetadata::default(),
    };

    if let Some(project) = &overrides.principal_project {
        metadata.principal_project = project.clone();
    }
    if let Some(map_code) = &overrides.map_code {
        metadata.map_code = map_code.clone();
    }
    if let Some(map_name) = &overrides.map_name {
        metadata.map_name = map_name.clone();
    }
    if let Some(folder_name) = &overrides.folder_name {
        metadata.folder_name = folder_name.clone();
    }

    require_value(&metadata.principal_project, "principal project")?;
    require_value(&metadata.map_code, "map code")?;
    require_value(&metadata.map_name, "map name")?;
    Ok(metadata)
}

/// Builds the final import table from in-memory tables.
#[instrument(level = "debug", skip_all, fields(kinds = request.items.len()))]
pub fn build_map(request: MapRequest) -> Result<MapOutput> {
    if request.items.is_empty() {
        return Err(MapError::NoInputData);
    }

    let (taxonomy, levels) = prepare(request.taxonomy)?;
    debug!(
        categories = taxonomy.row_count(),
        levels = levels.len(),
        "prepared category taxonomy"
    );

    let mut expanded: Vec<ExpandedRows> = Vec::with_capacity(request.items.len());
    for (kind, table) in request.items {
        let (items, _) = prepare(table)?;
        expanded.push(expand_rows(
            &items,
            &taxonomy,
            &levels,
            kind,
            kind.code_column(),
        )?);
    }

    let assembled = assemble(&expanded, &request.metadata)?;

    let mut item_rows = BTreeMap::new();
    for rows in &expanded {
        *item_rows.entry(rows.kind).or_insert(0) += rows.item_count();
    }
    let summary = MapSummary {
        rows: assembled.table.row_count(),
        columns: assembled.table.column_count(),
        category_rows: assembled
            .rows
            .iter()
            .filter(|row| row.kind == RowKind::CategoryMarker)
            .count(),
        item_rows,
        dropped_codes: expanded.iter().map(|rows| rows.dropped_codes).sum(),
    };

    Ok(MapOutput {
        table: assembled.table,
        summary,
    })
}

/// Reads the input files, builds the import table, and writes it to `output`.
///
/// The output format follows the extension of `output`. Nothing is written
/// when any step fails.
#[instrument(
    level = "info",
    skip_all,
    fields(taxonomy = %files.taxonomy.display(), output = %output.display())
)]
pub fn generate_map_file(
    files: &MapFiles,
    metadata: &MapMetadata,
    output: &Path,
) -> Result<MapSummary> {
    if files.items.is_empty() {
        return Err(MapError::NoInputData);
    }

    let taxonomy = io::read_table(&files.taxonomy)?;
    info!(rows = taxonomy.row_count(), "read category taxonomy");

    let mut items = BTreeMap::new();
    for (kind, path) in &files.items {
        let table = io::read_table(path)?;
        info!(%kind, rows = table.row_count(), "read competence file");
        items.insert(*kind, table);
    }

    let map = build_map(MapRequest {
        metadata: metadata.clone(),
        taxonomy,
        items,
    })?;

    if map.summary.dropped_codes > 0 {
        warn!(
            dropped_codes = map.summary.dropped_codes,
            "some item codes had no free level slot and were omitted"
        );
    }

    io::write_table(output, &map.table)?;
    info!(
        rows = map.summary.rows,
        columns = map.summary.columns,
        "wrote competence map"
    );
    Ok(map.summary)
}

/// Loads map metadata from a JSON file such as
/// `{"principal_project": "...", "map_code": "...", "map_name": "..."}`.
pub fn load_metadata(path: &Path) -> Result<MapMetadata> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn require_existing(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(MapError::MissingInput(path.to_path_buf()))
    }
}

fn require_value(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(MapError::MissingMetadata(name.to_string()))
    } else {
        Ok(())
    }
}

/// Normalised, split and path-annotated table plus the level columns it holds.
fn prepare(table: Table) -> Result<(Table, Vec<String>)> {
    let table = split_categories(normalize_columns(table))?;
    Ok(build_paths(table))
}
