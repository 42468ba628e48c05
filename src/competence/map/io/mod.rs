//! Adapters between sheet files and [`Table`].

pub mod csv_read;
pub mod csv_write;
pub mod excel_read;
pub mod excel_write;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::competence::map::error::{MapError, Result};
use crate::competence::map::model::Table;

/// Reads a table, choosing the reader from the file extension.
pub fn read_table(path: &Path) -> Result<Table> {
    if is_excel(path) {
        excel_read::read_table(path)
    } else {
        csv_read::read_table(path)
    }
}

/// Writes a table, choosing the writer from the file extension.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    if is_excel(path) {
        excel_write::write_table(path, table)
    } else {
        csv_write::write_table(path, table)
    }
}

fn is_excel(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("xlsx"))
}

/// Runs `write` against a temporary file beside `path` and renames it into
/// place only when `write` succeeds. An existing file at `path` is left
/// untouched on failure.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|error| MapError::Io(error.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn failed_write_keeps_the_previous_file() {
        let temp_dir = tempdir().expect("temporary directory");
        let target = temp_dir.path().join("map.csv");
        fs::write(&target, "previous").expect("seed written");

        let error = write_atomically(&target, |writer| {
            writer.write_all(b"partial")?;
            Err(MapError::NoInputData)
        })
        .unwrap_err();

        assert!(matches!(error, MapError::NoInputData));
        assert_eq!(fs::read_to_string(&target).unwrap(), "previous");
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn successful_write_replaces_the_file() {
        let temp_dir = tempdir().expect("temporary directory");
        let target = temp_dir.path().join("map.csv");
        fs::write(&target, "previous").expect("seed written");

        write_atomically(&target, |writer| Ok(writer.write_all(b"next")?)).expect("written");

        assert_eq!(fs::read_to_string(&target).unwrap(), "next");
    }

    #[test]
    fn excel_extension_is_case_insensitive() {
        assert!(is_excel(Path::new("map.XLSX")));
        assert!(!is_excel(Path::new("map.csv")));
    }
}
