//! File system helpers for tile directories

use std::fs;
use std::path::{Path, PathBuf};

use crate::raster::errors::{TileError, TileResult};

/// List every entry of a directory, non-recursively, sorted by path
///
/// No file-type filtering is done; entries GDAL cannot open are reported
/// and skipped by the callers.
pub fn list_directory(dir: &Path) -> TileResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

/// Build `destination_dir/<file name of source>`
///
/// Both the source file and the destination directory must exist. Paths are
/// compared after canonicalization, so `dir/./a.tif` mapped into `dir` is
/// refused like `dir/a.tif`: writing there would truncate the source while it
/// is being read.
pub fn destination_path(source: &Path, destination_dir: &Path) -> TileResult<PathBuf> {
    let file_name = source.file_name()
        .ok_or_else(|| TileError::GenericError(format!("{} has no file name", source.display())))?;
    let destination = destination_dir.join(file_name);

    let source_on_disk = fs::canonicalize(source)?;
    let destination_on_disk = fs::canonicalize(destination_dir)?.join(file_name);
    if destination_on_disk == source_on_disk {
        return Err(TileError::GenericError(format!(
            "Destination {} is the source file itself", destination.display()
        )));
    }

    Ok(destination)
}

/// Create a directory and its parents if they do not exist yet
pub fn ensure_directory(dir: &Path) -> TileResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_path_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("tile_1_2.tif");
        fs::write(&source, b"").unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let dst = destination_path(&source, &out).unwrap();
        assert_eq!(dst, out.join("tile_1_2.tif"));
    }

    #[test]
    fn test_destination_path_rejects_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.tif");
        fs::write(&source, b"").unwrap();

        assert!(destination_path(&source, dir.path()).is_err());
        assert!(destination_path(Path::new("/"), Path::new("/")).is_err());
    }

    #[test]
    fn test_destination_path_rejects_other_spelling_of_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let source = dir.path().join("a.tif");
        fs::write(&source, b"").unwrap();

        let dotted = dir.path().join(".").join("a.tif");
        assert!(destination_path(&dotted, dir.path()).is_err());

        let via_parent = nested.join("..").join("a.tif");
        assert!(destination_path(&via_parent, dir.path()).is_err());
        assert!(destination_path(&source, &nested.join("..")).is_err());

        // Nothing may have been written next to the source
        assert_eq!(fs::read(&source).unwrap(), b"");
    }

    #[test]
    fn test_destination_path_requires_existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.tif");
        fs::write(&source, b"").unwrap();

        assert!(destination_path(&dir.path().join("missing.tif"), dir.path()).is_err());
        assert!(destination_path(&source, &dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_list_directory_sorted_and_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.tif"), b"").unwrap();
        fs::write(dir.path().join("a.tif"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.tif"), b"").unwrap();

        let entries = list_directory(dir.path()).unwrap();
        let names: Vec<_> = entries.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tif", "b.tif", "nested"]);
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_directory(&dir.path().join("missing")).is_err());
    }
}
