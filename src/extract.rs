//! Zip extraction into the cache.
use crate::DatasetError;
use log::debug;
use std::fs::{self, File};
use std::path::Path;
use zip::ZipArchive;

/// Extract the zip archive at `archive` into `destination`.
///
/// Entries are first extracted into a staging directory inside `destination` and only moved
/// into place once the whole archive has been read. On error the staging directory is removed
/// and `destination` keeps its previous contents. Top-level entries already present in
/// `destination` are replaced.
pub fn unpack_zip(archive: &Path, destination: &Path) -> Result<(), DatasetError> {
    fs::create_dir_all(destination)?;
    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(destination)?;

    let mut zip = ZipArchive::new(File::open(archive)?)?;
    debug!(
        "Extracting {} entries of {archive:?} into {:?}",
        zip.len(),
        staging.path()
    );
    zip.extract(staging.path())?;

    for entry in fs::read_dir(staging.path())? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        } else if target.exists() {
            fs::remove_file(&target)?;
        }
        fs::rename(entry.path(), &target)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    /// Write a zip archive holding `files` (name, content) to `path`.
    pub(crate) fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, content) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn visible_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn extracts_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(
            &archive,
            &[("corpus/train.txt", "a"), ("corpus/test.txt", "b"), ("README", "c")],
        );
        let destination = dir.path().join("out");

        unpack_zip(&archive, &destination).unwrap();

        assert_eq!(visible_entries(&destination), vec!["README", "corpus"]);
        assert_eq!(
            fs::read_to_string(destination.join("corpus/train.txt")).unwrap(),
            "a"
        );
    }

    #[test]
    fn replaces_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out");
        fs::create_dir_all(destination.join("corpus")).unwrap();
        fs::write(destination.join("corpus/stale.txt"), "old").unwrap();

        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("corpus/train.txt", "new")]);
        unpack_zip(&archive, &destination).unwrap();

        assert!(!destination.join("corpus/stale.txt").exists());
        assert_eq!(
            fs::read_to_string(destination.join("corpus/train.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn invalid_archive_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, "this is not a zip file").unwrap();
        let destination = dir.path().join("out");
        fs::create_dir_all(&destination).unwrap();
        fs::write(destination.join("keep.txt"), "kept").unwrap();

        let err = unpack_zip(&archive, &destination).unwrap_err();
        assert!(matches!(err, DatasetError::ZipError(_)), "{err:?}");
        assert_eq!(visible_entries(&destination), vec!["keep.txt"]);
    }
}
