use crate::prelude::*;
use architect_core::intake::UploadSet;
use architect_core::project::UploadedFile;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// Name shown for an uploaded path: its final component.
pub fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every path as text, concurrently.
///
/// The batch is all-or-nothing: the first failure is returned and none of the
/// files are handed back.
pub async fn read_uploads(paths: &[PathBuf]) -> Result<Vec<UploadedFile>, Error> {
    let reads = paths.iter().map(|path| async move {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::FileRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        log::debug!("Read upload {} ({} bytes)", path.display(), content.len());
        Ok::<_, Error>(UploadedFile::new(upload_name(path), content))
    });

    join_all(reads).await.into_iter().collect()
}

/// Read `paths` and merge them into `uploads`. Returns how many were added.
pub async fn intake(uploads: &mut UploadSet, paths: &[PathBuf]) -> Result<usize, Error> {
    let files = read_uploads(paths).await?;
    let requested = files.len();
    let added = uploads.merge(files);

    if added < requested {
        log::warn!(
            "Skipped {} upload(s) with a name already attached",
            requested - added
        );
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_read_uploads_uses_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.md");
        fs::write(&notes, "# Notes").unwrap();

        let files = read_uploads(&[notes]).await.unwrap();
        assert_eq!(files, vec![UploadedFile::new("notes.md", "# Notes")]);
    }

    #[tokio::test]
    async fn test_intake_deduplicates_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        let first = dir.path().join("a/config.json");
        let second = dir.path().join("b/config.json");
        fs::write(&first, "first").unwrap();
        fs::write(&second, "second").unwrap();

        let mut uploads = UploadSet::new();
        let added = intake(&mut uploads, &[first, second]).await.unwrap();

        assert_eq!(added, 1);
        assert_eq!(uploads.files()[0].content, "first");
    }

    #[tokio::test]
    async fn test_failed_read_leaves_set_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        fs::write(&present, "ok").unwrap();
        let missing = dir.path().join("missing.txt");

        let mut uploads = UploadSet::new();
        let result = intake(&mut uploads, &[present, missing]).await;

        assert!(matches!(result, Err(Error::FileRead { .. })));
        assert!(uploads.is_empty());
    }

    #[test]
    fn test_upload_name_falls_back_to_display() {
        assert_eq!(upload_name(Path::new("dir/file.txt")), "file.txt");
        assert_eq!(upload_name(Path::new("/")), "/");
    }
}
