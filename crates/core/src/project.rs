use serde::{Deserialize, Serialize};

/// Path of the file used as the preview entry point (compared case-insensitively).
pub const ENTRY_POINT: &str = "index.html";

/// A user-provided context file, read as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File name as shown in the upload list. Unique within an upload set.
    pub name: String,
    /// Full text content of the file.
    pub content: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A file produced by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Relative, forward-slash separated path.
    pub path: String,
    /// Complete file content.
    pub content: String,
}

impl ProjectFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Find a file by exact path. Duplicated paths resolve to the first entry.
pub fn find_file<'a>(files: &'a [ProjectFile], path: &str) -> Option<&'a ProjectFile> {
    files.iter().find(|file| file.path == path)
}

/// Find the `index.html` entry point, ignoring ASCII case.
pub fn find_entry_point(files: &[ProjectFile]) -> Option<&ProjectFile> {
    files
        .iter()
        .find(|file| file.path.eq_ignore_ascii_case(ENTRY_POINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_file_exact_match() {
        let files = vec![
            ProjectFile::new("src/app.js", "a"),
            ProjectFile::new("app.js", "b"),
        ];
        assert_eq!(find_file(&files, "app.js").unwrap().content, "b");
        assert!(find_file(&files, "./app.js").is_none());
    }

    #[test]
    fn test_find_file_duplicate_paths_returns_first() {
        let files = vec![
            ProjectFile::new("app.js", "first"),
            ProjectFile::new("app.js", "second"),
        ];
        assert_eq!(find_file(&files, "app.js").unwrap().content, "first");
    }

    #[test]
    fn test_find_entry_point_is_case_insensitive() {
        let files = vec![
            ProjectFile::new("style.css", ""),
            ProjectFile::new("INDEX.HTML", "<html></html>"),
        ];
        assert_eq!(find_entry_point(&files).unwrap().path, "INDEX.HTML");
    }

    #[test]
    fn test_find_entry_point_ignores_nested_index() {
        let files = vec![ProjectFile::new("public/index.html", "<html></html>")];
        assert!(find_entry_point(&files).is_none());
    }

    #[test]
    fn test_project_file_deserializes_from_wire_shape() {
        let file: ProjectFile =
            serde_json::from_str(r#"{"path":"index.html","content":"<p>hi</p>"}"#).unwrap();
        assert_eq!(file, ProjectFile::new("index.html", "<p>hi</p>"));
    }
}
