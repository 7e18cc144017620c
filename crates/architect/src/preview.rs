use crate::prelude::{eprintln, println, *};
use architect_core::generation::parse_project;
use architect_core::i18n::MessageKey;
use architect_core::preview::compose_preview;
use architect_core::project::ProjectFile;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

#[derive(Debug, clap::Parser)]
#[command(name = "preview")]
#[command(about = "Compose the previewable HTML of a generated project")]
pub struct App {
    /// Project JSON (an array of {path, content}); reads stdin when omitted
    pub project: Option<PathBuf>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let i18n = global.i18n();
    let files = load_project(app.project.as_deref()).await?;

    if global.verbose {
        eprintln!("Loaded {} file(s)", files.len());
    }

    let html = compose_preview(&files).ok_or_else(|| {
        eyre!(
            "{}: {}",
            i18n.t(MessageKey::NoPreviewAvailable),
            i18n.t(MessageKey::NoIndexHtml)
        )
    })?;

    println!("{}", html);
    Ok(())
}

/// Read and validate a project from a JSON file, or stdin when `path` is `None`.
pub async fn load_project(path: Option<&Path>) -> Result<Vec<ProjectFile>> {
    let text = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::FileRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read project from stdin")?;
            text
        }
    };

    parse_project(&text).map_err(|e| eyre!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_project_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(
            &path,
            r#"[{"path":"index.html","content":"<html><head><link rel=\"stylesheet\" href=\"./s.css\"></head></html>"},{"path":"s.css","content":"p{}"}]"#,
        )
        .unwrap();

        let files = load_project(Some(&path)).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(compose_preview(&files).unwrap().contains("<style>p{}</style>"));
    }

    #[tokio::test]
    async fn test_load_project_rejects_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(&path, r#"{"path":"index.html","content":""}"#).unwrap();

        let error = load_project(Some(&path)).await.unwrap_err();
        assert!(error.to_string().contains("Invalid project structure"));
    }
}
