use crate::generation::GenerationError;
use crate::project::UploadedFile;

/// A validated request to generate a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Natural-language description of the project.
    pub prompt: String,
    /// Primary language or framework, e.g. "React with TypeScript".
    pub language: String,
    /// Context files uploaded by the user.
    pub files: Vec<UploadedFile>,
}

impl GenerationRequest {
    /// Build a request, rejecting a blank prompt or language.
    pub fn new(
        prompt: impl Into<String>,
        language: impl Into<String>,
        files: Vec<UploadedFile>,
    ) -> Result<Self, GenerationError> {
        let prompt = prompt.into();
        let language = language.into();

        if prompt.trim().is_empty() || language.trim().is_empty() {
            return Err(GenerationError::IncompleteRequest);
        }

        Ok(Self {
            prompt,
            language,
            files,
        })
    }
}

/// Render the uploaded files as delimited context blocks.
pub fn build_file_context(files: &[UploadedFile]) -> String {
    if files.is_empty() {
        return String::new();
    }

    let mut context = String::from("The user has provided the following files for context:\n\n");
    for file in files {
        context.push_str(&format!(
            "--- FILE: {name} ---\n{content}\n--- END FILE: {name} ---\n\n",
            name = file.name,
            content = file.content
        ));
    }

    context
}

/// Build the full instruction sent to the generation service.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let context = build_file_context(&request.files);

    format!(
        "You are a world-class AI software engineer. Your task is to generate a complete, functional, \
and well-structured project based on the user's request.
Adhere to modern coding best practices for the specified language/framework.

**User's Request:**
\"{prompt}\"

**Primary Language/Framework:**
{language}

{context}Please generate all the necessary files for this project. Ensure the file paths are correct \
and include all required code.
The code should be complete and ready to run. Do not add any explanatory text outside the JSON structure.

IMPORTANT for web projects:
- Create a single 'index.html' file as the main entry point.
- All necessary CSS and JavaScript should be included or linked from this file using relative paths \
(e.g., <script src=\"./app.js\"></script>).
- The project must be runnable by simply opening the 'index.html' file in a browser.

Provide your response as a JSON array of file objects, where each object has a 'path' and a 'content' property.",
        prompt = request.prompt,
        language = request.language,
        context = context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_prompt_is_rejected() {
        let result = GenerationRequest::new("   ", "HTML", vec![]);
        assert!(matches!(result, Err(GenerationError::IncompleteRequest)));
    }

    #[test]
    fn test_blank_language_is_rejected() {
        let result = GenerationRequest::new("A todo app", "\n", vec![]);
        assert!(matches!(result, Err(GenerationError::IncompleteRequest)));
    }

    #[test]
    fn test_prompt_without_files_has_no_context_block() {
        let request = GenerationRequest::new("A button that alerts hello", "HTML", vec![]).unwrap();
        let prompt = build_prompt(&request);

        assert!(prompt.contains("\"A button that alerts hello\""));
        assert!(prompt.contains("**Primary Language/Framework:**\nHTML"));
        assert!(!prompt.contains("--- FILE:"));
        assert!(prompt.contains("'index.html'"));
    }

    #[test]
    fn test_prompt_wraps_each_uploaded_file() {
        let request = GenerationRequest::new(
            "Extend the API",
            "Rust with axum",
            vec![
                UploadedFile::new("main.rs", "fn main() {}"),
                UploadedFile::new("README.md", "# Api"),
            ],
        )
        .unwrap();

        let prompt = build_prompt(&request);
        assert!(prompt.contains("--- FILE: main.rs ---\nfn main() {}\n--- END FILE: main.rs ---"));
        assert!(prompt.contains("--- FILE: README.md ---\n# Api\n--- END FILE: README.md ---"));
        assert!(prompt.find("main.rs").unwrap() < prompt.find("README.md").unwrap());
    }

    #[test]
    fn test_file_context_empty_for_no_files() {
        assert_eq!(build_file_context(&[]), "");
    }
}
