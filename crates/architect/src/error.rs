#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to read '{path}': {message}")]
    FileRead { path: String, message: String },

    #[error("There was an error reading one or more files: {0}")]
    UploadRead(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("No API key configured. Set GEMINI_API_KEY (or API_KEY) or pass --api-key")]
    MissingApiKey,

    #[error("No file named '{0}' in the generated project")]
    UnknownFile(String),
}
