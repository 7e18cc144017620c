use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::project::ProjectFile;

/// Sampling temperature used for generation unless overridden.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Every way a generation can fail. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Please fill in both the project description and the language/framework.")]
    IncompleteRequest,

    #[error("Failed to reach the generation service: {0}")]
    Network(String),

    #[error("Generation service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("The AI model returned an empty response.")]
    EmptyResponse,

    #[error("The prompt was blocked by the AI model ({0}).")]
    Blocked(String),

    #[error("The generation stopped unexpectedly: {0}")]
    Interrupted(String),

    #[error("The AI model returned invalid JSON: {0}")]
    MalformedJson(String),

    #[error("Invalid project structure format received from API: {0}")]
    SchemaMismatch(String),
}

/// Response envelope of the `generateContent` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Schema the model must follow: an array of `{path, content}` objects.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "path": {
                    "type": "STRING",
                    "description": "The full path of the file, including directories. e.g., 'src/components/Button.tsx'"
                },
                "content": {
                    "type": "STRING",
                    "description": "The complete and unabridged content of the file."
                }
            },
            "required": ["path", "content"]
        }
    })
}

/// Build the JSON body for a `generateContent` call.
pub fn build_request_body(prompt: &str, temperature: f32) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
            "temperature": temperature
        }
    })
}

/// Concatenate the text parts of the first candidate.
///
/// A response without text is [`GenerationError::Blocked`] when the prompt
/// feedback names a block reason, [`GenerationError::EmptyResponse`] otherwise.
pub fn extract_response_text(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        let block_reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone());

        return Err(match block_reason {
            Some(reason) => GenerationError::Blocked(reason),
            None => GenerationError::EmptyResponse,
        });
    }

    Ok(text.to_string())
}

/// Remove a surrounding markdown fence (```json or ```) if the model added one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    rest.trim()
}

/// Validate the model output and turn it into project files.
///
/// The text must be a JSON array whose elements are objects carrying string
/// `path` and `content` fields. Extra fields are ignored. Any other shape is a
/// [`GenerationError::SchemaMismatch`]; nothing is salvaged from a bad response.
pub fn parse_project(text: &str) -> Result<Vec<ProjectFile>, GenerationError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GenerationError::MalformedJson(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(GenerationError::SchemaMismatch(format!(
                "expected an array of files, found {}",
                describe(&other)
            )))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| project_file(index, entry))
        .collect()
}

fn project_file(index: usize, entry: Value) -> Result<ProjectFile, GenerationError> {
    let mut fields = match entry {
        Value::Object(fields) => fields,
        other => {
            return Err(GenerationError::SchemaMismatch(format!(
                "entry {index} is {}, expected an object",
                describe(&other)
            )))
        }
    };

    let path = string_field(&mut fields, "path", index)?;
    let content = string_field(&mut fields, "content", index)?;

    Ok(ProjectFile { path, content })
}

fn string_field(
    fields: &mut Map<String, Value>,
    name: &str,
    index: usize,
) -> Result<String, GenerationError> {
    match fields.remove(name) {
        Some(Value::String(value)) => Ok(value),
        None | Some(Value::Null) => Err(GenerationError::SchemaMismatch(format!(
            "entry {index} is missing `{name}`"
        ))),
        Some(other) => Err(GenerationError::SchemaMismatch(format!(
            "entry {index} has {} for `{name}`, expected a string",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
