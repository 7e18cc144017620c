use crate::config::GeminiConfig;
use crate::prelude::*;
use architect_core::generation::{
    build_request_body, extract_response_text, parse_project, GenerateContentResponse,
    GenerationError,
};
use architect_core::project::ProjectFile;
use architect_core::prompt::{build_prompt, GenerationRequest};

/// Longest slice of an error body kept in an HTTP failure message.
const MAX_ERROR_BODY: usize = 500;

pub fn create_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("architect/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Generate a project with a single call to the generation service.
///
/// No retries: the outcome is either the full validated file list or one
/// [`GenerationError`] whose message can be shown to the user as is.
pub async fn generate_project_data(
    client: &reqwest::Client,
    config: &GeminiConfig,
    request: &GenerationRequest,
) -> std::result::Result<Vec<ProjectFile>, GenerationError> {
    let result = request_project(client, config, request).await;

    match &result {
        Ok(files) => log::info!("Generated project with {} file(s)", files.len()),
        Err(e) => log::error!("Error generating project: {e}"),
    }

    result
}

async fn request_project(
    client: &reqwest::Client,
    config: &GeminiConfig,
    request: &GenerationRequest,
) -> std::result::Result<Vec<ProjectFile>, GenerationError> {
    // Step 1: Pure transformation - Compose the instruction and wire body
    let prompt = build_prompt(request);
    let body = build_request_body(&prompt, config.temperature);

    log::debug!(
        "Requesting {} (prompt: {} chars, uploads: {})",
        config.endpoint(),
        prompt.len(),
        request.files.len()
    );

    // Step 2: Network I/O
    let response = client
        .post(config.endpoint())
        .header("x-goog-api-key", &config.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| GenerationError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError::Http {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        });
    }

    let envelope: GenerateContentResponse = response
        .json()
        .await
        .map_err(|e| GenerationError::MalformedJson(e.to_string()))?;

    if let Some(reason) = envelope
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
    {
        log::debug!("Finish reason: {reason}");
    }

    // Step 3: Pure transformation - Validate the project
    let text = extract_response_text(&envelope)?;
    parse_project(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_local;
    use architect_core::preview::compose_preview;
    use axum::http::{HeaderMap, StatusCode};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const API_KEY: &str = "test-key";

    fn envelope(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {"parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    /// Generation service answering every request with `status` and `body`.
    /// Requests without the expected API key get a 401.
    async fn stub_service(status: StatusCode, body: Value) -> GeminiConfig {
        let router = Router::new().fallback(move |headers: HeaderMap| {
            let body = body.clone();
            async move {
                let key = headers
                    .get("x-goog-api-key")
                    .and_then(|value| value.to_str().ok());
                if key != Some(API_KEY) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
                }
                (status, Json(body))
            }
        });

        GeminiConfig {
            base_url: serve_local(router).await,
            ..GeminiConfig::new(API_KEY.into())
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("A page that greets the visitor", "HTML and JavaScript", Vec::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_generated_project_composes_preview() {
        let files = json!([
            {"path": "index.html", "content": "<html><body><script src=\"./app.js\"></script></body></html>"},
            {"path": "app.js", "content": "alert('hello')"}
        ]);
        let config = stub_service(StatusCode::OK, envelope(&files.to_string())).await;

        let project = generate_project_data(&reqwest::Client::new(), &config, &request())
            .await
            .unwrap();

        assert_eq!(project.len(), 2);
        let html = compose_preview(&project).unwrap();
        assert!(html.contains("<script>alert('hello')</script>"));
        assert!(!html.contains("src=\"./app.js\""));
    }

    #[tokio::test]
    async fn test_object_response_is_schema_mismatch() {
        let config = stub_service(
            StatusCode::OK,
            envelope(r#"{"path": "index.html", "content": "<html></html>"}"#),
        )
        .await;

        let error = generate_project_data(&reqwest::Client::new(), &config, &request())
            .await
            .unwrap_err();

        assert!(matches!(error, GenerationError::SchemaMismatch(_)));
        assert_eq!(
            error.to_string(),
            "Invalid project structure format received from API: expected an array of files, found an object"
        );
    }

    #[tokio::test]
    async fn test_error_status_is_http_error() {
        let config = stub_service(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": {"message": "overloaded"}}),
        )
        .await;

        let error = generate_project_data(&reqwest::Client::new(), &config, &request())
            .await
            .unwrap_err();

        match error {
            GenerationError::Http { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("overloaded"));
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_key_is_sent_in_header() {
        let config = stub_service(StatusCode::OK, envelope("[]")).await;
        let wrong_key = GeminiConfig {
            api_key: "other-key".into(),
            ..config.clone()
        };

        let client = reqwest::Client::new();
        assert_eq!(
            generate_project_data(&client, &config, &request()).await,
            Ok(Vec::new())
        );
        assert!(matches!(
            generate_project_data(&client, &wrong_key, &request()).await,
            Err(GenerationError::Http { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_blocked_prompt_reports_reason() {
        let config = stub_service(
            StatusCode::OK,
            json!({"promptFeedback": {"blockReason": "SAFETY"}}),
        )
        .await;

        let error = generate_project_data(&reqwest::Client::new(), &config, &request())
            .await
            .unwrap_err();

        assert_eq!(error, GenerationError::Blocked("SAFETY".into()));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = GeminiConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..GeminiConfig::new(API_KEY.into())
        };

        let error = generate_project_data(&reqwest::Client::new(), &config, &request())
            .await
            .unwrap_err();

        assert!(matches!(error, GenerationError::Network(_)));
    }
}
