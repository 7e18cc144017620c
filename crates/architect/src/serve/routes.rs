use super::{AppState, Shared};
use crate::prelude::*;
use architect_core::generation::GenerationError;
use architect_core::i18n::{I18n, MessageKey};
use architect_core::page::{render_page, PageContext, ResultArea};
use architect_core::project::{find_file, ProjectFile, UploadedFile};
use architect_core::session::{RequestState, SessionError, Tab};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub file: Option<String>,
    pub tab: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub name: String,
}

/// Render the page for the current state, applying the query's file and tab.
pub fn render(i18n: I18n, shared: &Shared, query: &PageQuery, notice: Option<&str>) -> String {
    let session = &shared.session;

    let view;
    let result = match session.state() {
        RequestState::Ready(ready) => {
            let mut adjusted = ready.clone();
            if let Some(path) = query.file.as_deref() {
                adjusted.select(path);
            }
            if let Some(tab) = query.tab.as_deref().and_then(Tab::parse) {
                adjusted.set_tab(tab);
            }
            view = adjusted;
            ResultArea::Project(&view)
        }
        state => ResultArea::from_state(state, shared.loader_tick()),
    };

    render_page(&PageContext {
        i18n,
        prompt: session.last_prompt(),
        language: session.last_language(),
        uploads: session.uploads().files(),
        notice,
        result,
    })
}

fn page_with_notice(state: &AppState, shared: &Shared, status: StatusCode, notice: &str) -> Response {
    let html = render(state.i18n, shared, &PageQuery::default(), Some(notice));
    (status, Html(html)).into_response()
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let shared = state.shared.lock().await;
    Html(render(state.i18n, &shared, &query, None))
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let mut shared = state.shared.lock().await;

    let Some(config) = state.config.clone() else {
        let notice = Error::MissingApiKey.to_string();
        return page_with_notice(&state, &shared, StatusCode::SERVICE_UNAVAILABLE, &notice);
    };

    let request = match shared.session.begin(&form.prompt, &form.language) {
        Ok(request) => request,
        Err(SessionError::AlreadyLoading) => {
            let notice = SessionError::AlreadyLoading.to_string();
            return page_with_notice(&state, &shared, StatusCode::CONFLICT, &notice);
        }
        Err(SessionError::Invalid(_)) => {
            let notice = state.i18n.t(MessageKey::FormAlert);
            return page_with_notice(&state, &shared, StatusCode::BAD_REQUEST, notice);
        }
    };

    shared.loading_since = Some(Instant::now());
    log::info!(
        "Generating project for {:?} ({} upload(s))",
        request.language,
        request.files.len()
    );

    let work = {
        let state = Arc::clone(&state);
        async move { crate::gemini::generate_project_data(&state.client, &config, &request).await }
    };
    tokio::spawn(settle(Arc::clone(&state), work));

    Redirect::to("/").into_response()
}

/// Run `work` on its own task and record the outcome, even when it panics.
async fn settle<F>(state: Arc<AppState>, work: F)
where
    F: Future<Output = Result<Vec<ProjectFile>, GenerationError>> + Send + 'static,
{
    let outcome = match tokio::spawn(work).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Generation task failed: {e}");
            Err(GenerationError::Interrupted(e.to_string()))
        }
    };

    let mut shared = state.shared.lock().await;
    shared.session.complete(outcome);
    shared.loading_since = None;
}

pub async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut files = Vec::new();

    // Read the whole batch before touching the upload set.
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return read_failure(&state, e.to_string()).await,
        };

        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        match field.text().await {
            Ok(content) => files.push(UploadedFile::new(name, content)),
            Err(e) => return read_failure(&state, format!("{name}: {e}")).await,
        }
    }

    let mut shared = state.shared.lock().await;
    let added = shared.session.uploads_mut().merge(files);
    log::debug!("Merged {added} upload(s)");

    Redirect::to("/").into_response()
}

async fn read_failure(state: &AppState, message: String) -> Response {
    log::error!("Error reading files: {message}");

    let shared = state.shared.lock().await;
    let notice = Error::UploadRead(message).to_string();
    page_with_notice(state, &shared, StatusCode::BAD_REQUEST, &notice)
}

pub async fn remove_upload(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RemoveForm>,
) -> Redirect {
    let mut shared = state.shared.lock().await;
    if !shared.session.uploads_mut().remove(&form.name) {
        log::debug!("No upload named {:?}", form.name);
    }

    Redirect::to("/")
}

pub async fn preview(State(state): State<Arc<AppState>>) -> Response {
    let shared = state.shared.lock().await;

    match shared.session.state() {
        RequestState::Ready(view) => match view.preview() {
            Some(html) => Html(html.to_string()).into_response(),
            None => not_found(state.i18n.t(MessageKey::NoIndexHtml)),
        },
        _ => not_found(state.i18n.t(MessageKey::NoPreviewAvailable)),
    }
}

pub async fn file(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let shared = state.shared.lock().await;

    let content = match shared.session.state() {
        RequestState::Ready(view) => find_file(view.files(), &path).map(|file| file.content.clone()),
        _ => None,
    };

    match content {
        Some(content) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            content,
        )
            .into_response(),
        None => not_found(&Error::UnknownFile(path).to_string()),
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, message.to_string()).into_response()
}
