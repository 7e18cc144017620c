mod cli;
mod routes;

pub use cli::App;

use crate::config::GeminiConfig;
use crate::prelude::{eprintln, *};
use architect_core::i18n::I18n;
use architect_core::session::Session;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use colored::Colorize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::set_header::SetResponseHeaderLayer;

/// Sandbox applied to the raw preview route, matching the preview iframe.
const PREVIEW_CSP: &str = "sandbox allow-scripts";

/// Session plus the moment the pending request started, guarded together.
#[derive(Debug, Default)]
pub struct Shared {
    pub session: Session,
    pub loading_since: Option<Instant>,
}

impl Shared {
    /// Index of the loader message to show right now.
    pub fn loader_tick(&self) -> usize {
        self.loading_since
            .map(|since| (since.elapsed().as_millis() / 2500) as usize)
            .unwrap_or(0)
    }
}

pub struct AppState {
    pub shared: Mutex<Shared>,
    pub i18n: I18n,
    pub client: reqwest::Client,
    pub config: Option<GeminiConfig>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let i18n = global.i18n();

    let mut shared = Shared::default();
    if let Some(path) = &app.project {
        let files = crate::preview::load_project(Some(path)).await?;
        log::info!("Loaded {} file(s) from {}", files.len(), path.display());
        shared.session.load(files);
    }

    // Without a key the UI can still browse a preloaded project.
    let config = match app.api.resolve() {
        Ok(config) => Some(config),
        Err(e) if app.project.is_some() => {
            log::warn!("{e}; generation is disabled");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let state = Arc::new(AppState {
        shared: Mutex::new(shared),
        i18n,
        client: crate::gemini::create_client()?,
        config,
    });

    let addr = format!("{}:{}", app.host, app.port);

    if global.verbose {
        eprintln!("Starting web UI on {}...", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    eprintln!(
        "{} {}",
        "Web UI listening on".green(),
        format!("http://{addr}").cyan().underline()
    );

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/generate", post(routes::generate))
        .route("/uploads", post(routes::upload))
        .route("/uploads/remove", post(routes::remove_upload))
        .route(
            "/preview",
            get(routes::preview).layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(PREVIEW_CSP),
            )),
        )
        .route("/files/{*path}", get(routes::file))
        .with_state(state)
}
