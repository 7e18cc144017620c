use crate::generation::GenerationError;
use crate::intake::UploadSet;
use crate::preview::compose_preview;
use crate::project::{find_file, ProjectFile};
use crate::prompt::GenerationRequest;

/// Tabs of the project view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Code,
    Preview,
}

impl Tab {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "code" => Some(Tab::Code),
            "preview" => Some(Tab::Preview),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Code => "code",
            Tab::Preview => "preview",
        }
    }
}

/// What the user is looking at for one generated project.
///
/// The preview is derived from the file set alone and recomposed whenever the
/// files change; selecting a file never touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    files: Vec<ProjectFile>,
    selected: Option<String>,
    tab: Tab,
    preview: Option<String>,
}

impl ProjectView {
    pub fn new(files: Vec<ProjectFile>) -> Self {
        let mut view = Self {
            files: Vec::new(),
            selected: None,
            tab: Tab::Code,
            preview: None,
        };
        view.set_files(files);
        view
    }

    /// Replace the project files, keeping the selection when it still exists.
    pub fn set_files(&mut self, files: Vec<ProjectFile>) {
        self.preview = compose_preview(&files);
        self.files = files;

        let still_present = self
            .selected
            .as_deref()
            .is_some_and(|path| find_file(&self.files, path).is_some());
        if !still_present {
            self.selected = self.files.first().map(|file| file.path.clone());
        }

        if self.preview.is_none() {
            self.tab = Tab::Code;
        }
    }

    /// Select the file at `path`. Unknown paths leave the selection unchanged.
    pub fn select(&mut self, path: &str) -> bool {
        if find_file(&self.files, path).is_none() {
            return false;
        }

        self.selected = Some(path.to_string());
        true
    }

    /// Switch tabs. The preview tab is refused when there is nothing to preview.
    pub fn set_tab(&mut self, tab: Tab) -> bool {
        if tab == Tab::Preview && self.preview.is_none() {
            return false;
        }

        self.tab = tab;
        true
    }

    pub fn files(&self) -> &[ProjectFile] {
        &self.files
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn selected_file(&self) -> Option<&ProjectFile> {
        self.selected
            .as_deref()
            .and_then(|path| find_file(&self.files, path))
    }
}

/// Lifecycle of the single generation request a session may have in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Ready(ProjectView),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("A generation request is already in progress")]
    AlreadyLoading,

    #[error(transparent)]
    Invalid(#[from] GenerationError),
}

/// Uploads plus request state for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    uploads: UploadSet,
    state: RequestState,
    last_prompt: String,
    last_language: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a generation.
    ///
    /// Refused while another request is loading. On success the uploads move
    /// into the returned request, any previous result or error is cleared and
    /// the state becomes [`RequestState::Loading`].
    pub fn begin(
        &mut self,
        prompt: &str,
        language: &str,
    ) -> Result<GenerationRequest, SessionError> {
        if self.is_loading() {
            return Err(SessionError::AlreadyLoading);
        }

        self.last_prompt = prompt.to_string();
        self.last_language = language.to_string();

        let request = GenerationRequest::new(prompt, language, Vec::new())?;
        let request = GenerationRequest {
            files: self.uploads.take(),
            ..request
        };

        self.state = RequestState::Loading;
        Ok(request)
    }

    /// Record the outcome of the in-flight request. Ignored when nothing is loading.
    pub fn complete(&mut self, outcome: Result<Vec<ProjectFile>, GenerationError>) {
        if !self.is_loading() {
            return;
        }

        self.state = match outcome {
            Ok(files) => RequestState::Ready(ProjectView::new(files)),
            Err(error) => RequestState::Failed(error.to_string()),
        };
    }

    /// Show an already generated project without going through a request.
    pub fn load(&mut self, files: Vec<ProjectFile>) {
        self.state = RequestState::Ready(ProjectView::new(files));
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn uploads(&self) -> &UploadSet {
        &self.uploads
    }

    pub fn uploads_mut(&mut self) -> &mut UploadSet {
        &mut self.uploads
    }

    pub fn last_prompt(&self) -> &str {
        &self.last_prompt
    }

    pub fn last_language(&self) -> &str {
        &self.last_language
    }
}
