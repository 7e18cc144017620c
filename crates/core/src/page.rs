//! HTML rendering for the web UI.
//!
//! Pure string building: the shell decides what state to show and passes it
//! in through [`PageContext`]. All dynamic text is escaped here.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::i18n::{I18n, MessageKey};
use crate::project::UploadedFile;
use crate::session::{ProjectView, RequestState, Tab};

/// Seconds between automatic refreshes while a generation is running.
pub const LOADER_REFRESH_SECS: u64 = 3;

/// What the area below the control panel shows.
#[derive(Debug, Clone, Copy)]
pub enum ResultArea<'a> {
    Empty,
    Loading { tick: usize },
    Failed(&'a str),
    Project(&'a ProjectView),
}

impl<'a> ResultArea<'a> {
    pub fn from_state(state: &'a RequestState, tick: usize) -> Self {
        match state {
            RequestState::Idle => ResultArea::Empty,
            RequestState::Loading => ResultArea::Loading { tick },
            RequestState::Failed(message) => ResultArea::Failed(message),
            RequestState::Ready(view) => ResultArea::Project(view),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub i18n: I18n,
    pub prompt: &'a str,
    pub language: &'a str,
    pub uploads: &'a [UploadedFile],
    pub notice: Option<&'a str>,
    pub result: ResultArea<'a>,
}

impl PageContext<'_> {
    fn is_loading(&self) -> bool {
        matches!(self.result, ResultArea::Loading { .. })
    }
}

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #111827; color: #e5e7eb; }
header { padding: 1rem; text-align: center; border-bottom: 1px solid #374151; }
header h1 { margin: 0; color: #a78bfa; }
header p { margin: .25rem 0 0; color: #9ca3af; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }
.panel { background: #1f2937; border: 1px solid #374151; border-radius: .75rem; padding: 1.5rem; }
label { display: block; margin-bottom: .5rem; font-size: .875rem; }
textarea, input[type=text] { width: 100%; box-sizing: border-box; padding: .75rem; background: #111827; color: inherit; border: 1px solid #4b5563; border-radius: .375rem; }
textarea { height: 8rem; }
.field { margin-bottom: 1.5rem; }
.drop { display: block; padding: 2rem; text-align: center; border: 2px dashed #4b5563; border-radius: .375rem; cursor: pointer; }
.drop input { display: none; }
.drop span { color: #818cf8; }
.uploads { list-style: none; padding: 0; }
.uploads li { display: flex; justify-content: space-between; background: #374151; padding: .5rem; margin-top: .5rem; border-radius: .375rem; font-family: monospace; }
.uploads form { display: inline; }
button { cursor: pointer; }
.submit { width: 100%; padding: .75rem; background: #4f46e5; color: #fff; border: 0; border-radius: .375rem; }
.submit:disabled { background: #4b5563; cursor: not-allowed; }
.notice { color: #fca5a5; }
.result { margin-top: 2rem; }
.placeholder, .loader { text-align: center; padding: 4rem 1rem; border: 2px dashed #374151; border-radius: .5rem; color: #6b7280; }
.error { background: #7f1d1d80; border: 1px solid #b91c1c; color: #fca5a5; padding: .75rem 1rem; border-radius: .5rem; text-align: center; }
.project { background: #1f2937; border: 1px solid #374151; border-radius: .75rem; overflow: hidden; min-height: 60vh; }
.tabs { display: flex; border-bottom: 1px solid #374151; }
.tabs a, .tabs span { padding: .75rem 1rem; color: #9ca3af; text-decoration: none; }
.tabs .active { background: #374151; color: #fff; }
.tabs .disabled { color: #4b5563; cursor: not-allowed; }
.code { display: flex; }
.code aside { width: 25%; border-right: 1px solid #374151; }
.code aside h3 { margin: 0; padding: 1rem; }
.code aside a { display: block; padding: .5rem .75rem; color: #d1d5db; text-decoration: none; overflow: hidden; text-overflow: ellipsis; }
.code aside a.active { background: #4f46e580; color: #fff; }
.code section { flex: 1; min-width: 0; }
.file-header { display: flex; justify-content: space-between; padding: .75rem; border-bottom: 1px solid #374151; font-family: monospace; }
pre { margin: 0; padding: 1rem; white-space: pre-wrap; word-break: break-word; }
iframe { width: 100%; height: 60vh; border: 0; background: #fff; }
"#;

const COPY_SCRIPT: &str = r#"<script>
document.getElementById('copy').addEventListener('click', async (event) => {
  const button = event.currentTarget;
  const content = document.getElementById('file-content').textContent;
  try {
    await navigator.clipboard.writeText(content);
    const label = button.textContent;
    button.textContent = button.dataset.copied;
    setTimeout(() => { button.textContent = label; }, 2000);
  } catch (err) {
    console.error('Failed to copy text: ', err);
    alert(button.dataset.failed);
  }
});
</script>"#;

/// Render the whole page.
pub fn render_page(ctx: &PageContext) -> String {
    let i18n = ctx.i18n;
    let refresh = if ctx.is_loading() {
        format!(r#"<meta http-equiv="refresh" content="{LOADER_REFRESH_SECS}">"#)
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{title}</title>
<style>{STYLES}</style>
</head>
<body>
<header>
<h1>{title}</h1>
<p>{subtitle}</p>
</header>
<main>
<div class="panel">
{controls}
</div>
<div class="result">
{result}
</div>
</main>
</body>
</html>
"#,
        lang = i18n.locale().tag(),
        title = encode_text(i18n.t(MessageKey::AppTitle)),
        subtitle = encode_text(i18n.t(MessageKey::AppSubtitle)),
        controls = render_controls(ctx),
        result = render_result(ctx),
    )
}

fn render_controls(ctx: &PageContext) -> String {
    let i18n = ctx.i18n;
    let loading = ctx.is_loading();

    let notice = ctx
        .notice
        .map(|notice| format!(r#"<p class="notice" role="alert">{}</p>"#, encode_text(notice)))
        .unwrap_or_default();

    let uploads: String = ctx
        .uploads
        .iter()
        .map(|file| {
            let name = encode_double_quoted_attribute(&file.name);
            format!(
                r#"<li><span>{label}</span><form method="post" action="/uploads/remove"><input type="hidden" name="name" value="{name}"><button type="submit" aria-label="remove {name}">&#x2715;</button></form></li>"#,
                label = encode_text(&file.name),
            )
        })
        .collect();
    let uploads = if uploads.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="uploads">{uploads}</ul>"#)
    };

    let (button_label, disabled) = if loading {
        (i18n.t(MessageKey::GeneratingButton), " disabled")
    } else {
        (i18n.t(MessageKey::GenerateButton), "")
    };

    format!(
        r#"<div class="field">
<label>{files_label}</label>
<form method="post" action="/uploads" enctype="multipart/form-data">
<label class="drop">{drop} <span>{browse}</span><input type="file" name="files" multiple onchange="this.form.submit()"></label>
</form>
{uploads}
</div>
<form method="post" action="/generate">
<div class="field">
<label for="prompt">{prompt_label}</label>
<textarea id="prompt" name="prompt" placeholder="{prompt_placeholder}" required>{prompt}</textarea>
</div>
<div class="field">
<label for="language">{language_label}</label>
<input type="text" id="language" name="language" placeholder="{language_placeholder}" value="{language}" required>
</div>
{notice}
<button type="submit" class="submit"{disabled}>{button_label}</button>
</form>"#,
        files_label = encode_text(i18n.t(MessageKey::FilesLabel)),
        drop = encode_text(i18n.t(MessageKey::DropFiles)),
        browse = encode_text(i18n.t(MessageKey::Browse)),
        prompt_label = encode_text(i18n.t(MessageKey::PromptLabel)),
        prompt_placeholder = encode_double_quoted_attribute(i18n.t(MessageKey::PromptPlaceholder)),
        prompt = encode_text(ctx.prompt),
        language_label = encode_text(i18n.t(MessageKey::LanguageLabel)),
        language_placeholder =
            encode_double_quoted_attribute(i18n.t(MessageKey::LanguagePlaceholder)),
        language = encode_double_quoted_attribute(ctx.language),
        button_label = encode_text(button_label),
    )
}

fn render_result(ctx: &PageContext) -> String {
    let i18n = ctx.i18n;

    match ctx.result {
        ResultArea::Empty => format!(
            r#"<div class="placeholder"><h2>{}</h2><p>{}</p></div>"#,
            encode_text(i18n.t(MessageKey::PreviewHeader)),
            encode_text(i18n.t(MessageKey::PreviewSubtitle)),
        ),
        ResultArea::Loading { tick } => format!(
            r#"<div class="loader"><p><strong>{}</strong></p><p>{}</p></div>"#,
            encode_text(i18n.loader_message(tick)),
            encode_text(i18n.t(MessageKey::LoaderWait)),
        ),
        ResultArea::Failed(message) => format!(
            r#"<div class="error" role="alert"><p><strong>{}</strong></p><p>{}</p></div>"#,
            encode_text(i18n.t(MessageKey::ErrorTitle)),
            encode_text(message),
        ),
        ResultArea::Project(view) => render_project(i18n, view),
    }
}

fn render_project(i18n: I18n, view: &ProjectView) -> String {
    let selected = view.selected_file().map(|file| file.path.as_str());
    let file_query = selected
        .map(|path| format!("&file={}", urlencoding::encode(path)))
        .unwrap_or_default();

    let code_class = if view.tab() == Tab::Code { "active" } else { "" };
    let code_tab = format!(
        r#"<a class="{code_class}" href="?tab=code{file_query}">{}</a>"#,
        encode_text(i18n.t(MessageKey::CodeTab))
    );

    let preview_label = encode_text(i18n.t(MessageKey::LivePreviewTab));
    let preview_tab = if view.has_preview() {
        let class = if view.tab() == Tab::Preview { "active" } else { "" };
        format!(r#"<a class="{class}" href="?tab=preview{file_query}">{preview_label}</a>"#)
    } else {
        format!(r#"<span class="disabled" aria-disabled="true">{preview_label}</span>"#)
    };

    let body = match view.tab() {
        Tab::Code => render_code_view(i18n, view),
        Tab::Preview => render_preview_view(i18n, view.preview()),
    };

    format!(
        r#"<div class="project"><nav class="tabs">{code_tab}{preview_tab}</nav>{body}</div>"#
    )
}

fn render_code_view(i18n: I18n, view: &ProjectView) -> String {
    let selected = view.selected_file();

    let links: String = view
        .files()
        .iter()
        .map(|file| {
            let class = if selected.is_some_and(|s| s.path == file.path) {
                "active"
            } else {
                ""
            };
            format!(
                r#"<a class="{class}" href="?tab=code&file={}">{}</a>"#,
                urlencoding::encode(&file.path),
                encode_text(&file.path)
            )
        })
        .collect();

    let content = match selected {
        Some(file) => format!(
            r#"<div class="file-header"><span>{path}</span><button type="button" id="copy" data-copied="{copied}" data-failed="{failed}">{copy}</button></div><pre><code id="file-content">{content}</code></pre>{COPY_SCRIPT}"#,
            path = encode_text(&file.path),
            copied = encode_double_quoted_attribute(i18n.t(MessageKey::Copied)),
            failed = encode_double_quoted_attribute(i18n.t(MessageKey::CopyFail)),
            copy = encode_text(i18n.t(MessageKey::Copy)),
            content = encode_text(&file.content),
        ),
        None => format!(
            r#"<p class="placeholder">{}</p>"#,
            encode_text(i18n.t(MessageKey::SelectFile))
        ),
    };

    format!(
        r#"<div class="code"><aside><h3>{heading}</h3><nav>{links}</nav></aside><section>{content}</section></div>"#,
        heading = encode_text(i18n.t(MessageKey::ProjectFiles)),
    )
}

fn render_preview_view(i18n: I18n, preview: Option<&str>) -> String {
    match preview {
        Some(html) => format!(
            r#"<iframe title="Project Preview" sandbox="allow-scripts" srcdoc="{}"></iframe>"#,
            encode_double_quoted_attribute(html)
        ),
        None => format!(
            r#"<div class="placeholder"><h3>{}</h3><p>{}</p></div>"#,
            encode_text(i18n.t(MessageKey::NoPreviewAvailable)),
            encode_text(i18n.t(MessageKey::NoIndexHtml)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::project::ProjectFile;

    fn context<'a>(result: ResultArea<'a>, uploads: &'a [UploadedFile]) -> PageContext<'a> {
        PageContext {
            i18n: I18n::default(),
            prompt: "",
            language: "",
            uploads,
            notice: None,
            result,
        }
    }

    fn hello_view() -> ProjectView {
        ProjectView::new(vec![
            ProjectFile::new(
                "index.html",
                r#"<html><body><script src="./app.js"></script></body></html>"#,
            ),
            ProjectFile::new("app.js", "alert('hello')"),
        ])
    }

    #[test]
    fn test_empty_state_shows_placeholder() {
        let html = render_page(&context(ResultArea::Empty, &[]));
        assert!(html.contains("Project preview will appear here"));
        assert!(html.contains(">Generate Project</button>"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_loading_disables_submit_and_refreshes() {
        let html = render_page(&context(ResultArea::Loading { tick: 1 }, &[]));
        assert!(html.contains(r#"class="submit" disabled>Generating...</button>"#));
        assert!(html.contains("Brewing fresh code..."));
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let html = render_page(&context(ResultArea::Failed("bad <json>"), &[]));
        assert!(html.contains("bad &lt;json&gt;"));
        assert!(html.contains("<strong>Error</strong>"));
    }

    #[test]
    fn test_uploads_are_listed_with_remove_forms() {
        let uploads = vec![UploadedFile::new("notes \"v2\".md", "x")];
        let html = render_page(&context(ResultArea::Empty, &uploads));
        assert!(html.contains(r#"name="name" value="notes &quot;v2&quot;.md""#));
        assert!(html.contains("action=\"/uploads/remove\""));
    }

    #[test]
    fn test_code_view_lists_files_and_escapes_content() {
        let view = ProjectView::new(vec![
            ProjectFile::new("index.html", "<p>hi</p>"),
            ProjectFile::new("src/my app.js", "x"),
        ]);
        let html = render_page(&context(ResultArea::Project(&view), &[]));

        assert!(html.contains("&lt;p&gt;hi&lt;/p&gt;"));
        assert!(html.contains("href=\"?tab=code&file=src%2Fmy%20app.js\""));
        assert!(html.contains("id=\"copy\""));
    }

    #[test]
    fn test_preview_tab_renders_sandboxed_iframe() {
        let mut view = hello_view();
        assert!(view.set_tab(Tab::Preview));
        let html = render_page(&context(ResultArea::Project(&view), &[]));

        assert!(html.contains(r#"sandbox="allow-scripts""#));
        assert!(html.contains("srcdoc=\"&lt;html&gt;"));
        assert!(html.contains("alert('hello')"));
    }

    #[test]
    fn test_preview_tab_disabled_without_index() {
        let view = ProjectView::new(vec![ProjectFile::new("main.py", "print(1)")]);
        let html = render_page(&context(ResultArea::Project(&view), &[]));

        assert!(html.contains(r#"<span class="disabled" aria-disabled="true">Live Preview</span>"#));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_no_preview_message() {
        let html = render_preview_view(I18n::default(), None);
        assert!(html.contains("Live Preview Not Available"));
    }

    #[test]
    fn test_page_uses_locale() {
        let mut ctx = context(ResultArea::Empty, &[]);
        ctx.i18n = I18n::new(Locale::ZhTw);
        ctx.notice = Some("請填寫專案描述和語言/框架。");
        let html = render_page(&ctx);

        assert!(html.contains(r#"<html lang="zh-TW">"#));
        assert!(html.contains("AI 程式碼架構師"));
        assert!(html.contains(r#"role="alert">請填寫專案描述和語言/框架。"#));
    }
}
