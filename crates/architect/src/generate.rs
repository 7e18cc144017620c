use crate::config::ApiOptions;
use crate::prelude::{eprintln, println, *};
use architect_core::i18n::{I18n, MessageKey};
use architect_core::intake::UploadSet;
use architect_core::preview::compose_preview;
use architect_core::project::{find_file, ProjectFile};
use architect_core::prompt::GenerationRequest;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// How long each loader message stays on screen.
const LOADER_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "Generate a project from a natural-language description")]
pub struct App {
    /// Natural-language description of the project
    pub prompt: String,

    /// Primary language or framework (e.g. "React with TypeScript")
    #[arg(short, long)]
    pub language: String,

    /// Context files to send along with the description
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    #[clap(flatten)]
    pub api: ApiOptions,

    /// Output the generated project as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the content of one generated file
    #[arg(long, value_name = "PATH")]
    pub show: Option<String>,

    /// Copy the content of one generated file to the clipboard
    #[arg(long, value_name = "PATH")]
    pub copy: Option<String>,

    /// Print the self-contained preview HTML built from index.html
    #[arg(long)]
    pub preview: bool,
}

/// Spinner cycling through the loader messages while a request is pending.
struct Loader {
    spinner: ProgressBar,
    ticker: tokio::task::JoinHandle<()>,
}

impl Loader {
    fn start(i18n: I18n) -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(loader_text(i18n, 0));

        let ticker = tokio::spawn({
            let spinner = spinner.clone();
            async move {
                let mut interval = tokio::time::interval(LOADER_INTERVAL);
                // The first tick completes immediately.
                interval.tick().await;

                let mut tick = 0;
                loop {
                    interval.tick().await;
                    tick += 1;
                    spinner.set_message(loader_text(i18n, tick));
                }
            }
        });

        Ok(Self { spinner, ticker })
    }

    fn finish(self) {
        self.ticker.abort();
        self.spinner.finish_and_clear();
    }
}

fn loader_text(i18n: I18n, tick: usize) -> String {
    format!(
        "{} {}",
        i18n.loader_message(tick),
        i18n.t(MessageKey::LoaderWait).dimmed()
    )
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let i18n = global.i18n();
    let config = app.api.clone().resolve()?;

    // Step 1: File I/O - Read uploads
    let mut uploads = UploadSet::new();
    let added = crate::intake::intake(&mut uploads, &app.files).await?;

    if global.verbose {
        eprintln!("Endpoint: {}", config.endpoint());
        eprintln!("Uploaded files: {}", added);
    }

    // Step 2: Pure transformation - Validate the request
    let request = GenerationRequest::new(app.prompt.as_str(), app.language.as_str(), uploads.take())
        .map_err(|_| eyre!("{}", i18n.t(MessageKey::FormAlert)))?;

    // Step 3: Network I/O - Single generation call
    let client = crate::gemini::create_client()?;
    let loader = Loader::start(i18n)?;
    let outcome = crate::gemini::generate_project_data(&client, &config, &request).await;
    loader.finish();

    let files = outcome.map_err(|e| eyre!("{}: {}", i18n.t(MessageKey::ErrorTitle), e))?;

    // Step 4: Output
    if app.json {
        let json = serde_json::to_string_pretty(&files)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        print_listing(&files, i18n);
    }

    if let Some(path) = &app.show {
        let file = find_file(&files, path).ok_or_else(|| Error::UnknownFile(path.clone()))?;
        println!("{}", file.content);
    }

    if app.preview {
        print_preview(&files, i18n);
    }

    if let Some(path) = &app.copy {
        match find_file(&files, path) {
            Some(file) => {
                crate::clipboard::copy_best_effort(&file.content, i18n);
            }
            None => {
                log::warn!("{}", Error::UnknownFile(path.clone()));
                eprintln!("{}", i18n.t(MessageKey::CopyFail).red());
            }
        }
    }

    Ok(())
}

fn print_listing(files: &[ProjectFile], i18n: I18n) {
    println!(
        "\n{} ({}):\n",
        i18n.t(MessageKey::ProjectFiles).bold(),
        files.len()
    );

    let mut table = new_table();
    table.add_row(prettytable::row!["PATH".bold(), "BYTES".bold(), "LINES".bold()]);
    for file in files {
        table.add_row(prettytable::row![
            file.path.cyan(),
            file.content.len(),
            file.content.lines().count()
        ]);
    }
    table.printstd();

    let preview_state = if compose_preview(files).is_some() {
        i18n.t(MessageKey::LivePreviewTab).green()
    } else {
        i18n.t(MessageKey::NoPreviewAvailable).yellow()
    };
    eprintln!("\n{}", preview_state);
}

fn print_preview(files: &[ProjectFile], i18n: I18n) {
    match compose_preview(files) {
        Some(html) => println!("{}", html),
        None => {
            eprintln!("{}", i18n.t(MessageKey::NoPreviewAvailable).yellow().bold());
            eprintln!("{}", i18n.t(MessageKey::NoIndexHtml));
        }
    }
}
