use crate::prelude::*;
use architect_core::i18n::I18n;
use clap::Parser;

mod clipboard;
mod config;
mod error;
mod gemini;
mod generate;
mod intake;
mod prelude;
mod preview;
mod serve;
#[cfg(test)]
mod testing;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate entire codebases from a single prompt and preview them locally"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Interface language (en, zh-TW). Defaults to the system locale.
    #[clap(long, env = "ARCHITECT_LOCALE", global = true)]
    locale: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "ARCHITECT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Localization context for this run, resolved once.
    pub fn i18n(&self) -> I18n {
        I18n::new(config::resolve_locale(self.locale.as_deref()))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate a project from a natural-language description
    Generate(crate::generate::App),

    /// Compose the previewable HTML of a generated project
    Preview(crate::preview::App),

    /// Start the local web UI
    Serve(crate::serve::App),
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().filter_or("ARCHITECT_LOG", default_level);

    env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    init_logger(app.global.verbose);

    match app.command {
        SubCommands::Generate(sub_app) => crate::generate::run(sub_app, app.global).await,
        SubCommands::Preview(sub_app) => crate::preview::run(sub_app, app.global).await,
        SubCommands::Serve(sub_app) => crate::serve::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
