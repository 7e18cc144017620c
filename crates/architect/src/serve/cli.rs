use crate::config::ApiOptions;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Start the local web UI")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "ARCHITECT_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "ARCHITECT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Project JSON to show on startup (read only)
    #[arg(long, value_name = "FILE")]
    pub project: Option<PathBuf>,

    #[clap(flatten)]
    pub api: ApiOptions,
}
