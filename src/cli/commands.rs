use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{debug, info};

use flowview::config::FlowviewConfig;
use flowview::engine::{attachment, ResultView};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a flow scanner report
    Show(ShowArgs),

    /// Show a report and search it interactively
    Explore(ExploreArgs),

    /// Initialize a .flowview.toml config file in the current directory
    Init,
}

#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Record directory, payload file, or "-" for stdin
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// File name of the report attachment inside a record directory
    #[arg(long)]
    pub attachment: Option<String>,

    /// Ignore .flowview.toml config files
    #[arg(long)]
    pub no_config: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only show rows containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format: "terminal" or "json"
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write report to file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Settings resolved from the config file and CLI flags
pub struct Settings {
    pub config: FlowviewConfig,
    pub attachment_name: String,
}

impl Settings {
    pub fn resolve(source: &SourceArgs) -> Result<Self> {
        let config = if source.no_config {
            FlowviewConfig::default()
        } else {
            let cwd = std::env::current_dir()?;
            FlowviewConfig::load(&cwd).unwrap_or_default()
        };

        let attachment_name = source
            .attachment
            .clone()
            .unwrap_or_else(|| config.attachment.name.clone());

        Ok(Settings {
            config,
            attachment_name,
        })
    }
}

/// Fetch the raw payload named by `path`. `None` when a record directory has
/// no report attachment.
fn fetch_payload(path: &Path, attachment_name: &str) -> Result<Option<String>> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read payload from stdin")?;
        return Ok(Some(raw));
    }

    if path.is_dir() {
        return match attachment::find_attachment(path, attachment_name)? {
            Some(found) => attachment::read_payload(&found).map(Some),
            None => {
                info!(
                    "No {} attachment in {}",
                    attachment_name,
                    path.display()
                );
                Ok(None)
            }
        };
    }

    attachment::read_payload(path).map(Some)
}

/// Load the report named by `source` into a fresh view.
///
/// A missing attachment or an undecodable payload yields an empty view.
pub fn load_view(source: &SourceArgs, settings: &Settings) -> Result<ResultView> {
    let mut view = ResultView::new();

    if let Some(raw) = fetch_payload(&source.path, &settings.attachment_name)? {
        if let Err(e) = view.load_payload(&raw) {
            debug!("Payload rejected: {}", e);
        }
    }

    Ok(view)
}
