mod cli;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::commands::{load_view, Settings};
use cli::Cli;
use flowview::config;
use flowview::report::{self, yaml::StructuredTextHelper};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("flowview=debug")
    } else if cli.quiet {
        EnvFilter::new("flowview=error")
    } else {
        EnvFilter::new("flowview=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    info!("flowview v{}", env!("CARGO_PKG_VERSION"));

    // Loaded once per process, before any structured-text rendering
    let helper = StructuredTextHelper::new();
    helper.ensure_loaded();

    match &cli.command {
        cli::Commands::Show(args) => {
            let settings = Settings::resolve(&args.source)?;
            let mut view = load_view(&args.source, &settings)?;

            if let Some(ref term) = args.search {
                view.search(term);
            }

            let format = args
                .format
                .as_deref()
                .unwrap_or(settings.config.output.format.as_str());

            match format {
                "json" => {
                    let output = report::json::render(&view)?;
                    if let Some(ref path) = args.out {
                        std::fs::write(path, &output)?;
                        info!("Report written to {}", path.display());
                    } else {
                        println!("{}", output);
                    }
                }
                _ => {
                    report::terminal::render(&view, &helper, &settings.config.output.empty_message);
                    if let Some(ref path) = args.out {
                        let json_output = report::json::render(&view)?;
                        std::fs::write(path, &json_output)?;
                        info!("JSON report also written to {}", path.display());
                    }
                }
            }
        }
        cli::Commands::Explore(args) => {
            let settings = Settings::resolve(&args.source)?;
            let mut view = load_view(&args.source, &settings)?;
            cli::explore::run_explore(&mut view, &helper, &settings.config.output.empty_message)?;
        }
        cli::Commands::Init => {
            let cwd = std::env::current_dir()?;
            if config::init_config(&cwd)? {
                println!("{} Created {}", "✅".bold(), config::CONFIG_FILE_NAME);
                println!("   Edit it to customize the viewer.");
            } else {
                println!("⚠️  {} already exists in this directory", config::CONFIG_FILE_NAME);
            }
        }
    }

    Ok(())
}
