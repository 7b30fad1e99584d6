//! mdp - render markdown documents to HTML.
//!
//! This binary provides the CLI interface to the mdpreview library,
//! reading markdown from files or stdin.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use std::io::{self, IsTerminal, Read, Write};

use mdpreview_config::Config;
use mdpreview_core::{MdPreviewError, Result};
use mdpreview_render::{standalone, RenderFeatures, Renderer};

fn main() {
    let cli = <Cli as ClapParser>::parse();

    if cli.show_paths {
        cli::show_paths();
        return;
    }

    setup_logging(&cli.log_level);
    info!("mdpreview v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let renderer = Renderer::with_features(create_features(cli, &config));
    debug!("Render features: {:?}", renderer.features());

    let fragment = render_inputs(cli, &renderer)?;

    let html = if cli.standalone {
        let title = cli.title.as_deref().unwrap_or(&config.output.title);
        standalone(&fragment, title)
    } else {
        format!("{}\n", fragment)
    };

    write_output(cli, &html)
}

/// Load configuration and apply the `--config` override.
///
/// An unreadable config file or override aborts the run.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_with_override(cli.config.as_deref())?;
    if cli.config.is_some() {
        debug!("Merged config override");
    }
    Ok(config)
}

/// Create render features from the config and CLI switches.
fn create_features(cli: &Cli, config: &Config) -> RenderFeatures {
    let mut features = RenderFeatures::from_config(config);

    if cli.no_images {
        features.images = false;
    }
    if cli.no_links {
        features.links = false;
    }
    if cli.no_tables {
        features.tables = false;
    }

    features
}

/// Render every input independently and join the fragments.
fn render_inputs(cli: &Cli, renderer: &Renderer) -> Result<String> {
    if cli.should_read_stdin() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(MdPreviewError::Input(
                "no input files given and stdin is a terminal".into(),
            ));
        }
        info!("Reading from stdin");
        let mut markdown = String::new();
        stdin.lock().read_to_string(&mut markdown)?;
        return Ok(renderer.render(&markdown));
    }

    let mut fragments = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        info!("Processing file: {}", path.display());
        let markdown = std::fs::read_to_string(path)?;
        fragments.push(renderer.render(&markdown));
    }

    Ok(fragments.join("\n"))
}

/// Write the HTML to `--output` or stdout.
fn write_output(cli: &Cli, html: &str) -> Result<()> {
    match cli.output {
        Some(ref path) => {
            std::fs::write(path, html)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
