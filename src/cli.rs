//! Command-line interface for mdpreview.

use clap::Parser;
use std::path::PathBuf;

/// mdp - render markdown documents to HTML.
///
/// Each input is converted to an HTML fragment; pass `--standalone` to get
/// a complete page instead.
#[derive(Parser, Debug)]
#[command(
    name = "mdp",
    author = "DevToolkit Contributors",
    version,
    about = "Render markdown to HTML",
    after_help = "Examples:\n  \
                  cat README.md | mdp\n  \
                  mdp notes.md -o notes.html --standalone\n  \
                  mdp -c custom.toml --no-tables doc.md"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Write the HTML to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Wrap the output in a complete HTML document
    #[arg(long = "standalone")]
    pub standalone: bool,

    /// Title for --standalone (defaults to the configured title)
    #[arg(long = "title", requires = "standalone")]
    pub title: Option<String>,

    /// Leave image syntax as text
    #[arg(long = "no-images")]
    pub no_images: bool,

    /// Leave link syntax as text
    #[arg(long = "no-links")]
    pub no_links: bool,

    /// Leave pipe tables as text
    #[arg(long = "no-tables")]
    pub no_tables: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }
}

/// Show paths information.
pub fn show_paths() {
    use mdpreview_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
