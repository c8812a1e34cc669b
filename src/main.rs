use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Build a static site from a tree of Markdown files")]
struct Cli {
    /// Config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "sitegen.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and generate every page
    Build {
        /// Prefix for root-relative links (overrides the config)
        base_path: Option<String>,

        /// Project root containing content, static and the template
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a single Markdown file to an HTML fragment
    Render {
        /// Input Markdown file
        input: PathBuf,

        /// Output HTML file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = sitegen::Config::load(&cli.config);

    match cli.command {
        Command::Build {
            base_path,
            root,
            output,
        } => {
            if let Some(base_path) = base_path {
                config.site.base_path = base_path;
            }
            if let Some(output) = output {
                config.paths.output_dir = output;
            }

            match sitegen::build_site(&root, &config) {
                Ok(summary) => log::info!(
                    "Copied {} static files and generated {} pages",
                    summary.files_copied,
                    summary.pages_generated
                ),
                Err(e) => {
                    log::error!("Site build failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Render { input, output } => {
            let markdown = match fs::read_to_string(&input) {
                Ok(content) => content,
                Err(e) => {
                    log::error!("Error reading {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };

            let html = match sitegen::markdown_to_html_with(&markdown, &config.render_options()) {
                Ok(html) => html,
                Err(e) => {
                    log::error!("Error converting {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };

            match output {
                Some(output) => {
                    if let Err(e) = fs::write(&output, html) {
                        log::error!("Error writing {}: {}", output.display(), e);
                        std::process::exit(1);
                    }
                    log::info!("Created {}", output.display());
                }
                None => println!("{html}"),
            }
        }
    }
}
