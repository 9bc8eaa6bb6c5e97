//! Quill CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "Quill template renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template with data
    Render {
        /// Template file path (or template text with --inline)
        input: String,

        /// Treat INPUT as template text
        #[arg(long, conflicts_with = "relative")]
        inline: bool,

        /// Treat INPUT as a name under the template root
        #[arg(long)]
        relative: bool,

        /// TOML configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Template root for relative names (overrides the config file)
        #[arg(long)]
        root: Option<PathBuf>,

        /// JSON file whose top-level object is assigned to the template
        #[arg(short = 'd', long)]
        data: Option<PathBuf>,

        /// Template variable (KEY:VALUE)
        #[arg(short = 'v', long = "var")]
        variables: Vec<String>,

        /// Text placed before the rendered output
        #[arg(long)]
        prepend: Vec<String>,

        /// Text placed after the rendered output
        #[arg(long)]
        append: Vec<String>,

        /// Layout template file the rendered output is placed into
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Layout variable that receives the rendered output
        #[arg(long, default_value = "content")]
        slot: String,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            inline,
            relative,
            config,
            root,
            data,
            variables,
            prepend,
            append,
            layout,
            slot,
            output,
        } => commands::render::execute(commands::render::RenderArgs {
            input,
            inline,
            relative,
            config,
            root,
            data,
            variables,
            prepend,
            append,
            layout,
            slot,
            output,
        }),
    }
}
