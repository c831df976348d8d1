//! docbridge playground
//!
//! Drives the editor stack from the command line against a running content
//! service:
//!   docbridge-playground upload ./cat.png
//!   docbridge-playground edit --doc ./draft.json --read-only

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docbridge_playground::{EditOptions, Playground, PlaygroundConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "docbridge-playground")]
#[command(about = "Headless playground for the docbridge editor stack")]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload an image to the content service
    Upload { path: PathBuf },
    /// List stored files
    Files,
    /// Delete a stored file
    Delete { id: String },
    /// List paragraph styles
    Styles,
    /// Mount the headless editor and print its snapshot
    Edit {
        /// Document to load (JSON)
        #[arg(long)]
        doc: Option<PathBuf>,
        #[arg(long)]
        read_only: bool,
        #[arg(long)]
        disabled: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = PlaygroundConfig::load(args.config.as_deref())?;
    let mut playground = Playground::new(config)?;

    match args.command {
        Command::Upload { path } => {
            let image = playground.upload_path(&path).await?;
            info!(id = %image.id, "Upload complete");
            print_json(&image)?;
        }
        Command::Files => {
            let files = playground.list_files().await?;
            print_json(&files)?;
        }
        Command::Delete { id } => {
            playground.delete_file(&id).await?;
            info!(id = %id, "Deleted");
        }
        Command::Styles => {
            let styles = playground.styles().await?;
            print_json(&styles)?;
        }
        Command::Edit {
            doc,
            read_only,
            disabled,
        } => {
            let document = match doc {
                Some(path) => {
                    let contents = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Some(serde_json::from_str(&contents).context("document is not JSON")?)
                }
                None => None,
            };
            let snapshot = playground.edit(EditOptions {
                document,
                read_only,
                disabled,
            })?;
            print_json(&snapshot)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
