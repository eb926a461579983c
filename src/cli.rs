//! CLI command definitions and handlers

use crate::document::{Document, Workspace};
use crate::report::{report, shape, OutputFormat};
use crate::scan::scan;
use crate::session::{MessageServer, Session};
use crate::settings::SettingsStore;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Compcensus - component usage census for design documents
#[derive(Parser, Debug)]
#[command(name = "compcensus")]
#[command(
    version,
    about = "Count component usage and map component dependencies in a design document snapshot",
    after_help = "\
Examples:
  compcensus scan document.json                 Census of the first page
  compcensus scan document.json --node 12:7     Census of one subtree
  compcensus scan document.json --ignore Drafts --format json
  compcensus serve document.json                Interactive message session over stdio"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One-shot scan of a document snapshot
    Scan {
        /// Path to the document snapshot (JSON)
        document: PathBuf,

        /// Scan this node's subtree instead of the first page
        #[arg(long, value_name = "NODE_ID")]
        node: Option<String>,

        /// Section/frame name to exclude (repeatable)
        #[arg(long = "ignore", value_name = "NAME")]
        ignore: Vec<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Interactive session: line-delimited JSON messages over stdio
    Serve {
        /// Path to the document snapshot (JSON)
        document: PathBuf,

        /// Settings database path (default: .compcensus/settings.redb
        /// next to the document)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            document,
            node,
            ignore,
            format,
        } => run_scan(&document, node.as_deref(), &ignore, &format),
        Commands::Serve { document, store } => run_serve(&document, store),
    }
}

fn run_scan(document: &Path, node: Option<&str>, ignore: &[String], format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let doc = Document::load(document)?;

    let root = match node {
        Some(id) => doc
            .node(id)
            .ok_or_else(|| anyhow!("no node with id {id} in {}", document.display()))?,
        None => doc
            .first_page()
            .ok_or_else(|| anyhow!("document has no pages"))?,
    };
    if !root.is_container() {
        return Err(anyhow!("node {} has no children to scan", root.id));
    }

    let aggregate = scan(&doc, root, ignore);
    let records = shape(&doc, &aggregate, ignore);
    println!("{}", report(&records, format)?);
    Ok(())
}

fn run_serve(document: &Path, store: Option<PathBuf>) -> Result<()> {
    let doc = Document::load(document)?;
    let workspace = Workspace::new(doc)?;

    let store_path = store.unwrap_or_else(|| default_store_path(document));
    let settings = SettingsStore::open(&store_path)
        .with_context(|| format!("failed to open settings store {}", store_path.display()))?;

    let session = Session::new(workspace, settings);
    MessageServer::new(session).run()
}

/// Settings live next to the document they belong to
fn default_store_path(document: &Path) -> PathBuf {
    let dir = document.parent().unwrap_or_else(|| Path::new("."));
    dir.join(".compcensus").join("settings.redb")
}
