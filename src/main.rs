mod clipboard;
mod config;
mod controller;
mod document;
mod highlight;
mod ingest;
mod render;
mod view;

use clap::Parser;
use config::RcLoader;
use controller::ViewerController;
use document::Document;
use ingest::ingest_transcript;
use render::render_document;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowdoc", about = "Terminal viewer for flow copilot documents")]
struct Cli {
    /// Document to view: a JSON node tree, or raw transcript text
    file: PathBuf,

    /// Treat the input as transcript text even if the file ends in .json
    #[arg(long)]
    text: bool,

    /// JSON file mapping workflow node ids to display names
    #[arg(long, value_name = "FILE")]
    names: Option<PathBuf>,

    /// Print the rendered document to stdout and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = RcLoader::load_config();

    let names: HashMap<String, String> = match &cli.names {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => HashMap::new(),
    };

    let content = fs::read_to_string(&cli.file)?;
    let as_tree = !cli.text && cli.file.extension().is_some_and(|ext| ext == "json");
    let document = if as_tree {
        Document::from_json_str(&content)?
    } else {
        ingest_transcript(&content, &|id| names.get(id).cloned())
    };

    if cli.dump {
        for line in &render_document(&document).lines {
            println!("{}", line.text());
        }
        return Ok(());
    }

    let display_name = cli
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("[No Name]")
        .to_string();

    let controller = ViewerController::new(document, &config, display_name);
    controller.run()
}
