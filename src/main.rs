use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use oophub::core::config::{self, CliOverrides, HubConfig};
use oophub::core::content::{ContentStore, Entry};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "oophub", about = "Java OOP learning hub for the terminal")]
struct Args {
    /// Topic to open first (a topic key, or "glossary")
    #[arg(short, long)]
    topic: Option<String>,

    /// Content file to load instead of the bundled course
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Syntax highlighting theme
    #[arg(long)]
    theme: Option<String>,

    /// Draw diagrams with plain ASCII
    #[arg(long)]
    ascii: bool,

    /// Print the topic keys and exit
    #[arg(long)]
    list_topics: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to oophub.log in current directory.
    // Must precede load_config; the configured level is applied after resolve.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("oophub.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let (file_config, config_error) = match config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (HubConfig::default(), Some(e)),
    };
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {e}");
    }
    let cli = CliOverrides {
        topic: args.topic,
        content: args.content,
        theme: args.theme,
        ascii: args.ascii,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::set_max_level(resolved.log_filter());
    log::info!("oophub starting up");

    let loaded = match &resolved.content_file {
        Some(path) => ContentStore::load(path),
        None => ContentStore::bundled(),
    };
    let store = match loaded {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Content failed to load: {e}");
            eprintln!("oophub: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} topics and the glossary",
        store.topics().len()
    );

    if args.list_topics {
        for selection in store.selections() {
            let title = match store.entry(selection) {
                Entry::Topic(record) => &record.title,
                Entry::Glossary(glossary) => &glossary.title,
            };
            println!("{:<16}{}", store.key_of(selection), title);
        }
        return Ok(());
    }

    oophub::tui::run(resolved, store)
}
