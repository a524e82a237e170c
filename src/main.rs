extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use reelcache::{
    config::{build_config, AppConfig, EnvSource},
    downloader::{Downloader, FetchResult},
    entry::CacheEntry,
    http::{HttpClient, HttpService},
    platform::{instagram::extract_instagram_url, PlatformRegistry},
    preview::{Preview, PreviewService},
    storage::{FsStore, MediaStore},
};

/// Resolve Instagram posts and cache their media in a notes vault.
#[derive(Parser, Debug)]
#[command(name = "reelcache", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved post as JSON.
    Resolve {
        /// Post URL, or any text containing one.
        url: String,
    },

    /// Download a post's media into the vault and print its cache block.
    Fetch {
        url: String,

        /// Vault-relative target folder (default: from REELS_LOCATION_MODE).
        #[arg(short, long)]
        dir: Option<String>,

        /// Download again even when the files exist.
        #[arg(short, long)]
        force: bool,
    },

    /// Run the code block flow on a block read from a file.
    Preview { file: PathBuf },
}

struct App {
    config: AppConfig,
    registry: Arc<PlatformRegistry>,
    downloader: Downloader,
}

impl App {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let http: Arc<dyn HttpClient> = Arc::new(HttpService::new(&config.http).context("Failed to build http client")?);
        let registry = Arc::new(PlatformRegistry::new(&config.instagram, Arc::clone(&http)));
        let store: Arc<dyn MediaStore> = Arc::new(FsStore::new(config.storage.vault_root.clone()));
        let downloader = Downloader::new(Arc::clone(&registry), http, store);

        Ok(Self {
            config,
            registry,
            downloader,
        })
    }
}

fn find_url(text: &str) -> String {
    extract_instagram_url(text).unwrap_or_else(|| text.trim().to_string())
}

async fn resolve(app: &App, text: &str) -> anyhow::Result<ExitCode> {
    let url = find_url(text);
    let platform = app.registry.platform_for_url(&url)?;
    let post = platform.resolve(&url).await?;

    println!("{}", serde_json::to_string_pretty(&post)?);
    Ok(ExitCode::SUCCESS)
}

async fn fetch(app: &App, text: &str, dir: Option<String>, force: bool) -> anyhow::Result<ExitCode> {
    let url = find_url(text);
    let dir = dir.unwrap_or_else(|| app.config.storage.media_folder());

    match app.downloader.fetch_and_cache(&url, &dir, force).await {
        FetchResult::Success(post) => {
            println!("{}", CacheEntry::from_fetched(&url, &post).to_fenced());
            Ok(ExitCode::SUCCESS)
        }
        FetchResult::Failure(failure) => {
            eprintln!("{}: {}", failure.kind, failure.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn preview(app: &App, file: &Path) -> anyhow::Result<ExitCode> {
    let source = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let service = PreviewService::new(app.downloader.clone(), app.config.storage.clone());

    let code = match service.load(&source).await {
        Preview::Card { entry, needs_store } => {
            if needs_store {
                println!("{}", entry.to_fenced());
            } else {
                println!("{}", entry.to_block());
            }
            ExitCode::SUCCESS
        }
        Preview::LinkOnly(url) => {
            println!("{}", url);
            ExitCode::SUCCESS
        }
        Preview::NotFound(url) => {
            eprintln!("Cannot find reel {}", url);
            ExitCode::FAILURE
        }
        Preview::MultipleUrls(_) => {
            eprintln!("Cannot accept multiple URLs yet");
            ExitCode::FAILURE
        }
    };

    Ok(code)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = pretty_env_logger::try_init_timed();

    let cli = Cli::parse();

    info!("Building app...");
    let config = build_config(&EnvSource)?;
    let app = App::new(config)?;

    match cli.command {
        Command::Resolve { url } => resolve(&app, &url).await,
        Command::Fetch { url, dir, force } => fetch(&app, &url, dir, force).await,
        Command::Preview { file } => preview(&app, &file).await,
    }
}
