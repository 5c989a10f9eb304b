use anyhow::{anyhow, Context};
use clap::Parser;
use np_client::{ClientConfig, HttpNewsApi, MemoryNewsApi};
use np_core::{NavigationState, NewsApi, NewsFilter, PageKind};
use np_nav::{load_menu, load_page, NavigationController, DEFAULT_PAGE_SIZE};
use np_render::date::format_short;
use np_render::labels::{category_label, source_label, UNKNOWN_SOURCE};
use np_render::{render, render_document, render_error, Masthead};
use np_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod browse;
mod logging;

use browse::TextContainer;

#[derive(Parser, Debug)]
#[command(author, version, about = "News portal front end", long_about = None)]
pub struct Cli {
    /// Base URL of the article API
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Portal to ask for the API location via /api/config
    #[arg(long, global = true)]
    portal_url: Option<String>,
    /// Serve articles from a JSON file instead of the API
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,
    #[arg(long, env = "NP_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    page_size: usize,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 15, global = true)]
    timeout: u64,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the portal over HTTP
    Serve {
        #[arg(long, env = "NP_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Render one page to stdout
    Render {
        #[arg(long, default_value = "main")]
        page: PageKind,
        /// Category key, source key or article id
        #[arg(long = "type")]
        key: Option<String>,
        #[arg(long)]
        query: Option<String>,
        /// Narrow the main page to a category
        #[arg(long)]
        category: Option<String>,
        /// Narrow the main page to a source
        #[arg(long)]
        source: Option<String>,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Print the full HTML document instead of text
        #[arg(long)]
        html: bool,
    },
    /// List the latest news
    Latest,
    /// Browse the portal interactively
    Browse {
        /// Keep the last search in this file between runs
        #[arg(long)]
        session_file: Option<PathBuf>,
        /// Location to start at, e.g. "?page=category&type=tech"
        #[arg(default_value = "?page=main")]
        location: String,
    },
    /// List the categories the backend knows about
    Categories,
    /// List the sources the backend knows about
    Sources,
}

/// The article backend and the host browsers should be pointed at.
async fn create_api(cli: &Cli) -> anyhow::Result<(Arc<dyn NewsApi>, Option<String>)> {
    if let Some(path) = &cli.fixtures {
        let api = MemoryNewsApi::from_file(path)
            .await
            .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
        info!("📰 Serving {} articles from {}", api.len(), path.display());
        return Ok((Arc::new(api), None));
    }

    let config = ClientConfig::resolve(cli.api_url.as_deref(), cli.portal_url.as_deref())
        .await?
        .with_timeout(Duration::from_secs(cli.timeout));
    let site_host = config.base_url.to_string();
    info!("🌐 Using article API at {}", site_host);
    Ok((Arc::new(HttpNewsApi::new(config)?), Some(site_host)))
}

async fn print_page(
    api: &dyn NewsApi,
    state: NavigationState,
    page_size: usize,
    html: bool,
) -> anyhow::Result<()> {
    let (fragment, failure) = match load_page(api, &state, page_size).await {
        Ok(view) => (render(&view), None),
        Err(e) => (render_error(&state, &e), Some(e)),
    };

    if html {
        let menu = load_menu(api).await;
        println!("{}", render_document(&state, &menu, &Masthead::today(), &fragment));
    } else {
        println!("{}", fragment.to_text());
    }

    match failure {
        Some(e) => Err(anyhow!(e).context(format!("Failed to load {}", state))),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_for(cli.verbose, cli.quiet));
    let page_size = cli.page_size.max(1);
    let (api, site_host) = create_api(&cli).await?;

    match cli.command {
        Commands::Serve { bind } => {
            let site_host = site_host.unwrap_or_else(|| format!("http://{}", bind));
            let state = AppState::new(api, site_host).with_page_size(page_size);
            np_web::serve(state, bind).await?;
        }
        Commands::Render {
            page,
            key,
            query,
            category,
            source,
            offset,
            html,
        } => {
            let state = NavigationState::for_page(page, key.as_deref(), query.as_deref())
                .ok_or_else(|| anyhow!("--page {} needs --type or --query", page))?
                .with_filter(NewsFilter::new(category.as_deref(), source.as_deref()))
                .with_offset(offset);
            print_page(api.as_ref(), state, page_size, html).await?;
        }
        Commands::Latest => {
            for article in api.fetch_latest_news().await? {
                let source = article.source.as_deref().map(source_label).unwrap_or(UNKNOWN_SOURCE);
                println!(
                    "{}  {}  ({})  [{}]",
                    format_short(article.publication_date.as_ref()),
                    article.title,
                    source,
                    article.id
                );
            }
        }
        Commands::Browse { session_file, location } => {
            let kind = if session_file.is_some() { "file" } else { "memory" };
            let sessions = np_storage::create_store(kind, session_file)?;
            let container = Arc::new(TextContainer::stdout());
            let controller = NavigationController::new(api, sessions, container).with_page_size(page_size);
            browse::run(&controller, &location).await?;
        }
        Commands::Categories => {
            for key in api.fetch_categories().await? {
                println!("{:<12} {}", key, category_label(&key));
            }
        }
        Commands::Sources => {
            for key in api.fetch_sources().await? {
                println!("{:<12} {}", key, source_label(&key));
            }
        }
    }

    Ok(())
}
