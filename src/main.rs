use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use storefront::app::open_theme_store;
use storefront::config::LOG_FILE_NAME;
use storefront::products::ProductClient;
use storefront::theme::{Projector, RenderEnvironment, RequestOutcome};
use storefront::{App, Config, ThemeStore};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product endpoint to use instead of the configured one
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available themes
    Themes,
    /// Switch to a theme and save the choice
    Use {
        /// Theme identifier, e.g. theme2
        id: String,
    },
    /// Print the style variables of the active theme
    Css,
    /// Fetch and list products
    Products,
}

/// Non-blocking writer appending to `<dir>/storefront.log`
///
/// Events are written by a background thread until the guard is dropped.
fn log_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {:?}", dir))?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging() -> Result<WorkerGuard> {
    let data_dir = Config::data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;
    let (writer, guard) = log_writer(&data_dir)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "storefront=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Ok(guard)
}

/// Request a theme and commit it without waiting for the settle interval
fn use_theme(store: &mut ThemeStore, id: &str) -> Result<String> {
    if !store.catalog().contains(id) {
        let available: Vec<&str> =
            store.catalog().list().iter().map(|theme| theme.id.as_str()).collect();
        bail!("Unknown theme: {} (available: {})", id, available.join(", "));
    }

    let message = match store.request_theme(id)? {
        RequestOutcome::Unchanged => format!("Already using {}", store.configuration().name),
        _ => {
            store.finish_pending();
            format!("Theme set to {}", store.configuration().name)
        }
    };
    Ok(message)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flushes buffered log lines when main returns
    let _log_guard = match init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    let mut config = Config::load();
    config.apply_api_url_override(cli.api_url);

    match cli.command {
        Some(Commands::Themes) => {
            let store = open_theme_store(&config);
            for theme in store.catalog().list() {
                let marker = if &theme.id == store.current_id() { "*" } else { " " };
                println!("{} {:<8} {:<10} {}", marker, theme.id, theme.name, theme.layout.description());
            }
        }
        Some(Commands::Use { id }) => {
            let mut store = open_theme_store(&config);
            println!("{}", use_theme(&mut store, &id)?);
        }
        Some(Commands::Css) => {
            let mut store = open_theme_store(&config);
            let env = Rc::new(RefCell::new(RenderEnvironment::new()));
            Projector::attach(&mut store, Rc::clone(&env));
            let env = env.borrow();
            println!("/* {} */", env.title());
            println!("{}", env.to_css());
        }
        Some(Commands::Products) => {
            let client = ProductClient::new(&config.product_api_url)?;
            let products = client.fetch_products().await?;
            for product in &products {
                println!(
                    "{:>3}  {:>9}  {}  {}",
                    product.id,
                    product.display_price(),
                    product.stars(),
                    product.title
                );
            }
            println!("{} products from {}", products.len(), client.endpoint());
        }
        None => {
            // Launch TUI
            let mut app = App::new(config)?;
            if let Err(e) = app.run().await {
                tracing::error!("Storefront exited with error: {:#}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
