//! Pasta House CLI - browse the catalog and manage an account from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! ph-cli products --search gnocchi --ordering -created_at
//! ph-cli product 12
//! ph-cli reviews 12
//!
//! # Account (set PASTA_HOUSE_TOKEN_FILE to stay signed in between runs)
//! ph-cli login --email ada@example.com --password '...'
//! ph-cli profile
//! ph-cli orders
//!
//! # Order two units of product 12 and one of product 3
//! ph-cli checkout --item 12:2 --item 3:1 \
//!     --name Ada --email ada@example.com --phone 555-0100 --address "1 Via Roma"
//! ```
//!
//! Configuration comes from the `PASTA_HOUSE_*` environment variables (see
//! [`ClientConfig`]). Logs go to stderr; `RUST_LOG` overrides the level.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pasta_house_core::{CategoryId, Email, OrderId, ProductId};
use pasta_house_storefront::tokens::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
use pasta_house_storefront::{ApiClient, ClientConfig, LogFormat, UserStore};

mod commands;

use commands::orders::ItemSpec;

#[derive(Parser)]
#[command(name = "ph-cli")]
#[command(author, version, about = "Pasta House storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Products {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to a category ID
        #[arg(short, long)]
        category: Option<i64>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// Sort field, `-` prefix for descending (e.g. `-rating`)
        #[arg(short, long, allow_hyphen_values = true)]
        ordering: Option<String>,
    },
    /// Show one product
    Product { id: i64 },
    /// Show the newest products
    Latest {
        #[arg(short, long)]
        count: Option<u32>,
    },
    /// List categories
    Categories,
    /// List tags
    Tags,
    /// Show reviews of a product
    Reviews {
        product_id: i64,

        #[arg(long)]
        page: Option<u32>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: Email,

        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: Email,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget stored tokens
    Logout,
    /// Show the signed-in user's profile
    Profile,
    /// List the signed-in user's orders
    Orders,
    /// Cancel an order
    CancelOrder { id: i64 },
    /// Order products
    Checkout {
        /// `PRODUCT_ID:QUANTITY`, repeatable
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemSpec>,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Email,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        address: String,

        #[arg(long, default_value = "")]
        note: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    init_tracing(config.as_ref().map_or(LogFormat::default(), |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the global subscriber. Defaults to `info` if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// File-backed tokens when a token file is configured, in-memory otherwise.
fn open_token_store(config: &ClientConfig) -> Result<Arc<dyn TokenStore>, TokenStoreError> {
    match &config.token_file {
        Some(path) => Ok(Arc::new(FileTokenStore::open(path)?)),
        None => Ok(Arc::new(MemoryTokenStore::new())),
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::new(config, open_token_store(config)?)?;
    let mut store = UserStore::new(api);

    match cli.command {
        Commands::Products {
            search,
            category,
            page,
            limit,
            ordering,
        } => {
            let query = pasta_house_storefront::models::ProductQuery {
                page,
                limit,
                search,
                category: category.map(CategoryId::new),
                ordering,
                ..Default::default()
            };
            commands::catalog::products(store.api(), &query).await?;
        }
        Commands::Product { id } => commands::catalog::product(store.api(), ProductId::new(id)).await?,
        Commands::Latest { count } => commands::catalog::latest(store.api(), count).await?,
        Commands::Categories => commands::catalog::categories(store.api()).await?,
        Commands::Tags => commands::catalog::tags(store.api()).await?,
        Commands::Reviews { product_id, page } => {
            commands::catalog::reviews(store.api(), ProductId::new(product_id), page).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(&mut store, name, email, password).await?,
        Commands::Login { email, password } => {
            commands::account::login(&mut store, email, password).await?;
        }
        Commands::Logout => commands::account::logout(&mut store)?,
        Commands::Profile => commands::account::profile(&mut store).await?,
        Commands::Orders => commands::orders::list(&mut store).await?,
        Commands::CancelOrder { id } => commands::orders::cancel(&mut store, OrderId::new(id)).await?,
        Commands::Checkout {
            items,
            name,
            email,
            phone,
            address,
            note,
        } => {
            let details = pasta_house_storefront::store::OrderDetails {
                name,
                email,
                phone,
                address,
                note,
            };
            commands::orders::checkout(&mut store, &items, details).await?;
        }
    }
    Ok(())
}
