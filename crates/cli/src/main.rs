//! NexusShop CLI - Storefront tools against the REST backend.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! nexus-cli products list --search teclado --page 1
//! nexus-cli products show 12
//! nexus-cli categories tree
//!
//! # Work the cart (persisted between invocations)
//! nexus-cli cart add 12 --quantity 2
//! nexus-cli cart show
//! nexus-cli cart set-quantity 12 3
//!
//! # Session
//! nexus-cli auth login -e user@example.com -p secret
//! nexus-cli orders checkout
//!
//! # RAG search
//! nexus-cli rag query "best mechanical keyboard"
//! ```
//!
//! # Commands
//!
//! - `products` / `categories` - catalog browsing and admin CRUD
//! - `cart` - local cart management
//! - `auth` - login, register, logout, whoami
//! - `orders` - order history, summary, checkout
//! - `rag` - semantic/hybrid/multimodal search and ingestion

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nexus_shop_core::{CategoryId, OrderId, OrderStatus, ProductId};

mod commands;

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(author, version, about = "NexusShop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Browse and manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Authentication and session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Order history and checkout
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// RAG search service
    Rag {
        #[command(subcommand)]
        action: RagAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products with optional filters
    List {
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Page size
        #[arg(long)]
        limit: Option<u32>,
        /// Filter by category id
        #[arg(long)]
        category: Option<i64>,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
        /// Only products with stock
        #[arg(long)]
        available_only: bool,
    },
    /// Show a single product
    Show {
        /// Product id
        id: i64,
    },
    /// Delete a product (admin)
    Delete {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories flat
    List,
    /// Show the category tree
    Tree,
    /// Create a category (admin)
    Create {
        /// Category name
        name: String,
        /// Parent category id
        #[arg(long)]
        parent: Option<i64>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        id: i64,
        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: i64,
    },
    /// Set a line's quantity exactly (0 removes)
    SetQuantity {
        /// Product id
        id: i64,
        /// New quantity
        quantity: u32,
    },
    /// Show cart contents and totals
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in and persist the session
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Log out, discarding session and cart
    Logout,
    /// Show the current user
    Me,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your orders
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Show a single order
    Show {
        /// Order id
        id: i64,
    },
    /// Show aggregate order statistics (admin)
    Summary,
    /// Place an order from the current cart
    Checkout,
    /// Update an order's status (admin)
    SetStatus {
        /// Order id
        id: i64,
        /// New status
        status: OrderStatus,
    },
}

#[derive(Subcommand)]
enum RagAction {
    /// Semantic search
    Query {
        /// The question
        query: String,
        /// How many sources to retrieve
        #[arg(long)]
        top_k: Option<u32>,
    },
    /// Semantic search with metadata filters
    Hybrid {
        /// The question
        query: String,
        /// Document language filter
        #[arg(long)]
        language: Option<String>,
        /// Earliest year
        #[arg(long)]
        year_min: Option<i32>,
        /// Latest year
        #[arg(long)]
        year_max: Option<i32>,
        /// How many sources to retrieve
        #[arg(long)]
        top_k: Option<u32>,
    },
    /// Find products visually similar to an image
    Multimodal {
        /// Path of the example image
        file: PathBuf,
    },
    /// Ingest a document into the search index
    IngestDocument {
        /// Path of the document
        file: PathBuf,
        /// JSON metadata string
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Ingest an image into the search index
    IngestImage {
        /// Path of the image
        file: PathBuf,
        /// JSON metadata string
        #[arg(long)]
        metadata: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List {
                page,
                limit,
                category,
                search,
                available_only,
            } => {
                commands::catalog::list_products(
                    &ctx,
                    page,
                    limit,
                    category.map(CategoryId::new),
                    search,
                    available_only,
                )
                .await?;
            }
            ProductAction::Show { id } => {
                commands::catalog::show_product(&ctx, ProductId::new(id)).await?;
            }
            ProductAction::Delete { id } => {
                commands::catalog::delete_product(&ctx, ProductId::new(id)).await?;
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => commands::catalog::list_categories(&ctx).await?,
            CategoryAction::Tree => commands::catalog::show_category_tree(&ctx).await?,
            CategoryAction::Create { name, parent } => {
                commands::catalog::create_category(&ctx, &name, parent.map(CategoryId::new))
                    .await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => {
                commands::cart::add(&ctx, ProductId::new(id), quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&ctx, ProductId::new(id))?,
            CartAction::SetQuantity { id, quantity } => {
                commands::cart::set_quantity(&ctx, ProductId::new(id), quantity)?;
            }
            CartAction::Show => commands::cart::show(&ctx)?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&ctx, &email, &password).await?;
            }
            AuthAction::Register {
                email,
                password,
                name,
            } => commands::auth::register(&ctx, &email, &password, &name).await?,
            AuthAction::Logout => commands::auth::logout(&ctx)?,
            AuthAction::Me => commands::auth::me(&ctx).await?,
        },
        Commands::Orders { action } => match action {
            OrderAction::List { status } => commands::orders::list(&ctx, status).await?,
            OrderAction::Show { id } => commands::orders::show(&ctx, OrderId::new(id)).await?,
            OrderAction::Summary => commands::orders::summary(&ctx).await?,
            OrderAction::Checkout => commands::orders::checkout(&ctx).await?,
            OrderAction::SetStatus { id, status } => {
                commands::orders::set_status(&ctx, OrderId::new(id), status).await?;
            }
        },
        Commands::Rag { action } => match action {
            RagAction::Query { query, top_k } => {
                commands::rag::query(&ctx, &query, top_k).await?;
            }
            RagAction::Hybrid {
                query,
                language,
                year_min,
                year_max,
                top_k,
            } => {
                commands::rag::hybrid(&ctx, &query, language, year_min, year_max, top_k).await?;
            }
            RagAction::Multimodal { file } => commands::rag::multimodal(&ctx, &file).await?,
            RagAction::IngestDocument { file, metadata } => {
                commands::rag::ingest_document(&ctx, &file, metadata.as_deref()).await?;
            }
            RagAction::IngestImage { file, metadata } => {
                commands::rag::ingest_image(&ctx, &file, metadata.as_deref()).await?;
            }
        },
    }

    Ok(())
}
