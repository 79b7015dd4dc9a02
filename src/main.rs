//! storefront - Search a product catalog and manage cart, wishlist and comparisons.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront::commands::{
    CartOp, CollectionCommand, CompareOp, MarketingCommand, ProductCommand, ReviewsCommand,
    ReviewsOp, SearchCommand, SearchOptions, WishlistOp,
};
use storefront::config::{Config, OutputFormat};
use storefront::filters::{FilterState, DEFAULT_PRICE_RANGE};
use storefront::search::SortKey;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "storefront",
    version,
    about = "Search a product catalog and manage cart, wishlist and comparisons"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Directory for persisted collections
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// JSON catalog file (defaults to the built-in catalog)
    #[arg(long, global = true, env = "STOREFRONT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for products
    #[command(alias = "s")]
    Search {
        /// Search terms; every term must match
        #[arg(default_value = "")]
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        max: Option<usize>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum rating filter (0.0-5.0)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Only show products in stock
        #[arg(long)]
        in_stock: bool,

        /// Only show discounted products
        #[arg(long)]
        on_sale: bool,

        /// relevance, price_low, price_high, rating, newest, popular, name_asc, name_desc
        #[arg(long, default_value = "relevance")]
        sort: SortKey,
    },

    /// Autocomplete suggestions for a partial query
    Suggest { query: String },

    /// Look up products by id
    #[command(alias = "p")]
    Product {
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Show or clear recent searches
    Recent {
        #[arg(long)]
        clear: bool,

        /// Forget a single search
        #[arg(long, conflicts_with = "clear")]
        forget: Option<String>,
    },

    /// List catalog categories
    Categories,

    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },

    /// Compare up to four products
    #[command(alias = "c")]
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },

    /// Show, add or vote on product reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },

    /// Subscribe to the newsletter
    Subscribe { email: String },

    /// List running promotional campaigns
    Campaigns,

    /// Hide a promotional banner
    DismissBanner { banner_id: String },
}

#[derive(Subcommand)]
enum CartAction {
    Add {
        id: u64,
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    Remove {
        id: u64,
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long, default_value = "")]
        color: String,
    },
    /// Set a line's quantity; 0 removes it
    Update {
        id: u64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long, default_value = "")]
        color: String,
    },
    Clear,
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    Add { id: u64 },
    Remove { id: u64 },
    Toggle { id: u64 },
    Clear,
    Show,
}

#[derive(Subcommand)]
enum CompareAction {
    Add { id: u64 },
    Remove { id: u64 },
    /// Move the product at position FROM to position TO (1-based)
    Reorder { from: usize, to: usize },
    Clear,
    Show,
}

#[derive(Subcommand)]
enum ReviewsAction {
    Show {
        product_id: u64,
    },
    Add {
        product_id: u64,
        /// Stars, 1-5
        #[arg(short, long)]
        rating: u8,
        #[arg(short = 'm', long)]
        comment: String,
        #[arg(short, long, default_value = "guest")]
        user: String,
    },
    /// Vote on a review
    Helpful {
        review_id: u64,
        /// Record a "not helpful" vote instead
        #[arg(long)]
        no: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let output = match cli.command {
        Commands::Search {
            query,
            max,
            category,
            brand,
            size,
            color,
            min_price,
            max_price,
            min_rating,
            in_stock,
            on_sale,
            sort,
        } => {
            if let Some(max) = max {
                config.max_results = max;
            }

            let filters = FilterState {
                category: category.unwrap_or_default(),
                brand: brand.unwrap_or_default(),
                size: size.unwrap_or_default(),
                color: color.unwrap_or_default(),
                price_range: (
                    min_price.unwrap_or(DEFAULT_PRICE_RANGE.0),
                    max_price.unwrap_or(DEFAULT_PRICE_RANGE.1),
                ),
                rating: min_rating.unwrap_or(0.0),
                in_stock,
                on_sale,
            };

            let cmd = SearchCommand::new(config)?;
            cmd.execute(&query, &SearchOptions { filters, sort }).await?
        }

        Commands::Suggest { query } => SearchCommand::new(config)?.suggest(&query).await?,

        Commands::Product { ids } => {
            let cmd = ProductCommand::new(config)?;
            if ids.len() == 1 {
                cmd.execute(ids[0]).await?
            } else {
                cmd.execute_batch(&ids).await?
            }
        }

        Commands::Recent { clear, forget } => {
            let cmd = SearchCommand::new(config)?;
            match (clear, forget) {
                (true, _) => cmd.clear_recent(),
                (false, Some(query)) => cmd.forget(&query),
                (false, None) => cmd.recent(),
            }
        }

        Commands::Categories => ProductCommand::new(config)?.categories().await?,

        Commands::Cart { action } => {
            let op = match action {
                CartAction::Add { id, size, color, quantity } => {
                    CartOp::Add { id, size, color, quantity }
                }
                CartAction::Remove { id, size, color } => CartOp::Remove { id, size, color },
                CartAction::Update { id, quantity, size, color } => {
                    CartOp::Update { id, size, color, quantity }
                }
                CartAction::Clear => CartOp::Clear,
                CartAction::Show => CartOp::Show,
            };
            CollectionCommand::new(config)?.cart(op).await?
        }

        Commands::Wishlist { action } => {
            let op = match action {
                WishlistAction::Add { id } => WishlistOp::Add(id),
                WishlistAction::Remove { id } => WishlistOp::Remove(id),
                WishlistAction::Toggle { id } => WishlistOp::Toggle(id),
                WishlistAction::Clear => WishlistOp::Clear,
                WishlistAction::Show => WishlistOp::Show,
            };
            CollectionCommand::new(config)?.wishlist(op).await?
        }

        Commands::Compare { action } => {
            let op = match action {
                CompareAction::Add { id } => CompareOp::Add(id),
                CompareAction::Remove { id } => CompareOp::Remove(id),
                CompareAction::Reorder { from, to } => {
                    let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
                        anyhow::bail!("Positions start at 1");
                    };
                    CompareOp::Reorder { from, to }
                }
                CompareAction::Clear => CompareOp::Clear,
                CompareAction::Show => CompareOp::Show,
            };
            CollectionCommand::new(config)?.compare(op).await?
        }

        Commands::Reviews { action } => {
            let op = match action {
                ReviewsAction::Show { product_id } => ReviewsOp::Show { product_id },
                ReviewsAction::Add { product_id, rating, comment, user } => {
                    ReviewsOp::Add { product_id, user_id: user, rating, comment }
                }
                ReviewsAction::Helpful { review_id, no } => {
                    ReviewsOp::Helpful { review_id, is_helpful: !no }
                }
            };
            ReviewsCommand::new(config)?.execute(op).await?
        }

        Commands::Subscribe { email } => MarketingCommand::new(&config).subscribe(&email)?,

        Commands::Campaigns => MarketingCommand::new(&config).campaigns()?,

        Commands::DismissBanner { banner_id } => {
            MarketingCommand::new(&config).dismiss_banner(&banner_id)?
        }
    };

    println!("{}", output);
    Ok(())
}
