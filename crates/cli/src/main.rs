//! Saahaz CLI - storefront client for the Saahaz backend.
//!
//! # Usage
//!
//! ```bash
//! # Browse and search the catalog
//! saahaz products --featured
//! saahaz search "denim"
//!
//! # Build a cart and check out
//! saahaz cart add <product-id> -q 2 --size M --color Blue
//! saahaz cart show
//! saahaz login -e user@example.com -p secret
//! saahaz checkout --address "123 Fashion Street, Lahore" --phone "+92 300 1234567"
//!
//! # Back-office (admin credential required)
//! saahaz admin category-create -n "Outerwear"
//! saahaz admin order-status <order-id> shipped
//! ```
//!
//! # Environment Variables
//!
//! - `SAAHAZ_API_URL` - Backend origin (default: `http://localhost:8001/api`)
//! - `SAAHAZ_STATE_DIR` - Directory for persisted cart/credential state

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use saahaz_client::config::ClientConfig;
use saahaz_client::store::Store;
use saahaz_core::OrderStatus;

mod commands;

#[derive(Parser)]
#[command(name = "saahaz")]
#[command(author, version, about = "Saahaz storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Delivery address
        #[arg(long)]
        address: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Log out; clears the credential and the cart
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show or update the account profile
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New delivery address
        #[arg(long)]
        address: Option<String>,
    },
    /// List products
    Products {
        /// Only products in this category
        #[arg(long)]
        category: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,
    },
    /// Show one product
    Product {
        /// Product ID
        id: String,
    },
    /// List categories
    Categories,
    /// Search products by name or description
    Search {
        /// Search query (case-insensitive substring)
        query: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order
    Checkout {
        /// Delivery address
        #[arg(long)]
        address: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Delivery option (`standard`, `express`, `next_day`, `free`)
        #[arg(long, default_value = "standard")]
        delivery: String,
    },
    /// List orders (own orders; all orders for admins)
    Orders,
    /// Back-office operations (admin credential required)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product variant to the cart
    Add {
        /// Product ID
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Size variant
        #[arg(short, long)]
        size: Option<String>,

        /// Color variant
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a cart line by its exact variant key
    Remove {
        /// Product ID
        product_id: String,

        /// Size variant
        #[arg(short, long)]
        size: Option<String>,

        /// Color variant
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Product ID
        product_id: String,

        /// New quantity
        quantity: u32,

        /// Size variant
        #[arg(short, long)]
        size: Option<String>,

        /// Color variant
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Show the cart contents and subtotal
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a product
    ProductCreate {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product description
        #[arg(short, long)]
        description: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,

        /// Category ID
        #[arg(long)]
        category: String,

        /// Available sizes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<String>,

        /// Available colors (comma-separated)
        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,

        /// Image URLs (comma-separated)
        #[arg(long, value_delimiter = ',')]
        images: Vec<String>,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        inventory: u32,

        /// Show on the featured shelf
        #[arg(long)]
        featured: bool,
    },
    /// Replace a product's fields
    ProductUpdate {
        /// Product ID
        id: String,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product description
        #[arg(short, long)]
        description: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,

        /// Category ID
        #[arg(long)]
        category: String,

        /// Available sizes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<String>,

        /// Available colors (comma-separated)
        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,

        /// Image URLs (comma-separated)
        #[arg(long, value_delimiter = ',')]
        images: Vec<String>,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        inventory: u32,

        /// Show on the featured shelf
        #[arg(long)]
        featured: bool,
    },
    /// Delete a product
    ProductDelete {
        /// Product ID
        id: String,
    },
    /// Create a category
    CategoryCreate {
        /// Category name
        #[arg(short, long)]
        name: String,

        /// Category description
        #[arg(short, long)]
        description: Option<String>,

        /// Category image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Replace a category's fields
    CategoryUpdate {
        /// Category ID
        id: String,

        /// Category name
        #[arg(short, long)]
        name: String,

        /// Category description
        #[arg(short, long)]
        description: Option<String>,

        /// Category image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a category
    CategoryDelete {
        /// Category ID
        id: String,
    },
    /// Set an order's status
    OrderStatus {
        /// Order ID
        id: String,

        /// New status (`pending`, `confirmed`, `shipped`, `delivered`, `cancelled`)
        status: OrderStatus,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let mut store = Store::from_config(&config);
    store.initialize().await;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut store, &email, &password).await?;
        }
        Commands::Register {
            email,
            password,
            name,
            address,
            phone,
        } => {
            commands::auth::register(&mut store, email, password, name, address, phone).await?;
        }
        Commands::Logout => commands::auth::logout(&mut store),
        Commands::Whoami => commands::auth::whoami(&store),
        Commands::Profile {
            name,
            phone,
            address,
        } => commands::auth::profile(&mut store, name, phone, address).await?,
        Commands::Products { category, featured } => {
            commands::catalog::products(&store, category, featured).await?;
        }
        Commands::Product { id } => commands::catalog::product(&store, &id).await?,
        Commands::Categories => commands::catalog::categories(&store).await?,
        Commands::Search { query } => commands::catalog::search(&store, &query).await?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
                size,
                color,
            } => commands::cart::add(&mut store, product_id, quantity, size, color),
            CartAction::Remove {
                product_id,
                size,
                color,
            } => commands::cart::remove(&mut store, product_id, size, color),
            CartAction::Update {
                product_id,
                quantity,
                size,
                color,
            } => commands::cart::update(&mut store, product_id, quantity, size, color),
            CartAction::Show => commands::cart::show(&store).await,
            CartAction::Clear => commands::cart::clear(&mut store),
        },
        Commands::Checkout {
            address,
            phone,
            delivery,
        } => commands::orders::checkout(&mut store, address, phone, &delivery).await?,
        Commands::Orders => commands::orders::list(&store).await?,
        Commands::Admin { action } => match action {
            AdminAction::ProductCreate {
                name,
                description,
                price,
                category,
                sizes,
                colors,
                images,
                inventory,
                featured,
            } => {
                commands::admin::product_create(
                    &store,
                    name,
                    description,
                    price,
                    category,
                    sizes,
                    colors,
                    images,
                    inventory,
                    featured,
                )
                .await?;
            }
            AdminAction::ProductUpdate {
                id,
                name,
                description,
                price,
                category,
                sizes,
                colors,
                images,
                inventory,
                featured,
            } => {
                commands::admin::product_update(
                    &store,
                    &id,
                    name,
                    description,
                    price,
                    category,
                    sizes,
                    colors,
                    images,
                    inventory,
                    featured,
                )
                .await?;
            }
            AdminAction::ProductDelete { id } => {
                commands::admin::product_delete(&store, &id).await?;
            }
            AdminAction::CategoryCreate {
                name,
                description,
                image,
            } => commands::admin::category_create(&store, name, description, image).await?,
            AdminAction::CategoryUpdate {
                id,
                name,
                description,
                image,
            } => {
                commands::admin::category_update(&store, &id, name, description, image).await?;
            }
            AdminAction::CategoryDelete { id } => {
                commands::admin::category_delete(&store, &id).await?;
            }
            AdminAction::OrderStatus { id, status } => {
                commands::admin::order_status(&store, &id, status).await?;
            }
        },
    }
    Ok(())
}
