//! Shopfront CLI - Terminal storefront shell.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront products list --sort price-low-high --in-stock
//! shopfront products show 42
//!
//! # Shop (works as guest; cart persists across invocations)
//! shopfront cart add 42 --quantity 2
//! shopfront cart show
//!
//! # Log in (merges the guest cart into the account cart)
//! shopfront account login -e ada@example.com -p hunter2
//!
//! # Check out
//! shopfront orders checkout --address "1 Infinite Loop"
//! ```
//!
//! # Commands
//!
//! - `products` - Browse and search the catalog
//! - `cart` - Inspect and mutate the shopping cart
//! - `account` - Login, registration, logout
//! - `wishlist` - Manage the wishlist (requires login)
//! - `orders` - Checkout and order history
//! - `admin` - Catalog/order/user management (requires admin role)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use shopfront_client::catalog::SortBy;
use shopfront_client::{ClientConfig, ClientError, Notifier, SharedNotifier, Storefront};
use shopfront_core::OrderStatus;

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Login, registration, logout
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Checkout and order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Catalog, order, and user management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered
    List {
        /// Category ID to filter by
        #[arg(long)]
        category: Option<i64>,

        /// Free-text search query
        #[arg(long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Only show products in stock
        #[arg(long)]
        in_stock: bool,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Show a single product
    Show {
        /// Product ID
        id: i64,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortArg {
    PriceLowHigh,
    PriceHighLow,
    NameAZ,
    NameZA,
    Newest,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PriceLowHigh => Self::PriceLowHigh,
            SortArg::PriceHighLow => Self::PriceHighLow,
            SortArg::NameAZ => Self::NameAZ,
            SortArg::NameZA => Self::NameZA,
            SortArg::Newest => Self::Newest,
        }
    }
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: i64,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line item
    Remove {
        /// Product ID
        id: i64,
    },
    /// Set a line item's quantity
    Set {
        /// Product ID
        id: i64,

        /// New quantity (at least 1; use `remove` for 0)
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Log in with email and password
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

        /// First name
        #[arg(long)]
        first_name: Option<String>,

        /// Last name
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Log out and revert to a guest cart
    Logout,
    /// Show the current session
    Whoami,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: i64,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Place an order from the account cart
    Checkout {
        /// Shipping address
        #[arg(long)]
        address: String,

        /// Payment method identifier
        #[arg(long)]
        payment_method: Option<String>,
    },
    /// List past orders
    List,
    /// Show a single order
    Show {
        /// Order ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a catalog product
    CreateProduct {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Price, e.g. 19.99
        #[arg(long)]
        price: rust_decimal::Decimal,

        #[arg(long)]
        category: Option<i64>,

        #[arg(long)]
        stock: Option<u32>,
    },
    /// Replace a catalog product's fields
    UpdateProduct {
        /// Product ID
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Price, e.g. 19.99
        #[arg(long)]
        price: rust_decimal::Decimal,

        #[arg(long)]
        category: Option<i64>,

        #[arg(long)]
        stock: Option<u32>,
    },
    /// Delete a catalog product
    DeleteProduct {
        /// Product ID
        id: i64,
    },
    /// List orders across all accounts
    ListOrders {
        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Move an order to a new status
    SetOrderStatus {
        /// Order ID
        id: i64,

        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// List user accounts
    ListUsers {
        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Enable or disable a user account
    SetUserEnabled {
        /// User ID
        id: i64,

        /// `true` to enable, `false` to disable
        enabled: bool,
    },
    /// Create another admin account
    RegisterAdmin {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// First name
        #[arg(long)]
        first_name: Option<String>,

        /// Last name
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StatusArg {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Processing => Self::Processing,
            StatusArg::Shipped => Self::Shipped,
            StatusArg::Delivered => Self::Delivered,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

/// Notifier that prints to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let app = match build_app() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    app.start().await;

    if let Err(e) = run(&app, cli).await {
        if let ClientError::Api(api_error) = &e
            && Storefront::is_unauthorized(api_error)
        {
            app.handle_unauthorized();
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn build_app() -> shopfront_client::Result<Storefront> {
    let config = ClientConfig::from_env().map_err(ClientError::from)?;
    let notifier: SharedNotifier = std::sync::Arc::new(ConsoleNotifier);
    Storefront::new(&config, notifier)
}

async fn run(app: &Storefront, cli: Cli) -> shopfront_client::Result<()> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                sort,
                in_stock,
                page,
                size,
            } => {
                commands::catalog::list(
                    app,
                    category,
                    search,
                    sort.map(SortBy::from),
                    in_stock,
                    page,
                    size,
                )
                .await?;
            }
            ProductsAction::Show { id } => commands::catalog::show(app, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(app),
            CartAction::Add { id, quantity } => commands::cart::add(app, id, quantity).await?,
            CartAction::Remove { id } => commands::cart::remove(app, id).await?,
            CartAction::Set { id, quantity } => commands::cart::set(app, id, quantity).await?,
            CartAction::Clear => commands::cart::clear(app).await?,
        },
        Commands::Account { action } => match action {
            AccountAction::Login { email, password } => {
                commands::account::login(app, &email, &password).await?;
            }
            AccountAction::Register {
                email,
                password,
                first_name,
                last_name,
            } => {
                commands::account::register(app, email, password, first_name, last_name).await?;
            }
            AccountAction::Logout => commands::account::logout(app).await,
            AccountAction::Whoami => commands::account::whoami(app),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(app).await?,
            WishlistAction::Add { id } => commands::wishlist::add(app, id).await?,
            WishlistAction::Remove { id } => commands::wishlist::remove(app, id).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::Checkout {
                address,
                payment_method,
            } => commands::orders::checkout(app, address, payment_method).await?,
            OrdersAction::List => commands::orders::list(app).await?,
            OrdersAction::Show { id } => commands::orders::show(app, id).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::CreateProduct {
                name,
                description,
                price,
                category,
                stock,
            } => {
                commands::admin::create_product(app, name, description, price, category, stock)
                    .await?;
            }
            AdminAction::UpdateProduct {
                id,
                name,
                description,
                price,
                category,
                stock,
            } => {
                commands::admin::update_product(
                    app,
                    id,
                    name,
                    description,
                    price,
                    category,
                    stock,
                )
                .await?;
            }
            AdminAction::DeleteProduct { id } => commands::admin::delete_product(app, id).await?,
            AdminAction::ListOrders { page, size } => {
                commands::admin::list_orders(app, page, size).await?;
            }
            AdminAction::SetOrderStatus { id, status } => {
                commands::admin::set_order_status(app, id, status.into()).await?;
            }
            AdminAction::ListUsers { page, size } => {
                commands::admin::list_users(app, page, size).await?;
            }
            AdminAction::SetUserEnabled { id, enabled } => {
                commands::admin::set_user_enabled(app, id, enabled).await?;
            }
            AdminAction::RegisterAdmin {
                email,
                password,
                first_name,
                last_name,
            } => {
                commands::admin::register_admin(app, email, password, first_name, last_name)
                    .await?;
            }
        },
    }
    Ok(())
}
