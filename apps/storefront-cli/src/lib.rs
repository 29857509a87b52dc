//! # storefront-cli: Terminal Storefront
//!
//! Command line front end over [`storefront_client::Store`]. Every
//! subcommand is one view of the storefront.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          storefront <command>                           │
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG, stderr                            │
//! │  2. ClientConfig::load      file + STOREFRONT_* env + --api-url         │
//! │  3. Store::from_config      restores a stored credential                │
//! │  4. restore_session         GET /auth/me (only with a credential)       │
//! │  5. header                  fetch cart + wishlist when signed in        │
//! │  6. command                 mount view, dispatch, render                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables go to stdout. Notices, the header and logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use storefront_client::{ClientConfig, Store};

pub mod commands;
pub mod views;

use commands::addresses::AddressCommand;
use commands::auth::{LoginArgs, RegisterArgs};
use commands::cart::CartCommand;
use commands::catalog::{CatalogArgs, ProductArgs};
use commands::orders::OrdersCommand;
use commands::wishlist::WishlistCommand;
use views::notify::Notice;

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Browse and shop the storefront from a terminal")]
pub struct Cli {
    /// Path to storefront.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL including the /api prefix.
    #[arg(long, global = true, env = "STOREFRONT_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    /// Show the signed-in account.
    Whoami,
    /// List products with filters.
    Products(CatalogArgs),
    /// Show one product; optionally add it to the cart or wishlist.
    Product(ProductArgs),
    Categories,
    #[command(subcommand)]
    Cart(CartCommand),
    #[command(subcommand)]
    Wishlist(WishlistCommand),
    #[command(subcommand)]
    Orders(OrdersCommand),
    #[command(subcommand)]
    Addresses(AddressCommand),
}

// =============================================================================
// Entry
// =============================================================================

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Every dispatched action and request
/// - `RUST_LOG=storefront_client=trace` - Client crate only
/// - Default: warnings, plus info from the `storefront*` crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the store and runs one command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::load(cli.config)?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let page_limit = config.catalog.page_limit;
    let store = Store::from_config(&config)?;
    debug!(session = %store.session_id(), base_url = %store.api().base_url(), "Store ready");

    if let Err(err) = store.restore_session().await {
        warn!(error = %err, "Stored session was rejected");
        if err.is_unauthorized() {
            Notice::info("Your session has expired. Please sign in again.").emit();
        } else {
            Notice::request_failed(&err).emit();
        }
    }
    if !matches!(cli.command, Command::Logout) {
        print_header(&store).await;
    }

    match cli.command {
        Command::Login(args) => commands::auth::login(&store, args).await,
        Command::Register(args) => commands::auth::register(&store, args).await,
        Command::Logout => {
            commands::auth::logout(&store);
            Ok(())
        }
        Command::Whoami => commands::auth::whoami(&store).await,
        Command::Products(args) => commands::catalog::products(&store, args, page_limit).await,
        Command::Product(args) => commands::catalog::product(&store, args).await,
        Command::Categories => commands::catalog::categories(&store).await,
        Command::Cart(command) => commands::cart::run(&store, command).await,
        Command::Wishlist(command) => commands::wishlist::run(&store, command).await,
        Command::Orders(command) => commands::orders::run(&store, command).await,
        Command::Addresses(command) => commands::addresses::run(&store, command).await,
    }
}

/// Header counts come from the server whenever a session exists.
async fn print_header(store: &Store) {
    let authenticated = store.state().auth.is_authenticated;
    if authenticated {
        if let Err(err) = store.fetch_cart().await {
            debug!(error = %err, "Header cart fetch failed");
        }
        if let Err(err) = store.fetch_wishlist().await {
            debug!(error = %err, "Header wishlist fetch failed");
        }
    }
    eprintln!("{}", views::header::render(&store.state()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_catalog_filters() {
        let cli = Cli::try_parse_from([
            "storefront",
            "products",
            "--category",
            "men",
            "--max-price",
            "50",
            "--color",
            "Blue",
            "--color",
            "Red",
            "--sort",
            "price-asc",
        ])
        .unwrap();
        match cli.command {
            Command::Products(args) => {
                assert_eq!(args.category.as_deref(), Some("men"));
                assert_eq!(args.colors, ["Blue", "Red"]);
                assert_eq!(args.sort.as_deref(), Some("price-asc"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_place_order_defaults_to_cod() {
        let cli = Cli::try_parse_from(["storefront", "orders", "place"]).unwrap();
        match cli.command {
            Command::Orders(OrdersCommand::Place { address, payment }) => {
                assert_eq!(address, None);
                assert_eq!(payment, "cod");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_cart_update() {
        let cli = Cli::try_parse_from(["storefront", "cart", "update", "7", "0"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Cart(CartCommand::Update { line_id: 7, quantity: 0 })
        ));
    }
}
