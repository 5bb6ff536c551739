//! ShopEase CLI - a terminal storefront over the persisted cart.
//!
//! Commands:
//! - `shopease add` - Add a product to the cart
//! - `shopease remove` - Remove a cart line
//! - `shopease qty` - Change a line's quantity
//! - `shopease clear` - Empty the cart
//! - `shopease show` - Show the cart and its totals
//! - `shopease promo` - Apply a promo code
//! - `shopease checkout` - Place an order
//! - `shopease config` - Manage configuration

mod commands;
mod context;
mod output;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shopease_storefront::StorefrontError;

use commands::{AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, PromoArgs, QtyArgs, RemoveArgs};

/// ShopEase CLI - Manage your shopping cart from the terminal
#[derive(Parser)]
#[command(name = "shopease")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storage file path
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove the cart line at a position
    Remove(RemoveArgs),

    /// Change the quantity of a cart line
    Qty(QtyArgs),

    /// Empty the cart
    Clear(ClearArgs),

    /// Show the cart and its totals
    Show,

    /// Apply a promo code
    Promo(PromoArgs),

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.store.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Qty(args) => commands::cart::qty(args, &ctx).await,
        Commands::Clear(args) => commands::cart::clear(args, &ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Promo(args) => commands::promo::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        // Rejected cart operations were already shown as a toast.
        let shown = e
            .downcast_ref::<StorefrontError>()
            .and_then(StorefrontError::as_commerce)
            .is_some();
        if !shown || ctx.output.is_json() {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}
