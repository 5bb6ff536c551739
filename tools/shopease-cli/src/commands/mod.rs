//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod promo;

use clap::{Args, Subcommand};
use serde::Serialize;
use shopease_commerce::cart::{CartItem, CartTotals};
use shopease_ui::Toast;

use crate::context::Manager;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product name.
    pub name: String,

    /// Unit price in dollars.
    pub price: f64,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Cart line position (1-based, as listed by `show`).
    pub position: usize,
}

/// Arguments for the qty command.
#[derive(Args)]
pub struct QtyArgs {
    /// Cart line position (1-based, as listed by `show`).
    pub position: usize,

    /// Amount to add to the quantity; negative to reduce it.
    #[arg(allow_negative_numbers = true)]
    pub delta: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the promo command.
#[derive(Args)]
pub struct PromoArgs {
    /// Promo code (case-insensitive).
    pub code: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Cart state as printed by `--json`.
#[derive(Serialize)]
pub struct CartReport<'a> {
    pub items: &'a [CartItem],
    pub totals: CartTotals,
    pub toasts: &'a [Toast],
}

impl<'a> CartReport<'a> {
    pub fn new(manager: &'a Manager) -> anyhow::Result<Self> {
        Ok(Self {
            items: manager.cart().items(),
            totals: manager.totals()?,
            toasts: manager.notifier().shown(),
        })
    }
}
