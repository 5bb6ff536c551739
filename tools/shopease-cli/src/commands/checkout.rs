//! Checkout command.

use anyhow::Result;
use chrono::Local;
use dialoguer::Confirm;
use serde_json::json;
use shopease_ui::PageKind;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager(PageKind::Checkout)?;

    if !args.yes && !ctx.output.is_json() && !manager.cart().is_empty() {
        let totals = manager.totals()?;
        ctx.output.header("Checkout");
        ctx.output.kv("Items", &totals.item_count.to_string());
        ctx.output.kv("Total", &totals.total.display());
        ctx.output.info("");

        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let order = manager.place_order().await?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "order": order,
            "redirect": manager.view().redirected_to(),
            "toasts": manager.notifier().shown(),
        }));
        return Ok(());
    }

    ctx.output.header("Order Receipt");
    ctx.output.kv("Order", order.id.as_str());
    ctx.output.kv(
        "Placed at",
        &order
            .placed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    );
    for item in &order.items {
        ctx.output
            .list_item(&format!("{} x {} @ {}", item.quantity, item.name, item.unit_price.display()));
    }
    ctx.output.kv("Subtotal", &order.totals.subtotal.display());
    ctx.output.kv("Tax", &order.totals.tax.display());
    ctx.output.kv("Shipping", &order.totals.shipping.display());
    ctx.output.kv("Total", &order.totals.total.display());
    if let Some(url) = manager.view().redirected_to() {
        ctx.output.debug(&format!("Continue shopping at {}", url));
    }
    Ok(())
}
