//! Cart commands.

use anyhow::{bail, Result};
use shopease_commerce::cart::CartTotals;
use shopease_commerce::{Currency, Money};
use shopease_ui::PageKind;

use super::{AddArgs, CartReport, ClearArgs, QtyArgs, RemoveArgs};
use crate::context::{Context, Manager};
use crate::output::shipping_label;
use crate::terminal::PromptConfirm;

const COLUMN_WIDTHS: [usize; 5] = [3, 28, 10, 4, 10];

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let Some(price) = Money::from_decimal(args.price, Currency::USD) else {
        bail!("Invalid price: {}", args.price);
    };

    let mut manager = ctx.manager(PageKind::ProductDetails)?;
    let outcome = manager.add(&args.name, price, args.quantity)?;

    if ctx.output.is_json() {
        ctx.output.json(&CartReport::new(&manager)?);
        return Ok(());
    }

    ctx.output.kv("Position", &outcome.position.to_string());
    ctx.output.kv("Quantity", &outcome.quantity.to_string());
    ctx.output
        .kv("Items in cart", &manager.view().badge_count().to_string());
    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager(PageKind::Cart)?;
    manager.remove(args.position)?;
    finish(ctx, &mut manager)
}

/// Run the qty command.
pub async fn qty(args: QtyArgs, ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager(PageKind::Cart)?;
    let change = manager.update_quantity(args.position, args.delta)?;
    ctx.output.debug(&format!(
        "line {} quantity now {}",
        args.position, change.quantity
    ));
    finish(ctx, &mut manager)
}

/// Run the clear command.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager(PageKind::Cart)?;
    let mut confirm = PromptConfirm::new(args.yes);
    if !manager.clear(&mut confirm)? {
        ctx.output.warn("Clear cancelled");
        return Ok(());
    }
    finish(ctx, &mut manager)
}

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager(PageKind::Cart)?;
    manager.render()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartReport::new(&manager)?);
        return Ok(());
    }
    print_cart(ctx, &manager)
}

/// Redraw the cart if the command asked for it, or print the JSON report.
fn finish(ctx: &Context, manager: &mut Manager) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&CartReport::new(manager)?);
        return Ok(());
    }

    if manager.view().reloaded() {
        manager.render()?;
        print_cart(ctx, manager)?;
    } else if let Some(totals) = manager.view().totals() {
        ctx.output.kv("Total", &totals.total.display());
    }
    Ok(())
}

/// Print the cart table and order summary.
pub fn print_cart(ctx: &Context, manager: &Manager) -> Result<()> {
    ctx.output.header("Your Cart");

    if manager.cart().is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output
        .table_row(&["#", "Product", "Price", "Qty", "Total"], &COLUMN_WIDTHS);
    for (index, item) in manager.cart().items().iter().enumerate() {
        let position = (index + 1).to_string();
        let price = item.unit_price.display();
        let quantity = item.quantity.to_string();
        let total = item.line_total()?.display();
        ctx.output.table_row(
            &[
                position.as_str(),
                item.name.as_str(),
                price.as_str(),
                quantity.as_str(),
                total.as_str(),
            ],
            &COLUMN_WIDTHS,
        );
    }

    ctx.output.header("Order Summary");
    for (label, value) in summary_rows(&manager.totals()?) {
        ctx.output.kv(label, &value);
    }
    Ok(())
}

/// Order summary lines as label and value.
fn summary_rows(totals: &CartTotals) -> Vec<(&'static str, String)> {
    vec![
        ("Items", totals.item_count.to_string()),
        ("Subtotal", totals.subtotal.display()),
        ("Tax", totals.tax.display()),
        (
            "Shipping",
            shipping_label(totals.free_shipping(), &totals.shipping.display()),
        ),
        ("Total", totals.total.display()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopease_commerce::cart::{Cart, PricingRules};

    #[test]
    fn test_summary_rows() {
        let mut cart = Cart::new();
        cart.add("Keyboard", Money::usd(2000), 3).unwrap();
        let totals = cart.totals(&PricingRules::default()).unwrap();

        let rows = summary_rows(&totals);
        let labels: Vec<_> = rows.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["Items", "Subtotal", "Tax", "Shipping", "Total"]);
        assert_eq!(rows[0].1, "3");
        assert_eq!(rows[1].1, "$60.00");
        assert_eq!(rows[2].1, "$5.40");
        assert!(rows[3].1.contains("FREE"));
        assert_eq!(rows[4].1, "$65.40");
    }
}
