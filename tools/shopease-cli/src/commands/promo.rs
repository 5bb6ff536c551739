//! Promo code command.

use anyhow::Result;
use serde_json::json;
use shopease_ui::PageKind;

use super::PromoArgs;
use crate::context::Context;

/// Run the promo command.
pub async fn run(args: PromoArgs, ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager(PageKind::Cart)?;
    let promo = manager.apply_promo(&args.code)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "code": promo.code(),
            "percent_off": promo.percent_off(),
            "free_shipping": promo.free_shipping(),
            "toasts": manager.notifier().shown(),
        }));
        return Ok(());
    }

    ctx.output.kv("Code", promo.code());
    ctx.output.kv("Discount", &format!("{}%", promo.percent_off()));
    if promo.free_shipping() {
        ctx.output.kv("Shipping", "Free");
    }
    ctx.output
        .debug("Promo codes are shown for reference and do not change the totals");
    Ok(())
}
