//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use shopease_storefront::generate_default_config;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("key", &config.store.key);
    ctx.output
        .kv("path", &ctx.store_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output
        .kv("tax_rate_bps", &config.pricing.tax_rate_bps.to_string());
    ctx.output.kv(
        "free_shipping_over_cents",
        &config.pricing.free_shipping_over_cents.to_string(),
    );
    ctx.output.kv(
        "shipping_fee_cents",
        &config.pricing.shipping_fee_cents.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "processing_delay_ms",
        &config.checkout.processing_delay_ms.to_string(),
    );
    ctx.output.kv(
        "redirect_delay_ms",
        &config.checkout.redirect_delay_ms.to_string(),
    );
    ctx.output.kv("redirect_url", &config.checkout.redirect_url);

    ctx.output.info("");
    ctx.output.info("[ui]");
    ctx.output
        .kv("toast_delay_ms", &config.ui.toast_delay_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &config.log.level.to_string().to_lowercase());
    ctx.output.kv("format", &format!("{:?}", config.log.format).to_lowercase());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("shopease.toml");

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output
        .success(&format!("Created {}", path.display()));
    Ok(())
}
