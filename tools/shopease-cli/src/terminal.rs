//! Terminal implementations of the storefront view seams.

use dialoguer::Confirm as Prompt;
use indicatif::ProgressBar;
use shopease_commerce::cart::CartTotals;
use shopease_commerce::Money;
use shopease_ui::{CartView, Confirm, Notifier, PageKind, Toast};

use crate::output::Output;

/// A page rendered to the terminal.
pub struct TerminalView {
    output: Output,
    page: PageKind,
    badge_count: u32,
    totals: Option<CartTotals>,
    spinner: Option<ProgressBar>,
    reloaded: bool,
    redirected_to: Option<String>,
}

impl TerminalView {
    pub fn new(output: Output, page: PageKind) -> Self {
        Self {
            output,
            page,
            badge_count: 0,
            totals: None,
            spinner: None,
            reloaded: false,
            redirected_to: None,
        }
    }

    pub fn badge_count(&self) -> u32 {
        self.badge_count
    }

    /// Totals last pushed by the cart.
    pub fn totals(&self) -> Option<&CartTotals> {
        self.totals.as_ref()
    }

    /// Whether the cart asked for the page to be redrawn.
    pub fn reloaded(&self) -> bool {
        self.reloaded
    }

    pub fn redirected_to(&self) -> Option<&str> {
        self.redirected_to.as_deref()
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl CartView for TerminalView {
    fn set_badge_count(&mut self, count: u32) {
        self.badge_count = count;
        self.output.debug(&format!("cart badge: {}", count));
    }

    fn set_line_total(&mut self, position: usize, total: Money) {
        self.output
            .debug(&format!("line {} total: {}", position, total.display()));
    }

    fn set_totals(&mut self, totals: &CartTotals) {
        self.totals = Some(*totals);
        self.output
            .debug(&format!("cart total: {}", totals.total.display()));
    }

    fn set_processing(&mut self, processing: bool) {
        if processing {
            self.stop_spinner();
            self.spinner = Some(self.output.spinner("Processing..."));
        } else {
            self.stop_spinner();
        }
    }

    fn is_cart_page(&self) -> bool {
        self.page == PageKind::Cart
    }

    fn reload(&mut self) {
        self.reloaded = true;
    }

    fn redirect(&mut self, url: &str) {
        self.stop_spinner();
        self.page = PageKind::from_location(url);
        self.redirected_to = Some(url.to_string());
        self.output.debug(&format!("redirecting to {}", url));
    }
}

/// Prints toasts as they arrive and keeps them for JSON output.
pub struct TerminalNotifier {
    output: Output,
    shown: Vec<Toast>,
}

impl TerminalNotifier {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            shown: Vec::new(),
        }
    }

    /// Every toast shown so far.
    pub fn shown(&self) -> &[Toast] {
        &self.shown
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, toast: Toast) {
        if !self.output.is_json() {
            self.output.toast(&toast);
        }
        self.shown.push(toast);
    }
}

/// Asks on the terminal unless the answer was given up front.
pub struct PromptConfirm {
    assume_yes: bool,
}

impl PromptConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        // No terminal to ask on counts as a "no".
        Prompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_tracks_cart_page() {
        let mut view = TerminalView::new(Output::new(false, true), PageKind::Cart);
        assert!(view.is_cart_page());

        view.set_badge_count(3);
        view.reload();
        view.redirect("index.html");

        assert_eq!(view.badge_count(), 3);
        assert!(view.reloaded());
        assert!(!view.is_cart_page());
        assert_eq!(view.redirected_to(), Some("index.html"));
    }

    #[test]
    fn test_notifier_keeps_toasts() {
        let mut notifier = TerminalNotifier::new(Output::new(false, true));
        notifier.notify(Toast::success("Mug added to cart!"));
        assert_eq!(notifier.shown().len(), 1);
        assert_eq!(notifier.shown()[0].message, "Mug added to cart!");
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(PromptConfirm::new(true).confirm("Are you sure?"));
    }
}
