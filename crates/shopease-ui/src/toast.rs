//! Toast notifications.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::escape_html;
use crate::view::Notifier;

/// Title shown in every toast header.
pub const BRAND: &str = "ShopEase";

/// How long a toast stays visible.
pub const DEFAULT_TOAST_DELAY_MS: u64 = 3000;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// Parse a kind name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Background class for the toast body and header.
    pub fn bg_class(&self) -> &'static str {
        match self {
            Self::Success => "bg-success",
            Self::Error => "bg-danger",
            Self::Warning => "bg-warning",
            Self::Info => "bg-info",
        }
    }

    /// Font Awesome icon class.
    pub fn icon_class(&self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-exclamation-circle",
            Self::Warning => "fa-exclamation-triangle",
            Self::Info => "fa-info-circle",
        }
    }
}

/// A transient message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    /// Element id, unique per process.
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// Auto-hide delay in milliseconds.
    pub delay_ms: u64,
}

impl Toast {
    /// Create a toast stamped with the current time.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        static SEQ: AtomicU64 = AtomicU64::new(0);

        let created_at = Utc::now();
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("toast-{}-{}", created_at.timestamp_millis(), seq),
            kind,
            message: message.into(),
            created_at,
            delay_ms: DEFAULT_TOAST_DELAY_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Override the auto-hide delay.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// When the toast hides itself.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::milliseconds(self.delay_ms as i64)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Render the toast markup.
    pub fn render_html(&self) -> String {
        let bg = self.kind.bg_class();
        format!(
            r#"<div id="{id}" class="toast {bg} text-white" role="alert">
    <div class="toast-header {bg} text-white">
        <i class="fas {icon} me-2"></i>
        <strong class="me-auto">{brand}</strong>
        <button type="button" class="btn-close btn-close-white" data-bs-dismiss="toast"></button>
    </div>
    <div class="toast-body">
        {message}
    </div>
</div>"#,
            id = self.id,
            bg = bg,
            icon = self.kind.icon_class(),
            brand = BRAND,
            message = escape_html(&self.message),
        )
    }
}

/// The toast container: visible toasts in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    delay_ms: Option<u64>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one auto-hide delay to every toast pushed from now on.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn push(&mut self, toast: Toast) {
        let toast = match self.delay_ms {
            Some(delay) => toast.with_delay_ms(delay),
            None => toast,
        };
        self.toasts.push(toast);
    }

    /// Drop toasts that have hidden themselves, returning them.
    pub fn prune(&mut self, now: DateTime<Utc>) -> Vec<Toast> {
        let (expired, visible): (Vec<_>, Vec<_>) =
            self.toasts.drain(..).partition(|t| t.is_expired(now));
        self.toasts = visible;
        expired
    }

    /// Dismiss one toast by id.
    pub fn dismiss(&mut self, id: &str) -> Option<Toast> {
        let index = self.toasts.iter().position(|t| t.id == id)?;
        Some(self.toasts.remove(index))
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Render the fixed-position container with every visible toast.
    pub fn render_html(&self) -> String {
        let toasts: Vec<String> = self.toasts.iter().map(Toast::render_html).collect();
        format!(
            r#"<div class="toast-container position-fixed bottom-0 end-0 p-3" style="z-index: 9999;">
{}
</div>"#,
            toasts.join("\n")
        )
    }
}

impl Notifier for ToastStack {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_styling() {
        assert_eq!(ToastKind::Error.bg_class(), "bg-danger");
        assert_eq!(ToastKind::Warning.icon_class(), "fa-exclamation-triangle");
        assert_eq!(ToastKind::parse("SUCCESS"), Some(ToastKind::Success));
        assert_eq!(ToastKind::parse("shout"), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Toast::info("one");
        let b = Toast::info("two");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("toast-"));
    }

    #[test]
    fn test_render_escapes_message() {
        let html = Toast::success("<b>Mug</b> added to cart!").render_html();
        assert!(html.contains("class=\"toast bg-success text-white\""));
        assert!(html.contains("fa-check-circle"));
        assert!(html.contains("<strong class=\"me-auto\">ShopEase</strong>"));
        assert!(html.contains("&lt;b&gt;Mug&lt;/b&gt; added to cart!"));
    }

    #[test]
    fn test_stack_prunes_expired() {
        let mut stack = ToastStack::new().with_delay_ms(1000);
        stack.notify(Toast::info("first"));
        stack.notify(Toast::warning("second").with_delay_ms(50));
        assert!(stack.visible().iter().all(|t| t.delay_ms == 1000));

        let created = stack.visible()[0].created_at;
        assert!(stack.prune(created).is_empty());

        let expired = stack.prune(created + Duration::seconds(5));
        assert_eq!(expired.len(), 2);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut stack = ToastStack::new();
        stack.push(Toast::info("a"));
        let id = stack.last().unwrap().id.clone();
        assert!(stack.dismiss(&id).is_some());
        assert!(stack.dismiss(&id).is_none());
    }
}
