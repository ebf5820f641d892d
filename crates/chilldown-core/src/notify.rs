//! User-facing notification seam.
//!
//! The engine announces completions and phase changes through a
//! [`Notifier`] it owns but never constructs. Frontends plug in a
//! desktop implementation; headless use gets [`NullNotifier`] or
//! [`LogNotifier`].

/// Sink for attention-grabbing messages.
pub trait Notifier {
    /// Deliver one notification. Failures are the implementation's
    /// problem; the engine does not retry.
    fn notify(&mut self, title: &str, body: &str);
}

/// Discards every notification.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _title: &str, _body: &str) {}
}

/// Writes notifications to the log instead of the desktop.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        log::info!("{title}: {body}");
    }
}
