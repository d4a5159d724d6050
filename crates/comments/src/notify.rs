/// User-visible, fire-and-forget notification surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Routes notices to the log facade.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::info!("{message}");
    }
}
