/// Diagnostic sink for stimuli the state machine ignores. Never affects control flow.
pub trait Diagnostics: Send + Sync {
    fn info(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
}

/// Forwards diagnostics to the `log` facade.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn info(&self, title: &str, message: &str) {
        log::info!(target: "elevator", "[{}] {}", title, message);
    }

    fn error(&self, title: &str, message: &str) {
        log::error!(target: "elevator", "[{}] {}", title, message);
    }
}
