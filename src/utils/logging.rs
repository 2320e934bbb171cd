use tracing::Span;

/// Logs errors of event handlers within the span of the event that caused them.
pub trait LogError {
    fn log_error(&self, error: anyhow::Error);
}

impl LogError for Span {
    fn log_error(&self, error: anyhow::Error) {
        self.in_scope(|| {
            // `{:#}` prints the whole chain of causes on a single line
            tracing::error!("Cannot handle pull request event: {error:#}");
        });
    }
}
