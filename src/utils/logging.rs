use std::error::Error;

use tracing::span::Span;

pub trait LogError {
    fn log_error(&self, error: &dyn Error);
}

impl LogError for Span {
    fn log_error(&self, error: &dyn Error) {
        self.in_scope(|| {
            tracing::error!("Error: {error}");
        });
    }
}
