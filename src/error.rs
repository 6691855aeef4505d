//! Error types for the gagstock tracker.

/// Top-level error type for the stock tracker.
#[derive(Debug, thiserror::Error)]
pub enum GagstockError {
    /// Upstream source unreachable, returned a non-success status, or
    /// produced a malformed payload. Fails the whole snapshot.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Transport failed to deliver a notification.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Webhook gateway error.
    #[error("gateway error: {0}")]
    Gateway(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, GagstockError>;
