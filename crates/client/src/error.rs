//! Client-side checkout error taxonomy.

/// Why a checkout attempt failed, from the buyer's point of view.
///
/// The variants map onto the recovery the UI should offer:
/// - [`Validation`](Self::Validation): surface verbatim, buyer corrects input
/// - [`UnknownProduct`](Self::UnknownProduct): buyer removes the named line
///   and retries
/// - [`Server`](Self::Server) / [`Transport`](Self::Transport): generic
///   "try again"; the cart is preserved so nothing is lost
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The server rejected the request as malformed (empty cart, missing
    /// customer fields).
    #[error("{0}")]
    Validation(String),

    /// A cart line references a product the catalog no longer has. The
    /// payload is the offending product id.
    #[error("product no longer available: {0}")]
    UnknownProduct(String),

    /// The server failed internally (catalog or order store unavailable).
    #[error("checkout failed, please try again: {0}")]
    Server(String),

    /// The request never completed. The order may or may not exist
    /// server-side; the cart is kept so the buyer can retry explicitly.
    #[error("network error during checkout: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a body this client cannot read.
    #[error("malformed checkout response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Whether retrying without changing the cart can possibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Server(_) | Self::Transport(_))
    }
}
