//! Error types for the printshop core.
//!
//! Failures are split into two layers:
//!
//! - **`StoreError`**: domain and service failures, surfaced to callers of
//!   the service layer.
//! - **`RepositoryError`**: persistence port failures, wrapped by the
//!   service layer rather than retried.
//!
//! All failures are reported synchronously; the core never swallows an error
//! except the documented drop of order lines whose product was deleted.

use thiserror::Error;

use crate::types::{CartLineId, OrderId, ProductId, SessionId, TrackingCode};

/// Result alias for service-layer operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for persistence port operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested product does not exist in the catalog.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The requested order does not exist.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// No order carries the given tracking code.
    #[error("no order with tracking code '{0}'")]
    TrackingCodeNotFound(TrackingCode),

    /// The cart line does not exist or does not belong to the session.
    #[error("cart line {0} not found")]
    CartLineNotFound(CartLineId),

    /// A caller-supplied value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Order creation was attempted on a session with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart or order operation arrived without a usable session token.
    #[error("session token required")]
    MissingSession,

    /// The persistence layer failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] RepositoryError),
}

impl StoreError {
    /// Whether this error is a lookup miss of any kind.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound(_)
                | Self::OrderNotFound(_)
                | Self::TrackingCodeNotFound(_)
                | Self::CartLineNotFound(_)
        )
    }
}

// A blank or missing session token fails SessionId construction; the
// transport maps that to MissingSession rather than a generic input error.
impl From<crate::types::SessionIdError> for StoreError {
    fn from(_: crate::types::SessionIdError) -> Self {
        Self::MissingSession
    }
}

impl From<crate::types::CustomerEmailError> for StoreError {
    fn from(err: crate::types::CustomerEmailError) -> Self {
        Self::InvalidInput(format!("invalid customer email: {err}"))
    }
}

impl From<crate::types::ProductNameError> for StoreError {
    fn from(err: crate::types::ProductNameError) -> Self {
        Self::InvalidInput(format!("invalid product name: {err}"))
    }
}

impl From<crate::types::TrackingCodeError> for StoreError {
    fn from(err: crate::types::TrackingCodeError) -> Self {
        Self::InvalidInput(format!("invalid tracking code: {err}"))
    }
}

/// Errors raised by persistence adapters behind the [`Repository`] port.
///
/// [`Repository`]: crate::repository::Repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An order with this tracking code already exists. The order service
    /// regenerates the code and retries.
    #[error("tracking code '{0}' already in use")]
    DuplicateTrackingCode(TrackingCode),

    /// The session's cart changed between being read and the order
    /// commit: lines were added to, removed from, or requantified under
    /// the caller by a concurrent operation. The caller should re-read
    /// the cart and retry.
    #[error("cart for session '{0}' changed during order creation")]
    CartConflict(SessionId),

    /// A cart merge would push a line's quantity out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// An I/O error occurred while persisting or loading data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be serialized or deserialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// An opaque backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionId;

    #[test]
    fn error_messages_are_descriptive() {
        let err = StoreError::ProductNotFound(ProductId::try_new(7).unwrap());
        assert_eq!(err.to_string(), "product 7 not found");

        let err = StoreError::EmptyCart;
        assert_eq!(err.to_string(), "cart is empty");

        let code = TrackingCode::try_new("3DK-12345-678").unwrap();
        let err = StoreError::TrackingCodeNotFound(code);
        assert_eq!(err.to_string(), "no order with tracking code '3DK-12345-678'");
    }

    #[test]
    fn not_found_classification() {
        assert!(StoreError::OrderNotFound(OrderId::try_new(1).unwrap()).is_not_found());
        assert!(StoreError::CartLineNotFound(CartLineId::try_new(1).unwrap()).is_not_found());
        assert!(!StoreError::EmptyCart.is_not_found());
        assert!(!StoreError::MissingSession.is_not_found());
    }

    #[test]
    fn blank_session_maps_to_missing_session() {
        let err: StoreError = SessionId::try_new("   ").unwrap_err().into();
        assert!(matches!(err, StoreError::MissingSession));
    }

    #[test]
    fn repository_errors_wrap_into_store_errors() {
        let session = SessionId::try_new("sess-1").unwrap();
        let err: StoreError = RepositoryError::CartConflict(session).into();
        assert!(matches!(err, StoreError::Persistence(_)));
    }
}
