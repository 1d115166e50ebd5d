//! Session-scoped cart lines.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{CartLineId, ProductId, Quantity, SessionId};

/// One (product, quantity) line in a session's cart.
///
/// Lines are unique per (session, product): adding an already-present
/// product merges into the existing line instead of duplicating it. A cart
/// is simply the set of lines sharing a session id and has no identity of
/// its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: CartLineId,
    /// Session the line belongs to.
    pub session_id: SessionId,
    /// The product on this line.
    pub product_id: ProductId,
    /// How many units, always at least 1.
    pub quantity: Quantity,
}

/// A cart line enriched with its resolved product.
///
/// `product` is `None` when the product was deleted from the catalog after
/// the line was added; the line itself is kept rather than silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// The underlying cart line.
    pub line: CartLine,
    /// The resolved product, or `None` if it was deleted.
    pub product: Option<Product>,
}

impl CartEntry {
    /// Creates an entry pairing a line with its resolution result.
    pub const fn new(line: CartLine, product: Option<Product>) -> Self {
        Self { line, product }
    }
}
