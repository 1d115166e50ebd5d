//! Orders, line item snapshots, and the status audit trail.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::cart::CartLine;
use crate::types::{
    CustomerEmail, HistoryEntryId, Money, OrderId, ProductId, ProductName, Quantity, SessionId,
    Timestamp, TrackingCode,
};

/// The lifecycle status of an order.
///
/// The normal flow is `pending → confirmed → printing → quality_check →
/// ready → delivered`, but transitions are deliberately unrestricted: any
/// status may follow any other, and unknown strings are carried verbatim as
/// [`Self::Other`]. Callers relying on the known set should match on the
/// named variants and treat `Other` as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Order received, awaiting review. The sole initial status.
    Pending,
    /// Order reviewed and accepted.
    Confirmed,
    /// The printer is running.
    Printing,
    /// Print finished, being inspected.
    QualityCheck,
    /// Ready for pickup or shipping.
    Ready,
    /// In the customer's hands. Terminal under normal flow.
    Delivered,
    /// Any status string outside the known set, preserved verbatim.
    Other(String),
}

impl OrderStatus {
    /// The wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Printing => "printing",
            Self::QualityCheck => "quality_check",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Other(s) => s,
        }
    }

    /// Whether the order still counts as in-flight for admin stats:
    /// pending, confirmed, printing, quality_check, or ready.
    pub const fn is_open(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Confirmed | Self::Printing | Self::QualityCheck | Self::Ready
        )
    }

    /// Whether the order has been delivered.
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "printing" => Self::Printing,
            "quality_check" => Self::QualityCheck,
            "ready" => Self::Ready,
            "delivered" => Self::Delivered,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order-time snapshot of one cart line.
///
/// The product id is a weak reference - the product may later be edited or
/// deleted without affecting this record. Name and price are frozen copies
/// taken at order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// The product this line was built from. Reference only.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: ProductName,
    /// Unit price at order time.
    pub price: Money,
    /// Units ordered.
    pub quantity: Quantity,
}

impl OrderLineItem {
    /// Total for this line: frozen unit price times quantity.
    pub fn line_total(&self) -> Result<Money, crate::errors::StoreError> {
        self.price.multiply_by_quantity(self.quantity)
    }
}

/// A placed order.
///
/// Immutable after creation except for `status` and `updated_at`. The total
/// is frozen at creation as the sum of line item price×quantity and is never
/// recomputed from live catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, monotonically assigned identifier.
    pub id: OrderId,
    /// The session whose cart produced this order.
    pub session_id: SessionId,
    /// Customer name as entered at checkout.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: CustomerEmail,
    /// Shipping address.
    pub address: String,
    /// Frozen order total.
    pub total: Money,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Shopper-facing tracking code, unique among all orders.
    pub tracking_code: TrackingCode,
    /// Frozen line item snapshots, in cart order.
    pub items: Vec<OrderLineItem>,
    /// When the order was created.
    pub created_at: Timestamp,
    /// Bumped on every status change.
    pub updated_at: Timestamp,
}

/// One entry in an order's append-only status audit trail.
///
/// Entries are never mutated or deleted; together they form the order's full
/// history, ordered by creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    /// Unique entry identifier.
    pub id: HistoryEntryId,
    /// The order this entry belongs to.
    pub order_id: OrderId,
    /// Status the order moved to.
    pub status: OrderStatus,
    /// Human-readable note shown to the shopper.
    pub message: String,
    /// When the transition happened.
    pub timestamp: Timestamp,
}

/// Everything the persistence adapter needs to create an order atomically:
/// the frozen order fields plus the initial history message. The adapter
/// allocates the order id, inserts order, items, and the creation history
/// entry, and drains the observed cart lines as one unit.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// The session whose cart is being converted.
    pub session_id: SessionId,
    /// The cart lines this draft was built from, exactly as read. The
    /// adapter drains these and no others, and rejects the draft if any
    /// of them changed since the read.
    pub observed_lines: Vec<CartLine>,
    /// Customer name.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: CustomerEmail,
    /// Shipping address.
    pub address: String,
    /// Frozen total, already computed from the snapshots below.
    pub total: Money,
    /// Candidate tracking code. Insertion fails on collision.
    pub tracking_code: TrackingCode,
    /// Frozen line item snapshots.
    pub items: Vec<OrderLineItem>,
    /// Message for the creation history entry.
    pub initial_message: String,
    /// Creation timestamp, also used for `updated_at` and the first
    /// history entry.
    pub created_at: Timestamp,
}
