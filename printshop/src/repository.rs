//! Persistence port for the printshop core.
//!
//! This module defines the [`Repository`] trait that serves as the port
//! interface between the service layer and whatever storage backs the store
//! (an in-memory map, a JSON file, a relational database). The trait is
//! backend-independent; the three mutating hot spots of the domain - cart
//! merge, order creation, and status updates - are single trait operations
//! so adapters can make each one atomic.

use async_trait::async_trait;

use crate::cart::CartLine;
use crate::errors::RepositoryResult;
use crate::order::{Order, OrderDraft, OrderStatus, StatusHistoryEntry};
use crate::product::{NewProduct, Product, ProductPatch};
use crate::types::{
    CartLineId, OrderId, ProductId, Quantity, SessionId, Timestamp, TrackingCode,
};

/// The persistence operations every storage adapter must provide.
///
/// Four logical collections back the store: products, cart lines, orders
/// (with nested line items), and status history, each keyed by an
/// auto-incrementing id the adapter allocates.
///
/// # Atomicity
///
/// [`merge_cart_line`](Self::merge_cart_line),
/// [`create_order`](Self::create_order), and
/// [`append_status`](Self::append_status) must each be atomic with respect
/// to concurrent operations on the same session or order. In particular,
/// two concurrent `create_order` calls for one session must not both
/// consume the same cart lines; the loser fails with
/// [`RepositoryError::CartConflict`].
///
/// [`RepositoryError::CartConflict`]: crate::errors::RepositoryError::CartConflict
#[async_trait]
pub trait Repository: Send + Sync {
    // ----- products -----

    /// Lists all products in insertion order.
    async fn list_products(&self) -> RepositoryResult<Vec<Product>>;

    /// Looks up a single product.
    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;

    /// Inserts a product, allocating its id and stamping `created_at`.
    async fn insert_product(&self, new: NewProduct) -> RepositoryResult<Product>;

    /// Applies a partial update. Returns the updated product, or `None` if
    /// no product has the given id.
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> RepositoryResult<Option<Product>>;

    /// Deletes a product. Returns whether anything was removed. Cart lines
    /// and historical orders referencing the product are left untouched.
    async fn delete_product(&self, id: ProductId) -> RepositoryResult<bool>;

    /// Number of products currently in the catalog.
    async fn count_products(&self) -> RepositoryResult<u64>;

    // ----- cart lines -----

    /// All cart lines for a session, in insertion order.
    async fn cart_lines(&self, session: &SessionId) -> RepositoryResult<Vec<CartLine>>;

    /// Adds `quantity` of a product to a session's cart atomically.
    ///
    /// If a line for (session, product) already exists its quantity is
    /// incremented; otherwise a new line is inserted. Never produces two
    /// lines for the same product in one session.
    ///
    /// # Errors
    ///
    /// * [`RepositoryError::InvalidQuantity`] - the merged quantity would
    ///   exceed the per-line cap.
    ///
    /// [`RepositoryError::InvalidQuantity`]: crate::errors::RepositoryError::InvalidQuantity
    async fn merge_cart_line(
        &self,
        session: &SessionId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> RepositoryResult<CartLine>;

    /// Replaces the quantity on a line owned by the session. Returns the
    /// updated line, or `None` if the line does not exist or belongs to a
    /// different session.
    async fn update_cart_line(
        &self,
        session: &SessionId,
        line_id: CartLineId,
        quantity: Quantity,
    ) -> RepositoryResult<Option<CartLine>>;

    /// Removes a line owned by the session. Returns whether anything was
    /// removed.
    async fn remove_cart_line(
        &self,
        session: &SessionId,
        line_id: CartLineId,
    ) -> RepositoryResult<bool>;

    /// Removes every line for the session. Succeeds even on an empty cart.
    async fn clear_cart(&self, session: &SessionId) -> RepositoryResult<()>;

    // ----- orders -----

    /// Creates an order from a draft as one atomic unit.
    ///
    /// The adapter allocates the order id, inserts the order with its
    /// frozen line items, appends the creation history entry, and removes
    /// exactly the draft's observed cart lines - all or nothing. Lines
    /// added to the session after the draft's read are left in the cart.
    ///
    /// # Errors
    ///
    /// * [`RepositoryError::DuplicateTrackingCode`] - another order already
    ///   carries the draft's code; the caller should regenerate and retry.
    /// * [`RepositoryError::CartConflict`] - an observed line is missing or
    ///   was requantified at commit time, meaning a concurrent operation
    ///   touched the cart; the caller should re-read and retry.
    ///
    /// [`RepositoryError::DuplicateTrackingCode`]: crate::errors::RepositoryError::DuplicateTrackingCode
    /// [`RepositoryError::CartConflict`]: crate::errors::RepositoryError::CartConflict
    async fn create_order(&self, draft: OrderDraft) -> RepositoryResult<Order>;

    /// Looks up an order by id, including its line items.
    async fn get_order(&self, id: OrderId) -> RepositoryResult<Option<Order>>;

    /// Looks up an order by its tracking code.
    async fn find_order_by_code(&self, code: &TrackingCode) -> RepositoryResult<Option<Order>>;

    /// All orders in creation order (oldest first).
    async fn list_orders(&self) -> RepositoryResult<Vec<Order>>;

    /// Sets an order's status and appends the matching history entry as one
    /// atomic unit, bumping `updated_at` to `at`. Returns the updated order
    /// and the new entry, or `None` if no order has the given id.
    async fn append_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        message: String,
        at: Timestamp,
    ) -> RepositoryResult<Option<(Order, StatusHistoryEntry)>>;

    /// The full status history of an order, oldest entry first.
    async fn status_history(&self, order_id: OrderId) -> RepositoryResult<Vec<StatusHistoryEntry>>;
}
