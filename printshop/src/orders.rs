//! Order lifecycle service: cart-to-order conversion and status updates.

use tracing::{info, warn};

use crate::errors::{RepositoryError, StoreError, StoreResult};
use crate::order::{Order, OrderDraft, OrderLineItem, OrderStatus, StatusHistoryEntry};
use crate::repository::Repository;
use crate::tracking::TrackingCodeGenerator;
use crate::types::{CustomerEmail, Money, OrderId, SessionId, Timestamp, TrackingCode};

/// Message recorded on the creation history entry of every order.
pub const WELCOME_MESSAGE: &str = "Order received! We're reviewing it. \u{1f389}";

/// How many fresh tracking codes to try before giving up on a collision
/// streak. With a 1-in-100-million code space, reaching this limit means
/// something other than luck is wrong.
const MAX_CODE_ATTEMPTS: u32 = 5;

/// How many times to re-read a cart that keeps changing under concurrent
/// edits before surfacing the conflict to the caller.
const MAX_CART_CONFLICTS: u32 = 3;

/// An order paired with its status history, newest entry first, as returned
/// by tracking-code lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedOrder {
    /// The order itself.
    pub order: Order,
    /// Status history, newest first.
    pub status_history: Vec<StatusHistoryEntry>,
}

/// Owns the order lifecycle: converts a session's cart into an immutable
/// order snapshot and applies status transitions with their audit trail.
#[derive(Debug, Clone)]
pub struct OrderService<R> {
    repository: R,
    code_generator: TrackingCodeGenerator,
}

impl<R: Repository> OrderService<R> {
    /// Creates an order service backed by the given repository.
    pub const fn new(repository: R) -> Self {
        Self {
            repository,
            code_generator: TrackingCodeGenerator::new(),
        }
    }

    /// Converts the session's cart into an order.
    ///
    /// Reads the cart, snapshots each resolvable product's name and price
    /// into frozen line items, computes the total, and hands the draft to
    /// the repository, which creates order, items, and the initial
    /// `pending` history entry and drains the observed lines as one atomic
    /// unit. If the cart changes between the read and the commit the
    /// repository rejects the draft and the whole sequence is retried from
    /// a fresh read.
    ///
    /// Lines whose product was deleted since being added are silently
    /// excluded - a documented business rule, not error suppression. If
    /// the cart is empty, or every line drops, the call fails with
    /// [`StoreError::EmptyCart`] and nothing is mutated.
    pub async fn create_order(
        &self,
        session: &SessionId,
        customer_name: String,
        customer_email: CustomerEmail,
        address: String,
    ) -> StoreResult<Order> {
        let mut code_attempts = 0;
        let mut cart_conflicts = 0;
        loop {
            let lines = self.repository.cart_lines(session).await?;
            if lines.is_empty() {
                return Err(StoreError::EmptyCart);
            }

            let mut items = Vec::with_capacity(lines.len());
            let mut total = Money::zero();
            for line in &lines {
                let Some(product) = self.repository.get_product(line.product_id).await? else {
                    warn!(%session, product_id = %line.product_id, "dropping cart line for deleted product");
                    continue;
                };
                total = total.checked_add(product.price.multiply_by_quantity(line.quantity)?)?;
                items.push(OrderLineItem {
                    product_id: product.id,
                    product_name: product.name,
                    price: product.price,
                    quantity: line.quantity,
                });
            }
            if items.is_empty() {
                return Err(StoreError::EmptyCart);
            }

            let draft = OrderDraft {
                session_id: session.clone(),
                observed_lines: lines,
                customer_name: customer_name.clone(),
                customer_email: customer_email.clone(),
                address: address.clone(),
                total,
                tracking_code: self.code_generator.generate(),
                items,
                initial_message: WELCOME_MESSAGE.to_string(),
                created_at: Timestamp::now(),
            };
            match self.repository.create_order(draft).await {
                Ok(order) => {
                    info!(
                        order_id = %order.id,
                        tracking_code = %order.tracking_code,
                        total = %order.total,
                        "order created"
                    );
                    return Ok(order);
                }
                Err(RepositoryError::DuplicateTrackingCode(code)) => {
                    code_attempts += 1;
                    warn!(%code, code_attempts, "tracking code collision, regenerating");
                    if code_attempts >= MAX_CODE_ATTEMPTS {
                        return Err(RepositoryError::DuplicateTrackingCode(code).into());
                    }
                }
                // A concurrent operation touched the cart between our read
                // and the commit. Re-read and retry; if the cart is now
                // empty the next iteration reports `EmptyCart`.
                Err(RepositoryError::CartConflict(s)) => {
                    cart_conflicts += 1;
                    warn!(%session, cart_conflicts, "cart changed during order creation, re-reading");
                    if cart_conflicts >= MAX_CART_CONFLICTS {
                        return Err(RepositoryError::CartConflict(s).into());
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Looks up an order by id, including its line items.
    pub async fn get_by_id(&self, id: OrderId) -> StoreResult<Order> {
        self.repository
            .get_order(id)
            .await?
            .ok_or(StoreError::OrderNotFound(id))
    }

    /// Looks up an order by tracking code, returning its status history
    /// newest-first.
    pub async fn get_by_tracking_code(&self, code: &TrackingCode) -> StoreResult<TrackedOrder> {
        let order = self
            .repository
            .find_order_by_code(code)
            .await?
            .ok_or_else(|| StoreError::TrackingCodeNotFound(code.clone()))?;
        let mut status_history = self.repository.status_history(order.id).await?;
        status_history.reverse();
        Ok(TrackedOrder {
            order,
            status_history,
        })
    }

    /// All orders for the admin panel, newest first, each including its
    /// line items.
    pub async fn list_all_for_admin(&self) -> StoreResult<Vec<Order>> {
        let mut orders = self.repository.list_orders().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Sets an order's status, bumps `updated_at`, and appends exactly one
    /// history entry carrying `message` (or a default note naming the new
    /// status).
    ///
    /// Any status value is accepted, including strings outside the known
    /// set; the transition table is deliberately permissive.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        message: Option<String>,
    ) -> StoreResult<Order> {
        let message = message.unwrap_or_else(|| format!("Status updated to {status}"));
        let (order, entry) = self
            .repository
            .append_status(id, status, message, Timestamp::now())
            .await?
            .ok_or(StoreError::OrderNotFound(id))?;
        info!(order_id = %id, status = %entry.status, "order status updated");
        Ok(order)
    }
}
