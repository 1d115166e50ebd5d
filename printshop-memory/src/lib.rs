//! In-memory repository adapter for the printshop core.
//!
//! This crate provides an in-memory implementation of the `Repository`
//! port from the printshop crate, useful for testing and for small
//! deployments that only need a JSON file on disk. All state lives behind
//! one `RwLock`, which makes the three atomic hot spots of the domain -
//! cart merge, order creation, and status updates - single critical
//! sections.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::significant_drop_tightening)]

use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use printshop::cart::CartLine;
use printshop::errors::{RepositoryError, RepositoryResult};
use printshop::order::{Order, OrderDraft, OrderStatus, StatusHistoryEntry};
use printshop::product::{NewProduct, Product, ProductPatch};
use printshop::repository::Repository;
use printshop::types::{
    CartLineId, HistoryEntryId, OrderId, ProductId, Quantity, SessionId, Timestamp, TrackingCode,
};

/// The four persisted collections plus their id counters.
///
/// This is also the on-disk snapshot format: one JSON document holding
/// everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreState {
    products: Vec<Product>,
    cart_lines: Vec<CartLine>,
    orders: Vec<Order>,
    status_history: Vec<StatusHistoryEntry>,
    next_product_id: u64,
    next_cart_line_id: u64,
    next_order_id: u64,
    next_history_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            cart_lines: Vec::new(),
            orders: Vec::new(),
            status_history: Vec::new(),
            next_product_id: 1,
            next_cart_line_id: 1,
            next_order_id: 1,
            next_history_id: 1,
        }
    }
}

/// Thread-safe in-memory repository.
///
/// Cloning shares the underlying storage, so one repository can back
/// several service instances.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a repository from a JSON snapshot file. A missing file yields
    /// an empty repository, matching first-start behavior.
    pub fn load_from_path(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no snapshot file, starting empty");
            return Ok(Self::new());
        }
        let data = std::fs::read_to_string(path)?;
        let state: StoreState = serde_json::from_str(&data)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        info!(
            path = %path.display(),
            products = state.products.len(),
            orders = state.orders.len(),
            "loaded snapshot"
        );
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Writes the current state to a JSON snapshot file.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> RepositoryResult<()> {
        let state = self.state.read().expect("RwLock poisoned");
        let data = serde_json::to_string_pretty(&*state)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        drop(state);
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }
}

fn invalid_state(what: &str) -> RepositoryError {
    RepositoryError::Backend(format!("invalid stored state: {what}"))
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_product(&self, new: NewProduct) -> RepositoryResult<Product> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let id = ProductId::try_new(state.next_product_id)
            .map_err(|_| invalid_state("product id counter"))?;
        state.next_product_id += 1;
        let product = Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            image_url: new.image_url,
            category: new.category,
            in_stock: new.in_stock,
            print_time: new.print_time,
            created_by: new.created_by,
            created_at: Timestamp::now(),
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> RepositoryResult<Option<Product>> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let Some(slot) = state.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        *slot = slot.clone().apply(patch);
        Ok(Some(slot.clone()))
    }

    async fn delete_product(&self, id: ProductId) -> RepositoryResult<bool> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() < before)
    }

    async fn count_products(&self) -> RepositoryResult<u64> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state.products.len() as u64)
    }

    async fn cart_lines(&self, session: &SessionId) -> RepositoryResult<Vec<CartLine>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state
            .cart_lines
            .iter()
            .filter(|line| &line.session_id == session)
            .cloned()
            .collect())
    }

    async fn merge_cart_line(
        &self,
        session: &SessionId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> RepositoryResult<CartLine> {
        let mut state = self.state.write().expect("RwLock poisoned");

        if let Some(line) = state
            .cart_lines
            .iter_mut()
            .find(|line| &line.session_id == session && line.product_id == product_id)
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .map_err(|e| RepositoryError::InvalidQuantity(e.to_string()))?;
            return Ok(line.clone());
        }

        let id = CartLineId::try_new(state.next_cart_line_id)
            .map_err(|_| invalid_state("cart line id counter"))?;
        state.next_cart_line_id += 1;
        let line = CartLine {
            id,
            session_id: session.clone(),
            product_id,
            quantity,
        };
        state.cart_lines.push(line.clone());
        Ok(line)
    }

    async fn update_cart_line(
        &self,
        session: &SessionId,
        line_id: CartLineId,
        quantity: Quantity,
    ) -> RepositoryResult<Option<CartLine>> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let Some(line) = state
            .cart_lines
            .iter_mut()
            .find(|line| line.id == line_id && &line.session_id == session)
        else {
            return Ok(None);
        };
        line.quantity = quantity;
        Ok(Some(line.clone()))
    }

    async fn remove_cart_line(
        &self,
        session: &SessionId,
        line_id: CartLineId,
    ) -> RepositoryResult<bool> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let before = state.cart_lines.len();
        state
            .cart_lines
            .retain(|line| !(line.id == line_id && &line.session_id == session));
        Ok(state.cart_lines.len() < before)
    }

    async fn clear_cart(&self, session: &SessionId) -> RepositoryResult<()> {
        let mut state = self.state.write().expect("RwLock poisoned");
        state.cart_lines.retain(|line| &line.session_id != session);
        Ok(())
    }

    async fn create_order(&self, draft: OrderDraft) -> RepositoryResult<Order> {
        let mut state = self.state.write().expect("RwLock poisoned");

        if state
            .orders
            .iter()
            .any(|o| o.tracking_code == draft.tracking_code)
        {
            warn!(code = %draft.tracking_code, "rejecting duplicate tracking code");
            return Err(RepositoryError::DuplicateTrackingCode(draft.tracking_code));
        }

        // Verify the draft's snapshot under the write lock: every observed
        // line must still be present, unchanged, and owned by the session.
        // A concurrent merge, requantify, removal, or creation invalidates
        // the draft.
        if draft.observed_lines.is_empty() {
            return Err(RepositoryError::CartConflict(draft.session_id));
        }
        for observed in &draft.observed_lines {
            let current = state.cart_lines.iter().find(|line| {
                line.id == observed.id && line.session_id == draft.session_id
            });
            if current != Some(observed) {
                return Err(RepositoryError::CartConflict(draft.session_id.clone()));
            }
        }

        let id = OrderId::try_new(state.next_order_id)
            .map_err(|_| invalid_state("order id counter"))?;
        state.next_order_id += 1;
        let order = Order {
            id,
            session_id: draft.session_id.clone(),
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            address: draft.address,
            total: draft.total,
            status: OrderStatus::Pending,
            tracking_code: draft.tracking_code,
            items: draft.items,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        state.orders.push(order.clone());

        let entry_id = HistoryEntryId::try_new(state.next_history_id)
            .map_err(|_| invalid_state("history id counter"))?;
        state.next_history_id += 1;
        state.status_history.push(StatusHistoryEntry {
            id: entry_id,
            order_id: id,
            status: OrderStatus::Pending,
            message: draft.initial_message,
            timestamp: draft.created_at,
        });

        // Drain exactly the observed lines. Lines merged into the session
        // after the draft's read stay in the cart.
        state
            .cart_lines
            .retain(|line| !draft.observed_lines.iter().any(|o| o.id == line.id));

        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_order_by_code(&self, code: &TrackingCode) -> RepositoryResult<Option<Order>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state
            .orders
            .iter()
            .find(|o| &o.tracking_code == code)
            .cloned())
    }

    async fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state.orders.clone())
    }

    async fn append_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        message: String,
        at: Timestamp,
    ) -> RepositoryResult<Option<(Order, StatusHistoryEntry)>> {
        let mut state = self.state.write().expect("RwLock poisoned");
        let entry_id = HistoryEntryId::try_new(state.next_history_id)
            .map_err(|_| invalid_state("history id counter"))?;

        let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.status = status.clone();
        order.updated_at = at;
        let updated = order.clone();

        state.next_history_id += 1;
        let entry = StatusHistoryEntry {
            id: entry_id,
            order_id: id,
            status,
            message,
            timestamp: at,
        };
        state.status_history.push(entry.clone());

        Ok(Some((updated, entry)))
    }

    async fn status_history(&self, order_id: OrderId) -> RepositoryResult<Vec<StatusHistoryEntry>> {
        let state = self.state.read().expect("RwLock poisoned");
        Ok(state
            .status_history
            .iter()
            .filter(|entry| entry.order_id == order_id)
            .cloned()
            .collect())
    }
}
