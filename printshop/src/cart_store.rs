//! Session-scoped cart service.

use tracing::debug;

use crate::cart::{CartEntry, CartLine};
use crate::errors::{RepositoryError, StoreError, StoreResult};
use crate::repository::Repository;
use crate::types::{CartLineId, ProductId, Quantity, SessionId};

/// Per-session shopping cart operations.
///
/// Every operation is scoped by a caller-supplied session token; the store
/// never interprets the token beyond equality. Ownership of a line is
/// checked against the session on every mutation.
#[derive(Debug, Clone)]
pub struct CartStore<R> {
    repository: R,
}

impl<R: Repository> CartStore<R> {
    /// Creates a cart store backed by the given repository.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the session's cart lines, each enriched with its resolved
    /// product. Lines whose product was deleted resolve to `None` rather
    /// than being dropped or erroring.
    pub async fn get(&self, session: &SessionId) -> StoreResult<Vec<CartEntry>> {
        let lines = self.repository.cart_lines(session).await?;
        let mut entries = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self.repository.get_product(line.product_id).await?;
            entries.push(CartEntry::new(line, product));
        }
        Ok(entries)
    }

    /// Adds `quantity` of a product to the cart, merging into an existing
    /// line for the same product if one exists. Merging past the per-line
    /// quantity cap fails with [`StoreError::InvalidInput`], the same as
    /// requesting an over-cap quantity outright.
    pub async fn add(
        &self,
        session: &SessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<CartLine> {
        let quantity = Quantity::new(quantity)?;
        let line = match self
            .repository
            .merge_cart_line(session, product_id, quantity)
            .await
        {
            Ok(line) => line,
            Err(RepositoryError::InvalidQuantity(msg)) => {
                return Err(StoreError::InvalidInput(msg));
            }
            Err(err) => return Err(err.into()),
        };
        debug!(%session, %product_id, quantity = %line.quantity, "cart line merged");
        Ok(line)
    }

    /// Replaces a line's quantity. A quantity of zero or less removes the
    /// line instead.
    pub async fn set_quantity(
        &self,
        session: &SessionId,
        line_id: CartLineId,
        quantity: i64,
    ) -> StoreResult<()> {
        if quantity <= 0 {
            return self.remove(session, line_id).await;
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| StoreError::InvalidInput(format!("quantity {quantity} out of range")))
            .and_then(Quantity::new)?;
        self.repository
            .update_cart_line(session, line_id, quantity)
            .await?
            .ok_or(StoreError::CartLineNotFound(line_id))?;
        debug!(%session, %line_id, %quantity, "cart line quantity set");
        Ok(())
    }

    /// Removes a line owned by the session.
    pub async fn remove(&self, session: &SessionId, line_id: CartLineId) -> StoreResult<()> {
        if self.repository.remove_cart_line(session, line_id).await? {
            debug!(%session, %line_id, "cart line removed");
            Ok(())
        } else {
            Err(StoreError::CartLineNotFound(line_id))
        }
    }

    /// Removes every line for the session. Succeeds even when the cart is
    /// already empty.
    pub async fn clear(&self, session: &SessionId) -> StoreResult<()> {
        self.repository.clear_cart(session).await?;
        debug!(%session, "cart cleared");
        Ok(())
    }
}
