//! Product catalog service.

use tracing::info;

use crate::errors::{StoreError, StoreResult};
use crate::product::{NewProduct, Product, ProductPatch};
use crate::repository::Repository;
use crate::types::ProductId;

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// Read/write access to the product catalog.
///
/// Carries no business logic beyond identity and category filtering.
/// Catalog mutations never cascade into carts or historical orders.
#[derive(Debug, Clone)]
pub struct ProductCatalog<R> {
    repository: R,
}

impl<R: Repository> ProductCatalog<R> {
    /// Creates a catalog backed by the given repository.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Lists products, optionally filtered to an exact category match.
    /// `None` and the sentinel `"All"` both mean unfiltered.
    pub async fn list(&self, category: Option<&str>) -> StoreResult<Vec<Product>> {
        let products = self.repository.list_products().await?;
        match category {
            None | Some(ALL_CATEGORIES) => Ok(products),
            Some(category) => Ok(products
                .into_iter()
                .filter(|p| p.category == category)
                .collect()),
        }
    }

    /// Looks up a single product.
    pub async fn get(&self, id: ProductId) -> StoreResult<Product> {
        self.repository
            .get_product(id)
            .await?
            .ok_or(StoreError::ProductNotFound(id))
    }

    /// Adds a product to the catalog, assigning its id and creation time.
    pub async fn create(&self, new: NewProduct) -> StoreResult<Product> {
        let product = self.repository.insert_product(new).await?;
        info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Applies a partial update. The id itself is immutable.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        let product = self
            .repository
            .update_product(id, patch)
            .await?
            .ok_or(StoreError::ProductNotFound(id))?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Removes a product from the catalog. Historical order line items keep
    /// their own name/price snapshot, so they are unaffected.
    pub async fn delete(&self, id: ProductId) -> StoreResult<()> {
        if self.repository.delete_product(id).await? {
            info!(product_id = %id, "product deleted");
            Ok(())
        } else {
            Err(StoreError::ProductNotFound(id))
        }
    }
}
