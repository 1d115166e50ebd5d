//! Catalog product records.

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId, ProductName, Timestamp};

/// A product in the catalog.
///
/// Immutable once created except through an explicit [`ProductPatch`].
/// Deleting a product removes it from the catalog but never touches
/// historical orders, whose line items carry their own name/price snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: ProductName,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Reference to the product image.
    pub image_url: String,
    /// Free-text category tag.
    pub category: String,
    /// Units currently in stock. Informational; never decremented on
    /// purchase.
    pub in_stock: u32,
    /// Human-readable print duration label, e.g. "3 hours".
    pub print_time: String,
    /// Label naming the kid who designed the product.
    pub created_by: String,
    /// When the product was added to the catalog.
    pub created_at: Timestamp,
}

impl Product {
    /// Applies a partial update, replacing each given field wholesale.
    /// The id and creation timestamp are immutable.
    #[must_use]
    pub fn apply(mut self, patch: ProductPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(print_time) = patch.print_time {
            self.print_time = print_time;
        }
        if let Some(created_by) = patch.created_by {
            self.created_by = created_by;
        }
        self
    }
}

/// Fields for creating a new product. The id and creation timestamp are
/// assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: ProductName,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Reference to the product image.
    pub image_url: String,
    /// Free-text category tag.
    pub category: String,
    /// Units in stock.
    pub in_stock: u32,
    /// Human-readable print duration label.
    pub print_time: String,
    /// Label naming the kid who designed the product.
    pub created_by: String,
}

/// A partial product update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    /// New display name, if changing.
    pub name: Option<ProductName>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New unit price, if changing.
    pub price: Option<Money>,
    /// New image reference, if changing.
    pub image_url: Option<String>,
    /// New category tag, if changing.
    pub category: Option<String>,
    /// New stock count, if changing.
    pub in_stock: Option<u32>,
    /// New print duration label, if changing.
    pub print_time: Option<String>,
    /// New creator label, if changing.
    pub created_by: Option<String>,
}

impl ProductPatch {
    /// A patch that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the price field.
    #[must_use]
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the name field.
    #[must_use]
    pub fn with_name(mut self, name: ProductName) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the stock count field.
    #[must_use]
    pub const fn with_in_stock(mut self, in_stock: u32) -> Self {
        self.in_stock = Some(in_stock);
        self
    }
}
