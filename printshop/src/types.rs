//! Core domain scalars for the printshop storefront.
//!
//! All types use smart constructors to ensure validity at construction time,
//! following the "parse, don't validate" principle. An id or quantity that
//! exists is always valid - no further checks needed downstream.

use chrono::{DateTime, Utc};
use nutype::nutype;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::errors::StoreError;

/// An opaque session token scoping a shopping cart to one shopper.
///
/// The token is client-generated and never interpreted by the core; only
/// equality matters. Guaranteed non-empty and at most 255 characters, so a
/// missing or blank transport header fails at construction time.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct SessionId(String);

/// Identifier of a catalog product. Allocated sequentially by the
/// persistence adapter, starting at 1.
#[nutype(
    validate(greater_or_equal = 1),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct ProductId(u64);

/// Identifier of a placed order. Allocated sequentially at order creation,
/// so later orders always carry larger ids.
#[nutype(
    validate(greater_or_equal = 1),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct OrderId(u64);

/// Identifier of a single cart line.
#[nutype(
    validate(greater_or_equal = 1),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct CartLineId(u64);

/// Identifier of a status history entry.
#[nutype(
    validate(greater_or_equal = 1),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct HistoryEntryId(u64);

/// A shopper-facing order tracking code, distinct from the internal order id.
///
/// Format: `3DK-<time-derived digits>-<random digits>`, e.g. `3DK-48231-907`.
/// Human-typeable and low-collision; global uniqueness among stored orders is
/// enforced at insertion time by the persistence adapter.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 30, regex = r"^3DK-[0-9]+-[0-9]+$"),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct TrackingCode(String);

/// Customer email address with basic format validation.
#[nutype(
    sanitize(trim),
    validate(
        not_empty,
        len_char_max = 255,
        regex = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct CustomerEmail(String);

/// Product name: non-empty, with a reasonable length limit.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Display,
        AsRef,
        Deref,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct ProductName(String);

/// Quantity of a product on a cart line or order line item.
///
/// Always at least 1 - "set quantity to zero" is expressed as line removal
/// at the service layer, so a stored quantity can never be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    /// Maximum quantity per line.
    pub const MAX: u32 = 1000;

    /// Creates a quantity, rejecting 0 and values above [`Self::MAX`].
    pub fn new(value: u32) -> Result<Self, StoreError> {
        if value == 0 {
            return Err(StoreError::InvalidInput(
                "quantity must be at least 1".to_string(),
            ));
        }
        if value > Self::MAX {
            return Err(StoreError::InvalidInput(format!(
                "quantity {value} exceeds maximum {}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Adds two quantities, rejecting overflow past [`Self::MAX`].
    pub fn checked_add(self, other: Self) -> Result<Self, StoreError> {
        let sum = self.0.checked_add(other.0).ok_or_else(|| {
            StoreError::InvalidInput("quantity overflow".to_string())
        })?;
        Self::new(sum)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monetary amount in store currency.
///
/// Uses [`Decimal`] for exact arithmetic. Non-negative, at most 2 decimal
/// places. Order totals are sums of `Money` values frozen at order creation
/// and are never recomputed from live product data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Maximum representable amount (100 million).
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

    /// Creates a money value from a decimal amount.
    pub fn new(amount: Decimal) -> Result<Self, StoreError> {
        if amount.is_sign_negative() {
            return Err(StoreError::InvalidInput(format!(
                "money amount cannot be negative: {amount}"
            )));
        }
        if amount.scale() > 2 {
            return Err(StoreError::InvalidInput(format!(
                "money amount cannot have more than 2 decimal places: {amount}"
            )));
        }
        if amount > Self::MAX_AMOUNT {
            return Err(StoreError::InvalidInput(format!(
                "money amount {amount} exceeds maximum {}",
                Self::MAX_AMOUNT
            )));
        }
        Ok(Self(amount))
    }

    /// Creates a money value from integer cents.
    pub fn from_cents(cents: u64) -> Result<Self, StoreError> {
        let cents = i64::try_from(cents)
            .map_err(|_| StoreError::InvalidInput(format!("cents value {cents} too large")))?;
        Self::new(Decimal::new(cents, 2))
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Converts to integer cents.
    pub fn to_cents(self) -> u64 {
        (self.0 * Decimal::from(100)).to_u64().unwrap_or(0)
    }

    /// Adds two amounts, rejecting results past [`Self::MAX_AMOUNT`].
    pub fn checked_add(self, other: Self) -> Result<Self, StoreError> {
        Self::new(self.0 + other.0)
    }

    /// Multiplies a unit price by a line quantity.
    pub fn multiply_by_quantity(self, quantity: Quantity) -> Result<Self, StoreError> {
        Self::new(self.0 * Decimal::from(quantity.value()))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// A timestamp recording when something happened in the store.
///
/// Wraps a UTC [`DateTime`] so timestamp handling stays consistent between
/// order records and status history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from a UTC `DateTime`.
    pub const fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying `DateTime`.
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
