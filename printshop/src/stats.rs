//! Admin summary metrics.

use serde::{Deserialize, Serialize};

use crate::errors::StoreResult;
use crate::repository::Repository;
use crate::types::Money;

/// Summary metrics over the catalog and order set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Products currently in the catalog.
    pub total_products: u64,
    /// All orders ever placed.
    pub total_orders: u64,
    /// Orders in an in-flight status: pending, confirmed, printing,
    /// quality_check, or ready.
    pub pending_orders: u64,
    /// Sum of totals over orders whose status is exactly `delivered`.
    pub total_revenue: Money,
}

/// Derives [`StoreStats`] from the stored data.
///
/// Every call recomputes from scratch - no caching, no incremental
/// maintenance. Orders in a status outside both the delivered and in-flight
/// buckets (e.g. a custom "cancelled") count toward neither revenue nor the
/// pending total.
#[derive(Debug, Clone)]
pub struct StatsAggregator<R> {
    repository: R,
}

impl<R: Repository> StatsAggregator<R> {
    /// Creates an aggregator backed by the given repository.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Computes the current summary metrics.
    pub async fn compute_stats(&self) -> StoreResult<StoreStats> {
        let total_products = self.repository.count_products().await?;
        let orders = self.repository.list_orders().await?;

        let total_orders = orders.len() as u64;
        let mut pending_orders = 0;
        let mut total_revenue = Money::zero();
        for order in &orders {
            if order.status.is_open() {
                pending_orders += 1;
            } else if order.status.is_delivered() {
                total_revenue = total_revenue.checked_add(order.total)?;
            }
        }

        Ok(StoreStats {
            total_products,
            total_orders,
            pending_orders,
            total_revenue,
        })
    }
}
